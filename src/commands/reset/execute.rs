use std::error::Error;

use serde::Serialize;

use super::ResetCmd;
use crate::commands::{Context, Execute};
use crate::db::schema::materialize::{drop_all, drop_table};

/// Result of the reset command execution
#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub dropped: Vec<String>,
}

impl Execute for ResetCmd {
    type Output = ResetResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let db = ctx.db()?;
        let dropped = match self.table {
            Some(table) => {
                drop_table(db, &table)?;
                vec![table]
            }
            None => drop_all(db)?,
        };
        Ok(ResetResult { dropped })
    }
}
