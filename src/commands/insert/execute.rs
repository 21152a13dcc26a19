use std::error::Error;

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::InsertCmd;
use crate::commands::{Context, Execute};
use crate::queries::insert_row;

/// Result of the insert command execution
#[derive(Debug, Serialize)]
pub struct InsertResult {
    pub table: String,
    pub row: JsonValue,
}

impl Execute for InsertCmd {
    type Output = InsertResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let schema = ctx.stored_schema()?;
        insert_row(ctx.db()?, &schema, &self.table, &self.row)?;
        Ok(InsertResult {
            table: self.table,
            row: self.row,
        })
    }
}
