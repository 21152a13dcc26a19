use std::error::Error;

use serde::Serialize;

use super::DdlCmd;
use crate::commands::{Context, Execute};
use crate::db::schema::compilers::SqlCompiler;

/// Result of the ddl command execution
#[derive(Debug, Serialize)]
pub struct DdlResult {
    pub schema: String,
    pub statements: Vec<String>,
}

impl Execute for DdlCmd {
    type Output = DdlResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let (source, schema) = ctx.schema_document(self.schema.as_deref())?;
        let statements = if self.drop {
            SqlCompiler::compile_drop_schema(&schema)
        } else {
            SqlCompiler::compile_schema(&schema, self.if_not_exists)
        };
        Ok(DdlResult {
            schema: source,
            statements,
        })
    }
}
