use std::error::Error;

use serde::Serialize;

use super::ValidateCmd;
use crate::commands::{Context, Execute};
use crate::db::schema::TableDef;

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub columns: usize,
    pub primary_key: Vec<String>,
    pub not_null: Vec<String>,
    pub foreign_keys: Vec<String>,
}

impl TableSummary {
    pub fn from_table(table: &TableDef) -> Self {
        Self {
            name: table.name.clone(),
            columns: table.columns.len(),
            primary_key: table.primary_key.clone(),
            not_null: table
                .columns
                .iter()
                .filter(|c| !table.is_key(&c.name) && !table.is_nullable(c))
                .map(|c| c.name.clone())
                .collect(),
            foreign_keys: table.foreign_keys.iter().map(|fk| fk.to_string()).collect(),
        }
    }
}

/// Result of the validate command execution
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    pub schema: String,
    pub valid: bool,
    pub tables: Vec<TableSummary>,
    pub creation_order: Vec<String>,
}

impl Execute for ValidateCmd {
    type Output = ValidateResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let (source, schema) = ctx.schema_document(self.schema.as_deref())?;
        Ok(ValidateResult {
            schema: source,
            valid: true,
            tables: schema.tables().iter().map(TableSummary::from_table).collect(),
            creation_order: schema.creation_order().iter().map(|t| t.name.clone()).collect(),
        })
    }
}
