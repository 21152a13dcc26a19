use std::error::Error;

use serde::Serialize;

use super::ShowSchemaCmd;
use crate::commands::{Context, Execute};
use crate::db::schema::SchemaDocument;
use crate::queries::count_rows;

#[derive(Debug, Clone, Serialize)]
pub struct TableOverview {
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: Vec<String>,
    pub references: Vec<String>,
    pub rows: usize,
}

/// Result of the show-schema command execution
#[derive(Debug, Serialize)]
pub struct SchemaOverview {
    pub tables: Vec<TableOverview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<SchemaDocument>,
}

impl Execute for ShowSchemaCmd {
    type Output = SchemaOverview;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let db = ctx.db()?;
        let schema = ctx.stored_schema()?;

        let mut tables = Vec::new();
        for table in schema.creation_order() {
            tables.push(TableOverview {
                name: table.name.clone(),
                columns: table.columns.iter().map(|c| c.name.clone()).collect(),
                primary_key: table.primary_key.clone(),
                references: table.dependencies().iter().map(|d| d.to_string()).collect(),
                rows: count_rows(db, &schema, &table.name)?,
            });
        }

        Ok(SchemaOverview {
            tables,
            document: self.document.then(|| schema.to_document()),
        })
    }
}
