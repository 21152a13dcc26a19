use std::error::Error;

use serde::Serialize;

use super::ShowTableCmd;
use crate::commands::{Context, Execute};
use crate::db::DbError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDetail {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
    /// Referenced `Table.column` when the column is part of a foreign key.
    pub references: Vec<String>,
    pub description: String,
}

/// Result of the show-table command execution
#[derive(Debug, Serialize)]
pub struct TableDetail {
    pub table: String,
    pub columns: Vec<ColumnDetail>,
    pub foreign_keys: Vec<String>,
    pub referenced_by: Vec<String>,
}

impl Execute for ShowTableCmd {
    type Output = TableDetail;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let schema = ctx.stored_schema()?;
        let table = schema.table(&self.table).ok_or_else(|| DbError::UnknownTable {
            table: self.table.clone(),
        })?;

        let columns = table
            .columns
            .iter()
            .map(|c| ColumnDetail {
                name: c.name.clone(),
                declared_type: c.declared_type.clone(),
                not_null: !table.is_nullable(c),
                primary_key: table.is_key(&c.name),
                unique: c.unique,
                references: table
                    .foreign_keys_on(&c.name)
                    .iter()
                    .filter_map(|fk| {
                        let pos = fk.columns.iter().position(|n| *n == c.name)?;
                        Some(format!("{}.{}", fk.ref_table, fk.ref_columns.get(pos)?))
                    })
                    .collect(),
                description: c.description.clone(),
            })
            .collect();

        Ok(TableDetail {
            table: table.name.clone(),
            columns,
            foreign_keys: table.foreign_keys.iter().map(|fk| fk.to_string()).collect(),
            referenced_by: schema.referencing(&table.name).iter().map(|t| t.name.clone()).collect(),
        })
    }
}
