//! SQL DDL compiler.
//!
//! Produces `CREATE TABLE` / `DROP TABLE` text from table definitions. Column
//! types are written in their canonical spelling, keys become table-level
//! constraints and identifiers are always quoted.

use crate::db::escape::quote_identifier;
use crate::db::schema::definition::{Schema, TableDef};

/// Compiler for generating SQL DDL from schema definitions.
pub struct SqlCompiler;

fn quoted_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| quote_identifier(n))
        .collect::<Vec<_>>()
        .join(", ")
}

impl SqlCompiler {
    /// Generate a `CREATE TABLE` statement for a single table.
    ///
    /// ```sql
    /// CREATE TABLE "SC" (
    ///     "Sno" CHAR(9),
    ///     "Cno" CHAR(4),
    ///     "Grade" SMALLINT,
    ///     PRIMARY KEY ("Sno", "Cno"),
    ///     FOREIGN KEY ("Sno") REFERENCES "Student" ("Sno")
    /// );
    /// ```
    pub fn compile_table(table: &TableDef, if_not_exists: bool) -> String {
        let mut lines: Vec<String> = table
            .columns
            .iter()
            .map(|c| {
                let mut line = format!(
                    "    {} {}",
                    quote_identifier(&c.name),
                    c.column_type.sql_spelling()
                );
                if c.not_null {
                    line.push_str(" NOT NULL");
                }
                if c.unique {
                    line.push_str(" UNIQUE");
                }
                line
            })
            .collect();

        lines.push(format!("    PRIMARY KEY ({})", quoted_list(&table.primary_key)));

        for fk in &table.foreign_keys {
            lines.push(format!(
                "    FOREIGN KEY ({}) REFERENCES {} ({})",
                quoted_list(&fk.columns),
                quote_identifier(&fk.ref_table),
                quoted_list(&fk.ref_columns)
            ));
        }

        format!(
            "CREATE TABLE {}{} (\n{}\n);",
            if if_not_exists { "IF NOT EXISTS " } else { "" },
            quote_identifier(&table.name),
            lines.join(",\n")
        )
    }

    pub fn compile_drop(table: &TableDef, if_exists: bool) -> String {
        format!(
            "DROP TABLE {}{};",
            if if_exists { "IF EXISTS " } else { "" },
            quote_identifier(&table.name)
        )
    }

    /// Statements for the whole schema, referenced tables first.
    pub fn compile_schema(schema: &Schema, if_not_exists: bool) -> Vec<String> {
        schema
            .creation_order()
            .into_iter()
            .map(|t| Self::compile_table(t, if_not_exists))
            .collect()
    }

    /// Drop statements for the whole schema, referencing tables first.
    pub fn compile_drop_schema(schema: &Schema) -> Vec<String> {
        schema
            .drop_order()
            .into_iter()
            .map(|t| Self::compile_drop(t, true))
            .collect()
    }
}
