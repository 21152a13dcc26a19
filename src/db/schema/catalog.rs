//! Catalog relations describing the tables created in a store.
//!
//! Cozo keeps column names and types but not declared SQL types, NOT NULL,
//! descriptions or foreign keys. The catalog stores each table's original
//! column entries so the schema document can be rebuilt from the store.

use std::error::Error;

use cozo::{DataValue, Num};

use crate::db::schema::document::{ColumnEntry, SchemaDocument, TableEntry};
use crate::db::schema::definition::TableDef;
use crate::db::{DatabaseBackend, DatabaseValue, DbError, Params, rows_param};

pub const CATALOG_TABLES: &str = "catalog_tables";
pub const CATALOG_COLUMNS: &str = "catalog_columns";

const SCHEMA_CATALOG_TABLES: &str = r#"
:create catalog_tables {
    table_name: String
    =>
    position: Int
}
"#;

const SCHEMA_CATALOG_COLUMNS: &str = r#"
:create catalog_columns {
    table_name: String,
    position: Int
    =>
    name: String,
    declared_type: String,
    description: String
}
"#;

/// Create the catalog relations if they are missing.
pub fn ensure_catalog(db: &dyn DatabaseBackend) -> Result<(), Box<dyn Error>> {
    for (name, script) in [
        (CATALOG_TABLES, SCHEMA_CATALOG_TABLES),
        (CATALOG_COLUMNS, SCHEMA_CATALOG_COLUMNS),
    ] {
        if !db.relation_exists(name)? {
            db.create_relation(script)?;
        }
    }
    Ok(())
}

pub fn catalog_exists(db: &dyn DatabaseBackend) -> Result<bool, Box<dyn Error>> {
    Ok(db.relation_exists(CATALOG_TABLES)? && db.relation_exists(CATALOG_COLUMNS)?)
}

fn name_param(table: &str) -> Params {
    let mut params = Params::new();
    params.insert("name".to_string(), DataValue::Str(table.into()));
    params
}

fn next_position(db: &dyn DatabaseBackend) -> Result<i64, Box<dyn Error>> {
    let result = db.execute_query_no_params("?[position] := *catalog_tables{position}")?;
    Ok(result
        .rows
        .iter()
        .filter_map(|row| row.first().and_then(|v| v.as_i64()))
        .max()
        .map_or(0, |max| max + 1))
}

/// Record a newly created table after any already recorded.
pub fn record_table(db: &dyn DatabaseBackend, table: &TableDef) -> Result<(), Box<dyn Error>> {
    ensure_catalog(db)?;
    let position = next_position(db)?;

    db.execute_query(
        "?[table_name, position] <- $rows\n:put catalog_tables { table_name => position }",
        &rows_param(vec![vec![
            DataValue::Str(table.name.as_str().into()),
            DataValue::Num(Num::Int(position)),
        ]]),
    )?;

    let columns = table
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            vec![
                DataValue::Str(table.name.as_str().into()),
                DataValue::Num(Num::Int(i as i64)),
                DataValue::Str(entry.name.as_str().into()),
                DataValue::Str(entry.type_def.as_str().into()),
                DataValue::Str(entry.description.as_str().into()),
            ]
        })
        .collect();
    db.execute_query(
        "?[table_name, position, name, declared_type, description] <- $rows\n\
         :put catalog_columns { table_name, position => name, declared_type, description }",
        &rows_param(columns),
    )?;
    Ok(())
}

/// Remove a table's catalog entries.
pub fn forget_table(db: &dyn DatabaseBackend, table: &str) -> Result<(), Box<dyn Error>> {
    if !catalog_exists(db)? {
        return Ok(());
    }
    db.execute_query(
        "?[table_name, position] := *catalog_columns{table_name, position}, table_name == $name\n\
         :rm catalog_columns { table_name, position }",
        &name_param(table),
    )?;
    db.execute_query(
        "?[table_name] := *catalog_tables{table_name}, table_name == $name\n\
         :rm catalog_tables { table_name }",
        &name_param(table),
    )?;
    Ok(())
}

/// Tables recorded in the catalog, in creation order.
pub fn recorded_tables(db: &dyn DatabaseBackend) -> Result<Vec<String>, Box<dyn Error>> {
    if !catalog_exists(db)? {
        return Ok(Vec::new());
    }
    let result = db.execute_query_no_params(
        "?[position, table_name] := *catalog_tables{table_name, position}\n:order position",
    )?;
    let idx = result.column_index("table_name")?;
    Ok(result
        .rows
        .iter()
        .filter_map(|row| row.get(idx).and_then(|v| v.as_string()))
        .collect())
}

/// Source entries of one recorded table. Empty when no catalog exists.
pub fn recorded_entries(db: &dyn DatabaseBackend, table: &str) -> Result<Vec<ColumnEntry>, Box<dyn Error>> {
    if !catalog_exists(db)? {
        return Ok(Vec::new());
    }
    let result = db.execute_query(
        "?[position, name, declared_type, description] := \
         *catalog_columns{table_name, position, name, declared_type, description}, \
         table_name == $name\n:order position",
        &name_param(table),
    )?;
    let name_idx = result.column_index("name")?;
    let type_idx = result.column_index("declared_type")?;
    let desc_idx = result.column_index("description")?;

    let mut entries = Vec::with_capacity(result.rows.len());
    for row in &result.rows {
        let text = |idx: usize| {
            row.get(idx).and_then(|v| v.as_string()).ok_or_else(|| DbError::CatalogCorrupt {
                message: format!("non-text catalog entry for table '{}'", table),
            })
        };
        entries.push(ColumnEntry {
            name: text(name_idx)?,
            type_def: text(type_idx)?,
            description: text(desc_idx)?,
        });
    }
    Ok(entries)
}

/// Rebuild the schema document from the catalog.
pub fn load_document(db: &dyn DatabaseBackend) -> Result<SchemaDocument, Box<dyn Error>> {
    let mut tables = Vec::new();
    for table_name in recorded_tables(db)? {
        let columns = recorded_entries(db, &table_name)?;
        tables.push(TableEntry { table_name, columns });
    }
    Ok(SchemaDocument { tables })
}
