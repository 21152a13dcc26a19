//! Creating, dropping and reading back schema tables in a store.

use std::error::Error;

use serde::Serialize;

use super::catalog::{self, CATALOG_COLUMNS, CATALOG_TABLES};
use super::compilers::CozoCompiler;
use super::definition::{Schema, TableDef};
use crate::db::{DatabaseBackend, DbError};

/// Outcome of creating a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateReport {
    /// Tables created, in creation order.
    pub created: Vec<String>,
    /// Tables that already existed with the same definition.
    pub skipped: Vec<String>,
}

/// Create one table.
///
/// Fails with [`DbError::DuplicateTable`] when the table exists and with
/// [`DbError::MissingDependency`] when a table it references has not been
/// created yet.
pub fn create_table(db: &dyn DatabaseBackend, table: &TableDef) -> Result<(), Box<dyn Error>> {
    if db.relation_exists(&table.name)? {
        return Err(DbError::DuplicateTable {
            table: table.name.clone(),
        }
        .into());
    }

    for referenced in table.dependencies() {
        if !db.relation_exists(referenced)? {
            return Err(DbError::MissingDependency {
                table: table.name.clone(),
                referenced: referenced.to_string(),
            }
            .into());
        }
    }

    let script = CozoCompiler::compile_relation(table);
    if !db.create_relation(&script)? {
        return Err(DbError::DuplicateTable {
            table: table.name.clone(),
        }
        .into());
    }
    catalog::record_table(db, table)?;

    tracing::info!(table = %table.name, columns = table.columns.len(), "created table");
    Ok(())
}

/// Create every table of a schema in dependency order.
///
/// With `skip_existing`, tables already present with an identical definition
/// are left alone; an existing table with a different definition is still an
/// error. Without it, any existing table fails with `DuplicateTable`.
pub fn create_schema(
    db: &dyn DatabaseBackend,
    schema: &Schema,
    skip_existing: bool,
) -> Result<CreateReport, Box<dyn Error>> {
    let mut report = CreateReport::default();

    for table in schema.creation_order() {
        if skip_existing && db.relation_exists(&table.name)? {
            let stored = catalog::recorded_entries(db, &table.name)?;
            if stored != table.entries {
                return Err(DbError::DefinitionMismatch {
                    table: table.name.clone(),
                }
                .into());
            }
            tracing::debug!(table = %table.name, "table exists, skipping");
            report.skipped.push(table.name.clone());
            continue;
        }

        create_table(db, table)?;
        report.created.push(table.name.clone());
    }

    Ok(report)
}

/// Drop one table. Refuses while another stored table references it.
pub fn drop_table(db: &dyn DatabaseBackend, name: &str) -> Result<(), Box<dyn Error>> {
    if is_catalog_relation(name) || !db.relation_exists(name)? {
        return Err(DbError::UnknownTable {
            table: name.to_string(),
        }
        .into());
    }

    let schema = load_stored_schema(db)?;
    let referenced_by: Vec<String> = schema
        .referencing(name)
        .into_iter()
        .map(|t| t.name.clone())
        .collect();
    if !referenced_by.is_empty() {
        return Err(DbError::TableInUse {
            table: name.to_string(),
            referenced_by,
        }
        .into());
    }

    db.remove_relation(name)?;
    catalog::forget_table(db, name)?;
    tracing::info!(table = name, "dropped table");
    Ok(())
}

/// Drop every table, referencing tables first, then the catalog itself.
/// Returns the names of the dropped tables.
pub fn drop_all(db: &dyn DatabaseBackend) -> Result<Vec<String>, Box<dyn Error>> {
    let mut dropped = Vec::new();

    let schema = load_stored_schema(db)?;
    for table in schema.drop_order() {
        if db.relation_exists(&table.name)? {
            db.remove_relation(&table.name)?;
            dropped.push(table.name.clone());
        }
    }

    for name in db.relation_names()? {
        if !is_catalog_relation(&name) {
            db.remove_relation(&name)?;
            dropped.push(name);
        }
    }

    for name in [CATALOG_COLUMNS, CATALOG_TABLES] {
        if db.relation_exists(name)? {
            db.remove_relation(name)?;
        }
    }

    tracing::info!(tables = dropped.len(), "dropped all tables");
    Ok(dropped)
}

/// Schema rebuilt from the catalog; fails with `SchemaNotInstalled` when no
/// table has been created.
pub fn load_schema(db: &dyn DatabaseBackend) -> Result<Schema, Box<dyn Error>> {
    let schema = load_stored_schema(db)?;
    if schema.is_empty() {
        return Err(DbError::SchemaNotInstalled.into());
    }
    Ok(schema)
}

/// Like `load_schema` but an empty store yields an empty schema.
fn load_stored_schema(db: &dyn DatabaseBackend) -> Result<Schema, Box<dyn Error>> {
    let doc = catalog::load_document(db)?;
    Schema::from_document(&doc).map_err(|e| {
        DbError::CatalogCorrupt {
            message: e.to_string(),
        }
        .into()
    })
}

fn is_catalog_relation(name: &str) -> bool {
    name == CATALOG_TABLES || name == CATALOG_COLUMNS
}

/// Table layout as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableShape {
    pub name: String,
    /// Column names, key columns first.
    pub columns: Vec<String>,
    pub key_columns: Vec<String>,
}

impl TableShape {
    /// The layout a table definition produces when created.
    pub fn from_table(table: &TableDef) -> Self {
        let key_columns: Vec<String> = table.key_columns().map(|c| c.name.clone()).collect();
        let columns = key_columns
            .iter()
            .cloned()
            .chain(table.value_columns().map(|c| c.name.clone()))
            .collect();
        Self {
            name: table.name.clone(),
            columns,
            key_columns,
        }
    }
}

/// Read table names, column names and key columns from engine metadata,
/// sorted by table name. Catalog relations are excluded.
pub fn introspect(db: &dyn DatabaseBackend) -> Result<Vec<TableShape>, Box<dyn Error>> {
    let mut names: Vec<String> = db
        .relation_names()?
        .into_iter()
        .filter(|n| !is_catalog_relation(n))
        .collect();
    names.sort();

    let mut shapes = Vec::with_capacity(names.len());
    for name in names {
        let columns = db.relation_columns(&name)?;
        shapes.push(TableShape {
            key_columns: columns.iter().filter(|c| c.is_key).map(|c| c.name.clone()).collect(),
            columns: columns.into_iter().map(|c| c.name).collect(),
            name,
        });
    }
    Ok(shapes)
}
