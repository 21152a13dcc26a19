//! Bulk data import from a JSON data document.
//!
//! The document maps table names to arrays of row objects:
//!
//! ```json
//! { "Student": [{"Sno": "S001", "Sname": "Alice"}], "SC": [...] }
//! ```
//!
//! Tables are imported in creation order whatever order the file lists them,
//! so referencing rows always land after the rows they point at.

use std::error::Error;
use std::path::Path;

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::rows::{RejectedRow, insert_rows};
use crate::db::DatabaseBackend;
use crate::db::schema::Schema;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read data file '{path}': {message}")]
    FileReadFailed { path: String, message: String },

    #[error("Failed to parse data JSON: {message}")]
    JsonParseFailed { message: String },

    #[error("Data document must be a JSON object mapping table names to row arrays")]
    NotAnObject,
}

/// How a table's import went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    /// Every row inserted.
    Imported,
    /// Some rows rejected.
    Partial,
    /// Nothing could be imported for this table.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableImport {
    pub table: String,
    pub status: ImportStatus,
    pub inserted: usize,
    pub rejected: Vec<RejectedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableImport {
    fn failed(table: &str, error: String) -> Self {
        Self {
            table: table.to_string(),
            status: ImportStatus::Failed,
            inserted: 0,
            rejected: Vec::new(),
            error: Some(error),
        }
    }
}

/// Result of importing a data document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub tables: Vec<TableImport>,
}

impl ImportReport {
    pub fn total_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.inserted).sum()
    }

    pub fn total_rejected(&self) -> usize {
        self.tables.iter().map(|t| t.rejected.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.tables.iter().any(|t| t.status != ImportStatus::Imported)
    }
}

/// Import a parsed data document.
pub fn import_data(db: &dyn DatabaseBackend, schema: &Schema, data: &JsonValue) -> Result<ImportReport, Box<dyn Error>> {
    let object = data.as_object().ok_or(ImportError::NotAnObject)?;
    let mut report = ImportReport::default();

    for table in schema.creation_order() {
        let Some(rows) = object.get(&table.name) else {
            continue;
        };
        let Some(rows) = rows.as_array() else {
            report
                .tables
                .push(TableImport::failed(&table.name, "expected an array of rows".to_string()));
            continue;
        };
        if !db.relation_exists(&table.name)? {
            report
                .tables
                .push(TableImport::failed(&table.name, "table has not been created".to_string()));
            continue;
        }

        let inserted = insert_rows(db, schema, &table.name, rows)?;
        let status = if inserted.rejected.is_empty() {
            ImportStatus::Imported
        } else {
            ImportStatus::Partial
        };
        report.tables.push(TableImport {
            table: inserted.table,
            status,
            inserted: inserted.inserted,
            rejected: inserted.rejected,
            error: None,
        });
    }

    for name in object.keys().filter(|name| schema.table(name).is_none()) {
        tracing::warn!(table = %name, "skipping unknown table");
        report
            .tables
            .push(TableImport::failed(name, "unknown table".to_string()));
    }

    tracing::info!(
        tables = report.tables.len(),
        inserted = report.total_inserted(),
        rejected = report.total_rejected(),
        "import finished"
    );
    Ok(report)
}

/// Parse and import a data document held in a string.
pub fn import_json_str(db: &dyn DatabaseBackend, schema: &Schema, content: &str) -> Result<ImportReport, Box<dyn Error>> {
    let data: JsonValue = serde_json::from_str(content).map_err(|e| ImportError::JsonParseFailed {
        message: e.to_string(),
    })?;
    import_data(db, schema, &data)
}

/// Read and import a data document file.
pub fn import_file(db: &dyn DatabaseBackend, schema: &Schema, path: &Path) -> Result<ImportReport, Box<dyn Error>> {
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::FileReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    import_json_str(db, schema, &content)
}
