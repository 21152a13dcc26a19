//! Serde model of the JSON schema document.
//!
//! The document is an array of table objects. Each table carries an ordered
//! list of column entries; primary and foreign keys are written as
//! pseudo-columns named `PRIMARY KEY` / `FOREIGN KEY` whose `type` field holds
//! the constraint body.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// Pseudo-column name for a primary key declaration.
pub const PRIMARY_KEY_ENTRY: &str = "PRIMARY KEY";

/// Pseudo-column name for a foreign key declaration.
pub const FOREIGN_KEY_ENTRY: &str = "FOREIGN KEY";

/// A single column entry (real column or constraint pseudo-column).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEntry {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub type_def: String,

    #[serde(default)]
    pub description: String,
}

impl ColumnEntry {
    pub fn new(name: &str, type_def: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            type_def: type_def.to_string(),
            description: description.to_string(),
        }
    }

    /// True for `PRIMARY KEY` and `FOREIGN KEY` pseudo-columns.
    pub fn is_constraint(&self) -> bool {
        self.name == PRIMARY_KEY_ENTRY || self.name == FOREIGN_KEY_ENTRY
    }
}

/// A table object in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub table_name: String,
    pub columns: Vec<ColumnEntry>,
}

/// The whole schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDocument {
    pub tables: Vec<TableEntry>,
}

impl SchemaDocument {
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(content).map_err(|e| SchemaError::Json {
            message: e.to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(self).map_err(|e| SchemaError::Json {
            message: e.to_string(),
        })
    }
}
