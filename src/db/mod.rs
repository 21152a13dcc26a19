//! Storage layer over CozoDB.
//!
//! - Connection management (SQLite-backed, or in-memory for tests and dry runs)
//! - The [`DatabaseBackend`] trait that commands and queries run against
//! - Schema definitions and their materialization as stored relations
//!
//! # Architecture
//!
//! Every table of a schema becomes one stored relation whose key is the
//! table's primary key; nullable columns use Cozo's optional types. Cozo has
//! no foreign keys or NOT NULL on its own, so those rules are checked by
//! [`crate::constraints`] before rows are written. Two catalog relations keep
//! the source column entries of every created table, which is how a schema is
//! read back out of a store.

mod backend;
mod config;
mod connection;
pub mod escape;
mod query;
pub mod schema;
mod value;

pub use backend::{CozoBackend, DatabaseBackend, Params, QueryResult, RelationColumn};
pub use config::{DEFAULT_DB_PATH, DatabaseConfig};
pub use connection::{open_db, open_mem_db};
pub use query::{key_params, rows_param};
pub use value::{DatabaseValue, display_json};

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to open database '{path}': {message}")]
    OpenFailed { path: String, message: String },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Missing column '{name}' in query result")]
    MissingColumn { name: String },

    #[error("Table '{table}' already exists")]
    DuplicateTable { table: String },

    #[error("Table '{table}' does not exist")]
    UnknownTable { table: String },

    #[error("Table '{table}' references '{referenced}', which has not been created")]
    MissingDependency { table: String, referenced: String },

    #[error("Table '{table}' is referenced by {}", .referenced_by.join(", "))]
    TableInUse {
        table: String,
        referenced_by: Vec<String>,
    },

    #[error("Table '{table}' exists with a different definition")]
    DefinitionMismatch { table: String },

    #[error("No schema installed; run `coursedb setup` first")]
    SchemaNotInstalled,

    #[error("Catalog is inconsistent: {message}")]
    CatalogCorrupt { message: String },
}
