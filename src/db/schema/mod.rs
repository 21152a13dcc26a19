//! Declarative table schemas.
//!
//! A schema starts life as a JSON [`SchemaDocument`]: an array of tables, each
//! with an ordered list of `{name, type, description}` column entries. Primary
//! and foreign keys are written as pseudo-columns inside that list.
//!
//! The pieces:
//!
//! 1. **Document** (`document.rs`): serde model of the JSON file.
//! 2. **Types** (`types.rs`): parser for declared type strings such as
//!    `CHAR(20) NOT NULL` and for constraint bodies.
//! 3. **Definition** (`definition.rs`): the validated [`Schema`] with
//!    [`TableDef`], [`ColumnDef`] and [`ForeignKey`].
//! 4. **Compilers** (`compilers/`): SQL `CREATE TABLE` output and Cozo DDL.
//! 5. **Catalog** (`catalog.rs`) and **materialize** (`materialize.rs`):
//!    creating, dropping and reading back tables in a store.
//!
//! # Type Mapping
//!
//! | Declared type | DataType | Cozo Type |
//! |---------------|----------|-----------|
//! | CHAR(n), VARCHAR(n), TEXT, DATE | String | String |
//! | TINYINT, SMALLINT, INT, BIGINT | Int | Int |
//! | NUMERIC, DECIMAL, REAL, DOUBLE | Float | Float |
//! | BOOLEAN | Bool | Bool |

pub mod catalog;
pub mod compilers;
mod definition;
mod document;
pub mod materialize;
mod types;
mod university;

pub use definition::{ColumnDef, DataType, ForeignKey, RESERVED_PREFIX, Schema, TableDef};
pub use document::{ColumnEntry, FOREIGN_KEY_ENTRY, PRIMARY_KEY_ENTRY, SchemaDocument, TableEntry};
pub use types::{ColumnType, ParsedType, is_valid_identifier, parse_type_def};
pub use university::{UNIVERSITY_SCHEMA_JSON, university_schema};

use thiserror::Error;

/// Schema document errors.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read schema file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid schema JSON: {message}")]
    Json { message: String },

    #[error("Table '{table}' has no primary key")]
    MissingPrimaryKey { table: String },

    #[error("Table '{table}' references unknown table '{referenced}'")]
    UnknownReference { table: String, referenced: String },

    #[error("Table '{table}' references unknown column '{referenced}.{column}'")]
    UnknownReferencedColumn {
        table: String,
        referenced: String,
        column: String,
    },

    #[error("Unrecognized type '{type_name}' for column '{table}.{column}'")]
    UnknownType {
        table: String,
        column: String,
        type_name: String,
    },

    #[error("Invalid identifier '{name}'")]
    InvalidIdentifier { name: String },

    #[error("Column entry {position} of table '{table}' is missing a name or type")]
    IncompleteColumn { table: String, position: usize },

    #[error("Malformed constraint in table '{table}': '{body}'")]
    MalformedConstraint { table: String, body: String },

    #[error("Table '{table}' is declared more than once")]
    DuplicateTable { table: String },

    #[error("Column '{column}' is declared more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Table '{table}' declares more than one primary key")]
    MultiplePrimaryKeys { table: String },

    #[error("Constraint in table '{table}' names undeclared column '{column}'")]
    UnknownKeyColumn { table: String, column: String },

    #[error("Foreign key column count mismatch in table '{table}': {constraint}")]
    ForeignKeyArity { table: String, constraint: String },

    #[error("Foreign key in table '{table}' must reference a primary key or unique column: {constraint}")]
    ReferenceNotKey { table: String, constraint: String },

    #[error("Foreign keys form a cycle between tables: {}", .tables.join(", "))]
    CyclicDependency { tables: Vec<String> },

    #[error("Table name '{table}' is reserved")]
    ReservedName { table: String },

    #[error("Column name '{column}' in table '{table}' is reserved: names may not start with '_'")]
    ReservedColumnName { table: String, column: String },
}
