//! Shared test utilities for execute and integration tests.
//!
//! This module provides common helpers used across command execute tests.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::commands::Context;
use crate::db::schema::materialize::create_schema;
use crate::db::schema::{Schema, university_schema};
use crate::db::{DatabaseBackend, open_mem_db};
use crate::fixtures;
use crate::queries::import_json_str;

/// Create a temporary file containing the given content.
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// In-memory store with the university tables created and no rows.
pub fn university_db() -> (Box<dyn DatabaseBackend>, Schema) {
    let db = open_mem_db().expect("Failed to open in-memory db");
    let schema = university_schema().expect("Bundled schema should be valid");
    create_schema(db.as_ref(), &schema, false).expect("Schema creation should succeed");
    (db, schema)
}

/// Command context over an empty university store.
pub fn university_ctx() -> Context {
    let (db, _) = university_db();
    Context::with_backend(db)
}

/// Command context over a university store loaded with the sample data.
pub fn sample_ctx() -> Context {
    let (db, schema) = university_db();
    let report = import_json_str(db.as_ref(), &schema, fixtures::SAMPLE_DATA).expect("Import should succeed");
    assert!(!report.has_failures(), "Sample data should import cleanly");
    Context::with_backend(db)
}
