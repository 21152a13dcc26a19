//! The bundled course-enrollment schema.

use super::{Schema, SchemaDocument, SchemaError};

/// Student, Course, SC, Teacher and TC as a schema document.
pub const UNIVERSITY_SCHEMA_JSON: &str = include_str!("university.json");

/// Parse and validate the bundled schema.
pub fn university_schema() -> Result<Schema, SchemaError> {
    let doc = SchemaDocument::from_json_str(UNIVERSITY_SCHEMA_JSON)?;
    Schema::from_document(&doc)
}
