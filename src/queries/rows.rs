//! Validated row writes and plain row reads.

use std::error::Error;

use cozo::DataValue;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::constraints::{ConstraintError, KeyLookup, PreparedRow, RowValidator};
use crate::db::schema::compilers::CozoCompiler;
use crate::db::schema::{Schema, TableDef};
use crate::db::{DatabaseBackend, DatabaseValue, DbError, key_params, rows_param};

/// Key lookups answered by the store.
pub struct StoreLookup<'a> {
    db: &'a dyn DatabaseBackend,
}

impl<'a> StoreLookup<'a> {
    pub fn new(db: &'a dyn DatabaseBackend) -> Self {
        Self { db }
    }
}

impl KeyLookup for StoreLookup<'_> {
    fn exists(&self, table: &str, columns: &[String], values: &[DataValue]) -> Result<bool, Box<dyn Error>> {
        let script = CozoCompiler::compile_key_lookup(table, columns);
        let result = self.db.execute_query(&script, &key_params(values))?;
        Ok(!result.rows.is_empty())
    }
}

/// A row that was not inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// Position of the row in its input array.
    pub index: usize,
    pub reason: String,
}

/// Outcome of inserting several rows into one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsertReport {
    pub table: String,
    pub inserted: usize,
    pub rejected: Vec<RejectedRow>,
}

fn write_row(db: &dyn DatabaseBackend, table: &TableDef, row: PreparedRow) -> Result<(), Box<dyn Error>> {
    let script = CozoCompiler::compile_insert(table);
    db.execute_query(&script, &rows_param(vec![row.values]))?;
    Ok(())
}

fn schema_table<'a>(schema: &'a Schema, name: &str) -> Result<&'a TableDef, ConstraintError> {
    schema.table(name).ok_or_else(|| ConstraintError::UnknownTable {
        table: name.to_string(),
    })
}

/// Validate one row and insert it. Any violation is returned as a
/// [`ConstraintError`] and nothing is written.
pub fn insert_row(db: &dyn DatabaseBackend, schema: &Schema, table: &str, row: &JsonValue) -> Result<(), Box<dyn Error>> {
    let def = schema_table(schema, table)?;
    let validator = RowValidator::new(schema);
    let prepared = validator.validate(table, row, &StoreLookup::new(db))?;
    write_row(db, def, prepared)?;
    tracing::debug!(table, "inserted row");
    Ok(())
}

/// Insert rows one at a time, so later rows may reference earlier ones.
/// Rows failing validation are reported and skipped; store errors abort.
pub fn insert_rows(db: &dyn DatabaseBackend, schema: &Schema, table: &str, rows: &[JsonValue]) -> Result<InsertReport, Box<dyn Error>> {
    let def = schema_table(schema, table)?;
    let validator = RowValidator::new(schema);
    let lookup = StoreLookup::new(db);
    let mut report = InsertReport {
        table: def.name.clone(),
        ..InsertReport::default()
    };

    for (index, row) in rows.iter().enumerate() {
        match validator.validate(table, row, &lookup) {
            Ok(prepared) => {
                write_row(db, def, prepared)?;
                report.inserted += 1;
            }
            Err(e) => match e.downcast_ref::<ConstraintError>() {
                Some(violation) => {
                    tracing::warn!(table, index, reason = %violation, "rejected row");
                    report.rejected.push(RejectedRow {
                        index,
                        reason: violation.to_string(),
                    });
                }
                None => return Err(e),
            },
        }
    }

    tracing::info!(table, inserted = report.inserted, rejected = report.rejected.len(), "inserted rows");
    Ok(report)
}

/// Stored rows of one table, values converted for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSet {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
}

impl RowSet {
    /// Rows as JSON objects in column order.
    pub fn to_objects(&self) -> Vec<JsonValue> {
        self.rows
            .iter()
            .map(|row| {
                JsonValue::Object(
                    self.columns
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned())
                        .collect(),
                )
            })
            .collect()
    }
}

fn stored_table<'a>(db: &dyn DatabaseBackend, schema: &'a Schema, name: &str) -> Result<&'a TableDef, Box<dyn Error>> {
    match schema.table(name) {
        Some(def) if db.relation_exists(name)? => Ok(def),
        _ => Err(DbError::UnknownTable {
            table: name.to_string(),
        }
        .into()),
    }
}

/// Read rows in declared column order, sorted by primary key.
pub fn select_rows(db: &dyn DatabaseBackend, schema: &Schema, table: &str, limit: Option<usize>) -> Result<RowSet, Box<dyn Error>> {
    let def = stored_table(db, schema, table)?;
    let result = db.execute_query_no_params(&CozoCompiler::compile_select(def, limit))?;
    Ok(RowSet {
        table: def.name.clone(),
        columns: def.columns.iter().map(|c| c.name.clone()).collect(),
        rows: result
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_json()).collect())
            .collect(),
    })
}

/// Raw stored values in declared column order.
pub(crate) fn stored_values(db: &dyn DatabaseBackend, table: &TableDef) -> Result<Vec<Vec<DataValue>>, Box<dyn Error>> {
    let result = db.execute_query_no_params(&CozoCompiler::compile_select(table, None))?;
    Ok(result.rows)
}

pub fn count_rows(db: &dyn DatabaseBackend, schema: &Schema, table: &str) -> Result<usize, Box<dyn Error>> {
    let def = stored_table(db, schema, table)?;
    let result = db.execute_query_no_params(&CozoCompiler::compile_count(def))?;
    Ok(result
        .rows
        .first()
        .and_then(|row| row.first())
        .and_then(|v| v.as_i64())
        .map_or(0, |n| n.max(0) as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::university_db;
    use rstest::rstest;
    use serde_json::json;

    fn violation(err: Box<dyn Error>) -> ConstraintError {
        err.downcast_ref::<ConstraintError>().cloned().expect("expected a ConstraintError")
    }

    #[rstest]
    fn test_insert_and_select() {
        let (db, schema) = university_db();
        insert_row(db.as_ref(), &schema, "Student", &json!({"Sno": "S002", "Sname": "Bob", "Sage": 21})).unwrap();
        insert_row(db.as_ref(), &schema, "Student", &json!({"Sno": "S001", "Sname": "Alice"})).unwrap();

        let rows = select_rows(db.as_ref(), &schema, "Student", None).unwrap();
        assert_eq!(rows.columns, vec!["Sno", "Sname", "Ssex", "Sage", "Sdept", "Scholarship"]);
        assert_eq!(rows.rows.len(), 2);
        assert_eq!(rows.rows[0][0], json!("S001"));
        assert_eq!(rows.rows[1][3], json!(21));
        assert_eq!(rows.rows[0][2], JsonValue::Null);
        assert_eq!(count_rows(db.as_ref(), &schema, "Student").unwrap(), 2);
    }

    #[rstest]
    fn test_select_limit() {
        let (db, schema) = university_db();
        for i in 0..4 {
            insert_row(db.as_ref(), &schema, "Course", &json!({"Cno": format!("C00{}", i), "Cname": "X"})).unwrap();
        }
        let rows = select_rows(db.as_ref(), &schema, "Course", Some(3)).unwrap();
        assert_eq!(rows.rows.len(), 3);
    }

    #[rstest]
    fn test_count_empty_table() {
        let (db, schema) = university_db();
        assert_eq!(count_rows(db.as_ref(), &schema, "TC").unwrap(), 0);
    }

    #[rstest]
    fn test_insert_duplicate_key_leaves_row_unchanged() {
        let (db, schema) = university_db();
        insert_row(db.as_ref(), &schema, "Course", &json!({"Cno": "C001", "Cname": "DB", "Ccredit": 4})).unwrap();
        let err = insert_row(db.as_ref(), &schema, "Course", &json!({"Cno": "C001", "Cname": "OS"})).unwrap_err();
        assert!(matches!(violation(err), ConstraintError::DuplicateKey { .. }));

        let rows = select_rows(db.as_ref(), &schema, "Course", None).unwrap();
        assert_eq!(rows.rows[0][1], json!("DB"));
    }

    #[rstest]
    fn test_insert_foreign_key_violation() {
        let (db, schema) = university_db();
        let err = insert_row(db.as_ref(), &schema, "SC", &json!({"Sno": "S999", "Cno": "C001", "Grade": 90})).unwrap_err();
        assert!(matches!(violation(err), ConstraintError::ForeignKey { .. }));
        assert_eq!(count_rows(db.as_ref(), &schema, "SC").unwrap(), 0);
    }

    #[rstest]
    fn test_insert_rows_reports_rejections() {
        let (db, schema) = university_db();
        let rows = vec![
            json!({"Sno": "S001", "Sname": "Alice"}),
            json!({"Sno": "S002"}),
            json!({"Sno": "S001", "Sname": "Again"}),
            json!({"Sno": "S003", "Sname": "Carol"}),
        ];
        let report = insert_rows(db.as_ref(), &schema, "Student", &rows).unwrap();
        assert_eq!(report.inserted, 2);
        let indices: Vec<_> = report.rejected.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2]);
        assert!(report.rejected[0].reason.contains("must not be NULL"));
    }

    #[rstest]
    fn test_unknown_table() {
        let (db, schema) = university_db();
        let err = insert_row(db.as_ref(), &schema, "Dept", &json!({})).unwrap_err();
        assert!(matches!(violation(err), ConstraintError::UnknownTable { .. }));

        let err = select_rows(db.as_ref(), &schema, "Dept", None).unwrap_err();
        assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::UnknownTable { .. })));
    }

    #[rstest]
    fn test_row_set_objects_keep_column_order() {
        let set = RowSet {
            table: "SC".to_string(),
            columns: vec!["Sno".to_string(), "Cno".to_string(), "Grade".to_string()],
            rows: vec![vec![json!("S001"), json!("C001"), json!(90)]],
        };
        let objects = set.to_objects();
        let keys: Vec<_> = objects[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["Sno", "Cno", "Grade"]);
    }
}
