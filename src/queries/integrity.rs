//! Integrity scan over stored rows.
//!
//! Rows written through [`insert_row`](super::rows::insert_row) are checked
//! on the way in. Stores can still drift: rows written by other tools or a
//! schema document changed after data was loaded. The scan re-checks NOT
//! NULL, UNIQUE and foreign-key rules over what is actually stored.

use std::collections::HashSet;
use std::error::Error;

use cozo::DataValue;
use serde::Serialize;

use super::rows::{StoreLookup, stored_values};
use crate::constraints::{KeyLookup, ValueTuple};
use crate::db::DatabaseBackend;
use crate::db::schema::{Schema, TableDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    NotNull,
    DuplicateValue,
    ForeignKey,
}

impl ViolationKind {
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::NotNull => "NOT NULL",
            ViolationKind::DuplicateValue => "UNIQUE",
            ViolationKind::ForeignKey => "FOREIGN KEY",
        }
    }
}

/// One broken rule on one stored row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub table: String,
    /// Primary key of the offending row.
    pub key: String,
    pub kind: ViolationKind,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntegrityReport {
    pub tables_checked: usize,
    pub rows_checked: usize,
    pub violations: Vec<Violation>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Scan every stored table of `schema`.
pub fn check_integrity(db: &dyn DatabaseBackend, schema: &Schema) -> Result<IntegrityReport, Box<dyn Error>> {
    let lookup = StoreLookup::new(db);
    let mut report = IntegrityReport::default();

    for table in schema.creation_order() {
        if !db.relation_exists(&table.name)? {
            continue;
        }
        let rows = stored_values(db, table)?;
        report.tables_checked += 1;
        report.rows_checked += rows.len();
        check_table(table, &rows, &lookup, &mut report.violations)?;
    }

    tracing::info!(
        tables = report.tables_checked,
        rows = report.rows_checked,
        violations = report.violations.len(),
        "integrity check finished"
    );
    Ok(report)
}

fn check_table(
    table: &TableDef,
    rows: &[Vec<DataValue>],
    lookup: &dyn KeyLookup,
    violations: &mut Vec<Violation>,
) -> Result<(), Box<dyn Error>> {
    let mut seen: Vec<(usize, HashSet<String>)> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.unique && !table.is_sole_key(&c.name))
        .map(|(i, _)| (i, HashSet::new()))
        .collect();

    for row in rows {
        let value_of = |name: &str| -> DataValue {
            table
                .column_index(name)
                .and_then(|i| row.get(i))
                .cloned()
                .unwrap_or(DataValue::Null)
        };
        let values_of = |names: &[String]| -> Vec<DataValue> { names.iter().map(|n| value_of(n)).collect() };
        let key = ValueTuple(&values_of(&table.primary_key)).to_string();
        let mut report = |kind: ViolationKind, detail: String| {
            violations.push(Violation {
                table: table.name.clone(),
                key: key.clone(),
                kind,
                detail,
            });
        };

        for (column, value) in table.columns.iter().zip(row) {
            if *value == DataValue::Null && !table.is_nullable(column) {
                report(ViolationKind::NotNull, format!("{} is NULL", column.name));
            }
        }

        for (idx, values) in seen.iter_mut() {
            let value = row.get(*idx).cloned().unwrap_or(DataValue::Null);
            if value == DataValue::Null {
                continue;
            }
            let rendered = ValueTuple(std::slice::from_ref(&value)).to_string();
            if !values.insert(rendered.clone()) {
                report(
                    ViolationKind::DuplicateValue,
                    format!("{} repeats {}", table.columns[*idx].name, rendered),
                );
            }
        }

        for fk in &table.foreign_keys {
            let values = values_of(&fk.columns);
            if values.iter().any(|v| *v == DataValue::Null) {
                continue;
            }
            if fk.is_self_reference(&table.name) && values_of(&fk.ref_columns) == values {
                continue;
            }
            if !lookup.exists(&fk.ref_table, &fk.ref_columns, &values)? {
                report(
                    ViolationKind::ForeignKey,
                    format!("{} has no row matching {}", fk, ValueTuple(&values)),
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::rows_param;
    use crate::db::schema::compilers::CozoCompiler;
    use crate::queries::rows::insert_row;
    use crate::test_utils::university_db;
    use cozo::Num;
    use rstest::rstest;
    use serde_json::json;

    fn text(s: &str) -> DataValue {
        DataValue::Str(s.into())
    }

    /// Write a row without validation.
    fn force_row(db: &dyn DatabaseBackend, schema: &Schema, table: &str, values: Vec<DataValue>) {
        let script = CozoCompiler::compile_insert(schema.table(table).unwrap());
        db.execute_query(&script, &rows_param(vec![values])).unwrap();
    }

    #[rstest]
    fn test_clean_store() {
        let (db, schema) = university_db();
        insert_row(db.as_ref(), &schema, "Student", &json!({"Sno": "S001", "Sname": "Alice"})).unwrap();
        insert_row(db.as_ref(), &schema, "Course", &json!({"Cno": "C001", "Cname": "DB"})).unwrap();
        insert_row(db.as_ref(), &schema, "SC", &json!({"Sno": "S001", "Cno": "C001", "Grade": 90})).unwrap();

        let report = check_integrity(db.as_ref(), &schema).unwrap();
        assert!(report.is_clean());
        assert_eq!(report.tables_checked, 5);
        assert_eq!(report.rows_checked, 3);
    }

    #[rstest]
    fn test_dangling_foreign_key() {
        let (db, schema) = university_db();
        force_row(
            db.as_ref(),
            &schema,
            "SC",
            vec![text("S999"), text("C001"), DataValue::Num(Num::Int(90))],
        );

        let report = check_integrity(db.as_ref(), &schema).unwrap();
        assert_eq!(report.violations.len(), 2);
        assert!(report.violations.iter().all(|v| v.kind == ViolationKind::ForeignKey));
        assert_eq!(report.violations[0].key, "('S999', 'C001')");
    }

    fn dept_schema(dname_type: &str) -> Schema {
        let doc = crate::db::schema::SchemaDocument::from_json_str(&format!(
            r#"[{{"table_name": "Dept", "columns": [
                {{"name": "Dno", "type": "CHAR(4)"}},
                {{"name": "Dname", "type": "{}"}},
                {{"name": "PRIMARY KEY", "type": "(Dno)"}}
            ]}}]"#,
            dname_type
        ))
        .unwrap();
        Schema::from_document(&doc).unwrap()
    }

    fn dept_db(schema: &Schema) -> Box<dyn DatabaseBackend> {
        let db = crate::db::open_mem_db().unwrap();
        crate::db::schema::materialize::create_schema(db.as_ref(), schema, false).unwrap();
        db
    }

    #[rstest]
    fn test_null_after_column_became_not_null() {
        let loose = dept_schema("CHAR(20)");
        let db = dept_db(&loose);
        force_row(db.as_ref(), &loose, "Dept", vec![text("D001"), DataValue::Null]);

        let strict = dept_schema("CHAR(20) NOT NULL");
        let report = check_integrity(db.as_ref(), &strict).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::NotNull);
        assert_eq!(report.violations[0].detail, "Dname is NULL");
    }

    #[rstest]
    fn test_duplicate_unique_value() {
        let schema = dept_schema("CHAR(20) UNIQUE");
        let db = dept_db(&schema);
        force_row(db.as_ref(), &schema, "Dept", vec![text("D001"), text("CS")]);
        force_row(db.as_ref(), &schema, "Dept", vec![text("D002"), text("CS")]);

        let report = check_integrity(db.as_ref(), &schema).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::DuplicateValue);
        assert_eq!(report.violations[0].key, "('D002')");
    }

    #[rstest]
    fn test_duplicate_unique_value_inside_composite_key() {
        let doc = crate::db::schema::SchemaDocument::from_json_str(
            r#"[{"table_name": "Pair", "columns": [
                {"name": "a", "type": "INT UNIQUE"},
                {"name": "b", "type": "INT"},
                {"name": "PRIMARY KEY", "type": "(a, b)"}
            ]}]"#,
        )
        .unwrap();
        let schema = Schema::from_document(&doc).unwrap();
        let db = dept_db(&schema);
        let int = |n: i64| DataValue::Num(Num::Int(n));
        force_row(db.as_ref(), &schema, "Pair", vec![int(1), int(1)]);
        force_row(db.as_ref(), &schema, "Pair", vec![int(1), int(2)]);

        let report = check_integrity(db.as_ref(), &schema).unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::DuplicateValue);
        assert_eq!(report.violations[0].key, "(1, 2)");
        assert_eq!(report.violations[0].detail, "a repeats (1)");
    }
}
