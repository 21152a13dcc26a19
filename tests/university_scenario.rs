//! End-to-end tests for the university enrollment schema.
//!
//! These run through the public library API against both in-memory and
//! SQLite-backed stores.

use std::error::Error;

use coursedb::commands::{CommandRunner, Context, Execute, PreviewCmd, SetupCmd, ShowSchemaCmd};
use coursedb::constraints::ConstraintError;
use coursedb::db::schema::catalog::recorded_tables;
use coursedb::db::schema::materialize::{TableShape, create_schema, create_table, introspect, load_schema};
use coursedb::db::schema::{Schema, university_schema};
use coursedb::db::{DatabaseBackend, DatabaseConfig, DbError, open_db, open_mem_db};
use coursedb::output::OutputFormat;
use coursedb::queries::{count_rows, insert_row, select_rows};
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::NamedTempFile;

#[fixture]
fn schema() -> Schema {
    university_schema().expect("bundled schema should be valid")
}

#[fixture]
fn db() -> Box<dyn DatabaseBackend> {
    open_mem_db().expect("in-memory db")
}

fn violation(err: Box<dyn Error>) -> ConstraintError {
    err.downcast_ref::<ConstraintError>()
        .cloned()
        .unwrap_or_else(|| panic!("expected a ConstraintError, got {}", err))
}

#[rstest]
fn enrollment_scenario(db: Box<dyn DatabaseBackend>, schema: Schema) {
    let db = db.as_ref();
    for name in ["Student", "Course", "SC"] {
        create_table(db, schema.table(name).unwrap()).unwrap();
    }

    insert_row(
        db,
        &schema,
        "Student",
        &json!({"Sno": "S001", "Sname": "Alice", "Ssex": "F", "Sage": 20, "Sdept": "CS", "Scholarship": "Y"}),
    )
    .unwrap();
    insert_row(db, &schema, "Course", &json!({"Cno": "C001", "Cname": "DB", "Cpno": null, "Ccredit": 4})).unwrap();
    insert_row(db, &schema, "SC", &json!({"Sno": "S001", "Cno": "C001", "Grade": 90})).unwrap();

    let err = insert_row(db, &schema, "SC", &json!({"Sno": "S999", "Cno": "C001", "Grade": 90})).unwrap_err();
    match violation(err) {
        ConstraintError::ForeignKey { table, constraint, values } => {
            assert_eq!(table, "SC");
            assert_eq!(constraint, "(Sno) REFERENCES Student(Sno)");
            assert_eq!(values, "('S999')");
        }
        other => panic!("Expected a foreign key violation, got {:?}", other),
    }

    assert_eq!(count_rows(db, &schema, "SC").unwrap(), 1);
}

#[rstest]
fn creating_a_table_twice_fails(db: Box<dyn DatabaseBackend>, schema: Schema) {
    let student = schema.table("Student").unwrap();
    create_table(db.as_ref(), student).unwrap();
    let err = create_table(db.as_ref(), student).unwrap_err();
    assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::DuplicateTable { .. })));
}

#[rstest]
fn referencing_table_needs_its_targets(db: Box<dyn DatabaseBackend>, schema: Schema) {
    let err = create_table(db.as_ref(), schema.table("TC").unwrap()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DbError>(),
        Some(DbError::MissingDependency { .. })
    ));
}

#[rstest]
#[case("SC", json!({"Sno": "S001", "Cno": "C001", "Grade": 75}), json!({"Sno": "S001", "Cno": "C404"}))]
#[case("TC", json!({"Tno": "T0001", "Cno": "C001"}), json!({"Tno": "T0404", "Cno": "C001"}))]
fn link_tables_enforce_keys(
    db: Box<dyn DatabaseBackend>,
    schema: Schema,
    #[case] table: &str,
    #[case] valid: serde_json::Value,
    #[case] dangling: serde_json::Value,
) {
    let db = db.as_ref();
    create_schema(db, &schema, false).unwrap();
    insert_row(db, &schema, "Student", &json!({"Sno": "S001", "Sname": "Alice"})).unwrap();
    insert_row(db, &schema, "Teacher", &json!({"Tno": "T0001", "Tname": "Wang"})).unwrap();
    insert_row(db, &schema, "Course", &json!({"Cno": "C001", "Cname": "DB"})).unwrap();

    insert_row(db, &schema, table, &valid).unwrap();

    let err = insert_row(db, &schema, table, &valid).unwrap_err();
    assert!(matches!(violation(err), ConstraintError::DuplicateKey { .. }));

    let err = insert_row(db, &schema, table, &dangling).unwrap_err();
    assert!(matches!(violation(err), ConstraintError::ForeignKey { .. }));
}

#[rstest]
#[case("Student", json!({"Sno": "S001", "Sname": null}), "Sname")]
#[case("Course", json!({"Cno": "C001"}), "Cname")]
#[case("Teacher", json!({"Tno": "T0001", "Tdept": "CS"}), "Tname")]
#[case("Student", json!({"Sname": "Nobody"}), "Sno")]
fn required_columns(db: Box<dyn DatabaseBackend>, schema: Schema, #[case] table: &str, #[case] row: serde_json::Value, #[case] column: &str) {
    create_schema(db.as_ref(), &schema, false).unwrap();
    let err = insert_row(db.as_ref(), &schema, table, &row).unwrap_err();
    assert_eq!(
        violation(err),
        ConstraintError::NotNull {
            table: table.to_string(),
            column: column.to_string(),
        }
    );
}

#[rstest]
fn course_predecessor_is_not_enforced(db: Box<dyn DatabaseBackend>, schema: Schema) {
    create_schema(db.as_ref(), &schema, false).unwrap();
    insert_row(db.as_ref(), &schema, "Course", &json!({"Cno": "C002", "Cname": "OS", "Cpno": "C999"})).unwrap();
    let rows = select_rows(db.as_ref(), &schema, "Course", None).unwrap();
    assert_eq!(rows.rows[0][2], json!("C999"));
}

#[rstest]
fn materialized_tables_read_back(schema: Schema) {
    let file = NamedTempFile::new().unwrap();
    {
        let db = open_db(file.path()).unwrap();
        create_schema(db.as_ref(), &schema, false).unwrap();
    }

    let db = open_db(file.path()).unwrap();
    let shapes = introspect(db.as_ref()).unwrap();
    let mut expected: Vec<TableShape> = schema.tables().iter().map(TableShape::from_table).collect();
    expected.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(shapes, expected);

    let stored = load_schema(db.as_ref()).unwrap();
    assert_eq!(stored.to_document(), schema.to_document());
    for table in schema.tables() {
        assert_eq!(stored.table(&table.name).unwrap().foreign_keys, table.foreign_keys);
    }

    let order: Vec<_> = schema.creation_order().iter().map(|t| t.name.clone()).collect();
    assert_eq!(recorded_tables(db.as_ref()).unwrap(), order);
}

#[rstest]
fn commands_share_one_store() {
    let ctx = Context::new(DatabaseConfig::CozoMem, None);
    let setup = SetupCmd {
        schema: None,
        dry_run: false,
        force: false,
        strict: true,
    };
    let output = setup.run(&ctx, OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["tables"].as_array().unwrap().len(), 5);

    let overview = ShowSchemaCmd { document: false }.execute(&ctx).unwrap();
    assert!(overview.tables.iter().all(|t| t.rows == 0));

    let preview = PreviewCmd {
        table: "Student".to_string(),
        limit: 5,
    }
    .execute(&ctx)
    .unwrap();
    assert!(preview.rows.is_empty());
}
