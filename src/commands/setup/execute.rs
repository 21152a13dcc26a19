use std::error::Error;

use serde::Serialize;

use super::SetupCmd;
use crate::commands::{Context, Execute};
use crate::db::schema::compilers::SqlCompiler;
use crate::db::schema::materialize::{create_schema, drop_all};

/// Status of a table after setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableState {
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "exists")]
    AlreadyExists,
    #[serde(rename = "would_create")]
    WouldCreate,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    pub name: String,
    pub status: TableState,
}

/// Result of the setup command execution
#[derive(Debug, Serialize)]
pub struct SetupResult {
    pub schema: String,
    pub tables: Vec<TableStatus>,
    /// Tables dropped first with `--force`.
    pub dropped: Vec<String>,
    pub dry_run: bool,
    /// SQL for each table, only filled in on a dry run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<String>,
}

impl SetupResult {
    pub fn created_new(&self) -> bool {
        self.tables.iter().any(|t| t.status == TableState::Created)
    }
}

impl Execute for SetupCmd {
    type Output = SetupResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let (source, schema) = ctx.schema_document(self.schema.as_deref())?;

        if self.dry_run {
            return Ok(SetupResult {
                schema: source,
                tables: schema
                    .creation_order()
                    .iter()
                    .map(|t| TableStatus {
                        name: t.name.clone(),
                        status: TableState::WouldCreate,
                    })
                    .collect(),
                dropped: Vec::new(),
                dry_run: true,
                statements: SqlCompiler::compile_schema(&schema, false),
            });
        }

        let db = ctx.db()?;
        let dropped = if self.force { drop_all(db)? } else { Vec::new() };

        let report = create_schema(db, &schema, !self.strict)?;
        let tables = schema
            .creation_order()
            .iter()
            .map(|t| TableStatus {
                name: t.name.clone(),
                status: if report.created.contains(&t.name) {
                    TableState::Created
                } else {
                    TableState::AlreadyExists
                },
            })
            .collect();

        Ok(SetupResult {
            schema: source,
            tables,
            dropped,
            dry_run: false,
            statements: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbError, open_db, open_mem_db};
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    #[fixture]
    fn db_file() -> NamedTempFile {
        NamedTempFile::new().expect("Failed to create temp db file")
    }

    fn setup_cmd() -> SetupCmd {
        SetupCmd {
            schema: None,
            dry_run: false,
            force: false,
            strict: false,
        }
    }

    #[rstest]
    fn test_setup_creates_all_tables(db_file: NamedTempFile) {
        let ctx = Context::with_backend(open_db(db_file.path()).expect("Failed to open db"));
        let result = setup_cmd().execute(&ctx).expect("Setup should succeed");

        let names: Vec<_> = result.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Student", "Course", "SC", "Teacher", "TC"]);
        assert!(result.tables.iter().all(|t| t.status == TableState::Created));
        assert!(result.created_new());
    }

    #[rstest]
    fn test_setup_idempotent(db_file: NamedTempFile) {
        let ctx = Context::with_backend(open_db(db_file.path()).expect("Failed to open db"));
        assert!(setup_cmd().execute(&ctx).unwrap().created_new());

        let second = setup_cmd().execute(&ctx).expect("Second setup should succeed");
        assert_eq!(second.tables.len(), 5);
        assert!(second.tables.iter().all(|t| t.status == TableState::AlreadyExists));
        assert!(!second.created_new());
    }

    #[rstest]
    fn test_setup_strict_fails_on_existing_table() {
        let ctx = Context::with_backend(open_mem_db().unwrap());
        setup_cmd().execute(&ctx).unwrap();

        let err = SetupCmd { strict: true, ..setup_cmd() }.execute(&ctx).unwrap_err();
        assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::DuplicateTable { .. })));
    }

    #[rstest]
    fn test_setup_force_recreates() {
        let ctx = Context::with_backend(open_mem_db().unwrap());
        setup_cmd().execute(&ctx).unwrap();

        let result = SetupCmd { force: true, ..setup_cmd() }.execute(&ctx).unwrap();
        assert_eq!(result.dropped.len(), 5);
        assert!(result.tables.iter().all(|t| t.status == TableState::Created));
    }

    #[rstest]
    fn test_setup_dry_run_touches_nothing() {
        let ctx = Context::with_backend(open_mem_db().unwrap());
        let result = SetupCmd { dry_run: true, ..setup_cmd() }.execute(&ctx).unwrap();

        assert!(result.dry_run);
        assert!(result.tables.iter().all(|t| t.status == TableState::WouldCreate));
        assert_eq!(result.statements.len(), 5);
        assert!(result.statements[0].starts_with("CREATE TABLE \"Student\""));
        assert!(ctx.db().unwrap().relation_names().unwrap().is_empty());
    }
}
