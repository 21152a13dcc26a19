use std::error::Error;

use serde::Serialize;
use serde_json::Value as JsonValue;

use super::PreviewCmd;
use crate::commands::{Context, Execute};
use crate::queries::{count_rows, select_rows};

/// Result of the preview command execution
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub table: String,
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
}

impl Execute for PreviewCmd {
    type Output = PreviewResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let db = ctx.db()?;
        let schema = ctx.stored_schema()?;
        let rows = select_rows(db, &schema, &self.table, Some(self.limit as usize))?;
        Ok(PreviewResult {
            total_rows: count_rows(db, &schema, &self.table)?,
            table: rows.table,
            columns: rows.columns,
            rows: rows.rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::fixtures;
    use rstest::{fixture, rstest};
    use serde_json::json;

    crate::execute_test_fixture! {
        fixture_name: populated_ctx,
        json: fixtures::SAMPLE_DATA,
    }

    crate::execute_empty_db_test! {
        cmd_type: PreviewCmd,
        cmd: PreviewCmd {
            table: "Student".to_string(),
            limit: 5,
        },
    }

    #[rstest]
    fn test_preview_limits_rows(populated_ctx: Context) {
        let ctx = populated_ctx;
        let result = PreviewCmd {
            table: "SC".to_string(),
            limit: 2,
        }
        .execute(&ctx)
        .unwrap();

        assert_eq!(result.total_rows, 4);
        assert_eq!(result.columns, vec!["Sno", "Cno", "Grade"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0], vec![json!("S001"), json!("C001"), json!(90)]);
    }

    #[rstest]
    fn test_preview_keeps_nulls(populated_ctx: Context) {
        let ctx = populated_ctx;
        let result = PreviewCmd {
            table: "Course".to_string(),
            limit: 5,
        }
        .execute(&ctx)
        .unwrap();
        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.rows[0][2], JsonValue::Null);
        assert_eq!(result.rows[1][2], json!("C001"));
    }

    #[rstest]
    fn test_preview_unknown_table(populated_ctx: Context) {
        let ctx = populated_ctx;
        let err = PreviewCmd {
            table: "Dept".to_string(),
            limit: 5,
        }
        .execute(&ctx)
        .unwrap_err();
        assert!(matches!(err.downcast_ref::<DbError>(), Some(DbError::UnknownTable { .. })));
    }
}
