//! Output formatting for import command results.

use crate::output::Outputable;
use crate::queries::{ImportReport, ImportStatus};

impl Outputable for ImportReport {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        if self.tables.is_empty() {
            return "Nothing to import.".to_string();
        }

        lines.push(format!(
            "Imported {} row(s), rejected {}",
            self.total_inserted(),
            self.total_rejected()
        ));
        lines.push(String::new());

        for table in &self.tables {
            match table.status {
                ImportStatus::Failed => {
                    lines.push(format!(
                        "  {}: failed ({})",
                        table.table,
                        table.error.as_deref().unwrap_or("unknown error")
                    ));
                }
                _ => {
                    lines.push(format!(
                        "  {}: {} inserted, {} rejected",
                        table.table,
                        table.inserted,
                        table.rejected.len()
                    ));
                    for rejected in &table.rejected {
                        lines.push(format!("    row {}: {}", rejected.index, rejected.reason));
                    }
                }
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{RejectedRow, TableImport};
    use rstest::{fixture, rstest};

    const REPORT_TABLE: &str = "\
Imported 2 row(s), rejected 1

  Student: 2 inserted, 1 rejected
    row 1: Column 'Student.Sname' must not be NULL
  Dept: failed (unknown table)";

    #[fixture]
    fn report() -> ImportReport {
        ImportReport {
            tables: vec![
                TableImport {
                    table: "Student".to_string(),
                    status: ImportStatus::Partial,
                    inserted: 2,
                    rejected: vec![RejectedRow {
                        index: 1,
                        reason: "Column 'Student.Sname' must not be NULL".to_string(),
                    }],
                    error: None,
                },
                TableImport {
                    table: "Dept".to_string(),
                    status: ImportStatus::Failed,
                    inserted: 0,
                    rejected: Vec::new(),
                    error: Some("unknown table".to_string()),
                },
            ],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: report,
        fixture_type: ImportReport,
        expected: REPORT_TABLE,
    }

    #[rstest]
    fn test_to_table_empty() {
        assert_eq!(ImportReport::default().to_table(), "Nothing to import.");
    }

    #[rstest]
    fn test_json_status(report: ImportReport) {
        use crate::output::OutputFormat;
        let parsed: serde_json::Value = serde_json::from_str(&report.format(OutputFormat::Json)).unwrap();
        assert_eq!(parsed["tables"][0]["status"], "partial");
        assert_eq!(parsed["tables"][1]["error"], "unknown table");
        assert!(parsed["tables"][0].get("error").is_none());
    }
}
