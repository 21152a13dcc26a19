//! Output formatting for check command results.

use crate::output::{Outputable, render_grid};
use crate::queries::IntegrityReport;

impl Outputable for IntegrityReport {
    fn to_table(&self) -> String {
        let mut lines = vec![format!(
            "Checked {} row(s) in {} table(s)",
            self.rows_checked, self.tables_checked
        )];
        lines.push(String::new());

        if self.is_clean() {
            lines.push("No violations found.".to_string());
            return lines.join("\n");
        }

        lines.push(format!("Violations ({}):", self.violations.len()));
        let rows: Vec<Vec<String>> = self
            .violations
            .iter()
            .map(|v| vec![v.table.clone(), v.key.clone(), v.kind.label().to_string(), v.detail.clone()])
            .collect();
        lines.push(render_grid(&["Table", "Key", "Rule", "Detail"], &rows));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{Violation, ViolationKind};
    use rstest::{fixture, rstest};

    const VIOLATIONS_TABLE: &str = "\
Checked 4 row(s) in 2 table(s)

Violations (1):
Table  Key               Rule         Detail
-----  ----------------  -----------  ----------------------------------------------------------
SC     ('S404', 'C001')  FOREIGN KEY  (Sno) REFERENCES Student(Sno) has no row matching ('S404')";

    #[fixture]
    fn clean_report() -> IntegrityReport {
        IntegrityReport {
            tables_checked: 5,
            rows_checked: 15,
            violations: Vec::new(),
        }
    }

    #[fixture]
    fn dirty_report() -> IntegrityReport {
        IntegrityReport {
            tables_checked: 2,
            rows_checked: 4,
            violations: vec![Violation {
                table: "SC".to_string(),
                key: "('S404', 'C001')".to_string(),
                kind: ViolationKind::ForeignKey,
                detail: "(Sno) REFERENCES Student(Sno) has no row matching ('S404')".to_string(),
            }],
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_clean,
        fixture: clean_report,
        fixture_type: IntegrityReport,
        expected: "Checked 15 row(s) in 5 table(s)\n\nNo violations found.",
    }

    crate::output_table_test! {
        test_name: test_to_table_violations,
        fixture: dirty_report,
        fixture_type: IntegrityReport,
        expected: VIOLATIONS_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: dirty_report,
        fixture_type: IntegrityReport,
        assertions: {
            "rows_checked": 4,
        },
    }
}
