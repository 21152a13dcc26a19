//! Output formatting for export command results.

use super::execute::{ExportFormat, ExportResult};
use crate::output::Outputable;

impl Outputable for ExportResult {
    fn to_table(&self) -> String {
        let format = match self.format {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        };
        format!("Exported {} row(s) from {} to {} ({})", self.rows, self.table, self.path, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn export_result() -> ExportResult {
        ExportResult {
            table: "SC".to_string(),
            path: "sc.csv".to_string(),
            format: ExportFormat::Csv,
            rows: 4,
        }
    }

    crate::output_table_test! {
        test_name: test_to_table,
        fixture: export_result,
        fixture_type: ExportResult,
        expected: "Exported 4 row(s) from SC to sc.csv (CSV)",
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: export_result,
        fixture_type: ExportResult,
        assertions: {
            "format": "csv",
            "rows": 4,
        },
    }
}
