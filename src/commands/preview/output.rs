//! Output formatting for preview command results.

use super::execute::PreviewResult;
use crate::db::display_json;
use crate::output::{Outputable, render_grid};

impl Outputable for PreviewResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!(
            "{}: showing {} of {} row(s)",
            self.table,
            self.rows.len(),
            self.total_rows
        )];
        lines.push(String::new());

        if self.rows.is_empty() {
            lines.push("No rows.".to_string());
            return lines.join("\n");
        }

        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(display_json).collect())
            .collect();
        lines.push(render_grid(&self.columns, &rows));
        lines.join("\n")
    }
}
