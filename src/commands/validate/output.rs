//! Output formatting for validate command results.

use super::execute::ValidateResult;
use crate::output::{Outputable, render_grid};

impl Outputable for ValidateResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Schema {} is valid ({} tables)", self.schema, self.tables.len()));
        lines.push(String::new());

        let rows: Vec<Vec<String>> = self
            .tables
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    t.columns.to_string(),
                    t.primary_key.join(", "),
                    t.not_null.join(", "),
                    t.foreign_keys.join("; "),
                ]
            })
            .collect();
        lines.push(render_grid(&["Table", "Columns", "Primary key", "Not null", "Foreign keys"], &rows));

        lines.push(String::new());
        lines.push(format!("Creation order: {}", self.creation_order.join(" -> ")));
        lines.join("\n")
    }
}
