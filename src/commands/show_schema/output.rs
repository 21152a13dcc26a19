//! Output formatting for show-schema command results.

use super::execute::SchemaOverview;
use crate::output::{Outputable, render_grid};

impl Outputable for SchemaOverview {
    fn to_table(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .tables
            .iter()
            .map(|t| {
                vec![
                    t.name.clone(),
                    t.columns.len().to_string(),
                    t.primary_key.join(", "),
                    t.references.join(", "),
                    t.rows.to_string(),
                ]
            })
            .collect();

        let mut output = format!("Tables ({}):\n\n", self.tables.len());
        output.push_str(&render_grid(&["Table", "Columns", "Primary key", "References", "Rows"], &rows));

        if let Some(document) = &self.document {
            if let Ok(json) = document.to_json_string() {
                output.push_str("\n\n");
                output.push_str(&json);
            }
        }
        output
    }
}
