//! Output formatting for show-table command results.

use super::execute::TableDetail;
use crate::output::{Outputable, render_grid};

fn flag(set: bool) -> String {
    if set { "yes".to_string() } else { String::new() }
}

impl Outputable for TableDetail {
    fn to_table(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.declared_type.clone(),
                    flag(c.not_null),
                    flag(c.primary_key),
                    c.references.join(", "),
                    c.description.clone(),
                ]
            })
            .collect();

        let mut lines = vec![format!("Table: {}", self.table), String::new()];
        lines.push(render_grid(&["Column", "Type", "Not null", "PK", "References", "Description"], &rows));

        if !self.referenced_by.is_empty() {
            lines.push(String::new());
            lines.push(format!("Referenced by: {}", self.referenced_by.join(", ")));
        }
        lines.join("\n")
    }
}
