//! Output formatting for reset command results.

use super::execute::ResetResult;
use crate::output::Outputable;

impl Outputable for ResetResult {
    fn to_table(&self) -> String {
        if self.dropped.is_empty() {
            return "No tables to drop.".to_string();
        }
        let mut lines = vec![format!("Dropped {} table(s):", self.dropped.len())];
        lines.extend(self.dropped.iter().map(|t| format!("  {}", t)));
        lines.join("\n")
    }
}
