//! Output formatting for setup command results.

use super::execute::{SetupResult, TableState};
use crate::output::Outputable;

impl Outputable for SetupResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        if self.dry_run {
            lines.push(format!("Dry run: tables from {} would be created", self.schema));
            lines.push(String::new());
            lines.push(self.statements.join("\n\n"));
            return lines.join("\n");
        }

        lines.push(format!("Setup from {}", self.schema));
        if !self.dropped.is_empty() {
            lines.push(format!("Dropped: {}", self.dropped.join(", ")));
        }
        lines.push(String::new());

        for table in &self.tables {
            let status = match table.status {
                TableState::Created => "created",
                TableState::AlreadyExists => "exists",
                TableState::WouldCreate => "would create",
            };
            lines.push(format!("  {} ({})", table.name, status));
        }

        lines.push(String::new());
        if self.created_new() {
            lines.push("Schema ready.".to_string());
        } else {
            lines.push("Schema already up to date.".to_string());
        }
        lines.join("\n")
    }
}
