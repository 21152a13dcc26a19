//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

/// Render rows as an aligned text grid with a header rule.
///
/// Widths are counted in characters. Trailing padding on the last column is
/// trimmed.
pub fn render_grid<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers.iter().map(|h| h.as_ref()).collect()));
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    for row in rows {
        lines.push(line(row.iter().map(|c| c.as_str()).collect()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_render_grid_aligns_columns() {
        let rows = vec![
            vec!["S001".to_string(), "Alice".to_string()],
            vec!["S002".to_string(), "Bo".to_string()],
        ];
        let expected = "\
Sno   Sname
----  -----
S001  Alice
S002  Bo";
        assert_eq!(render_grid(&["Sno", "Sname"], &rows), expected);
    }

    #[rstest]
    fn test_render_grid_empty_rows() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(render_grid(&["Tno"], &rows), "Tno\n---");
    }
}
