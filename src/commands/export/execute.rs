use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use super::ExportCmd;
use crate::commands::{Context, Execute};
use crate::db::display_json;
use crate::db::escape::{csv_field, csv_record};
use crate::queries::{RowSet, select_rows};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot tell export format from '{path}': use a .csv or .json extension")]
    UnsupportedFormat { path: String },

    #[error("Failed to write '{path}': {message}")]
    WriteFailed { path: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Result of the export command execution
#[derive(Debug, Serialize)]
pub struct ExportResult {
    pub table: String,
    pub path: String,
    pub format: ExportFormat,
    pub rows: usize,
}

/// CSV text: a header line with the column names, then one record per row.
/// NULL is written as an empty field.
pub fn render_csv(rows: &RowSet) -> String {
    let mut out = csv_record(rows.columns.iter().map(String::as_str));
    out.push('\n');
    for row in &rows.rows {
        let fields: Vec<String> = row
            .iter()
            .map(|v| if v.is_null() { String::new() } else { csv_field(&display_json(v)) })
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

impl Execute for ExportCmd {
    type Output = ExportResult;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let format = ExportFormat::from_path(&self.out)?;
        let schema = ctx.stored_schema()?;
        let rows = select_rows(ctx.db()?, &schema, &self.table, None)?;

        let content = match format {
            ExportFormat::Csv => render_csv(&rows),
            ExportFormat::Json => serde_json::to_string_pretty(&rows.to_objects())?,
        };
        fs::write(&self.out, content).map_err(|e| ExportError::WriteFailed {
            path: self.out.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(table = %rows.table, path = %self.out.display(), rows = rows.rows.len(), "exported table");
        Ok(ExportResult {
            table: rows.table,
            path: self.out.display().to_string(),
            format,
            rows: rows.rows.len(),
        })
    }
}
