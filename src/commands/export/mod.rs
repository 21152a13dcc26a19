mod cli_tests;
mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::{ExportError, ExportFormat, ExportResult};

/// Write a table's rows to a CSV or JSON file
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb export -t Student --out students.csv   # Header row plus one line per student
  coursedb export -t SC --out sc.json             # Array of row objects

The file format follows the extension: .csv or .json.
In CSV output NULL is an empty field and an empty string is written as \"\".")]
pub struct ExportCmd {
    /// Table to export
    #[arg(short, long)]
    pub table: String,

    /// Destination file (.csv or .json)
    #[arg(long)]
    pub out: PathBuf,
}

impl CommandRunner for ExportCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
