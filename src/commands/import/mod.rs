mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("File not found: {}", path.display()))
    }
}

/// Import rows for several tables from a JSON data file
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb import -f data.json               # {\"Student\": [...], \"SC\": [...]}
  coursedb import -f data.json -o json       # Per-table report as JSON

Tables are loaded in dependency order whatever order the file lists them.
Rows that break a constraint are skipped and reported.")]
pub struct ImportCmd {
    /// Path to the JSON data file
    #[arg(short, long, value_parser = validate_file_exists)]
    pub file: PathBuf,
}

impl CommandRunner for ImportCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
