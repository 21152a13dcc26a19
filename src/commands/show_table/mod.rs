mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::{ColumnDetail, TableDetail};

/// Columns, keys and references of one stored table
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb show-table Student                # Column types, NOT NULL, keys and descriptions
  coursedb show-table SC -o json             # Same as JSON")]
pub struct ShowTableCmd {
    /// Table name
    pub table: String,
}

impl CommandRunner for ShowTableCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
