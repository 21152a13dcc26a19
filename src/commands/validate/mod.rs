mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::{TableSummary, ValidateResult};

/// Validate a schema document without touching the store
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb validate                          # Check the bundled university schema
  coursedb validate --schema schema.json     # Check another document")]
pub struct ValidateCmd {
    /// Schema document (defaults to the configured schema, then the bundled one)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,
}

impl CommandRunner for ValidateCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
