mod cli_tests;
mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::{SetupResult, TableState, TableStatus};

/// Create the schema's tables in the store
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb setup                             # Create the bundled university tables
  coursedb setup --schema schema.json        # Create tables from a schema document
  coursedb setup --dry-run                   # Print the DDL without creating anything
  coursedb setup --force                     # Drop every table and recreate
  coursedb setup --strict                    # Fail if any table already exists")]
pub struct SetupCmd {
    /// Schema document (defaults to the configured schema, then the bundled one)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Show what would be created without doing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Drop existing tables and recreate
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Fail instead of skipping tables that already exist
    #[arg(long, default_value_t = false, conflicts_with = "force")]
    pub strict: bool,
}

impl CommandRunner for SetupCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
