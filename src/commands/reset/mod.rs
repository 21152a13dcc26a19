mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::ResetResult;

/// Drop every table in the store
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb reset                             # Drop all tables, referencing tables first
  coursedb reset --table SC                  # Drop one table")]
pub struct ResetCmd {
    /// Drop only this table (refused while other tables reference it)
    #[arg(short, long)]
    pub table: Option<String>,
}

impl CommandRunner for ResetCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
