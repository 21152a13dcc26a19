mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

/// Scan stored rows for constraint violations
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb check                             # Report NOT NULL, UNIQUE and foreign key problems
  coursedb check --strict                    # Exit with an error when anything is found")]
pub struct CheckCmd {
    /// Fail when violations are found
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl CommandRunner for CheckCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
