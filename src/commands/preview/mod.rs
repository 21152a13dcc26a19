mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::PreviewResult;

/// Show the first rows of a table
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb preview Student                   # First 5 students, ordered by key
  coursedb preview SC -l 50                  # First 50 enrollments")]
pub struct PreviewCmd {
    /// Table name
    pub table: String,

    /// Maximum number of rows to show (1-1000)
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub limit: u32,
}

impl CommandRunner for PreviewCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
