mod execute;
mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::DdlResult;

/// Print SQL CREATE TABLE statements for a schema document
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb ddl                               # DDL for the bundled university schema
  coursedb ddl --schema schema.json          # DDL for another document
  coursedb ddl --if-not-exists               # CREATE TABLE IF NOT EXISTS ...
  coursedb ddl --drop                        # DROP TABLE statements, referencing tables first")]
pub struct DdlCmd {
    /// Schema document (defaults to the configured schema, then the bundled one)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Emit CREATE TABLE IF NOT EXISTS
    #[arg(long, default_value_t = false)]
    pub if_not_exists: bool,

    /// Emit DROP TABLE statements instead
    #[arg(long, default_value_t = false, conflicts_with = "if_not_exists")]
    pub drop: bool,
}

impl CommandRunner for DdlCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
