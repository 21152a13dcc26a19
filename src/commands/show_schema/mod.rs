mod execute;
mod output;

use std::error::Error;

use clap::Args;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::{SchemaOverview, TableOverview};

/// Overview of the tables installed in the store
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb show-schema                       # Tables, keys and row counts
  coursedb show-schema --document            # Print the stored schema document as JSON")]
pub struct ShowSchemaCmd {
    /// Include the stored schema document in the result
    #[arg(long, default_value_t = false)]
    pub document: bool,
}

impl CommandRunner for ShowSchemaCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
