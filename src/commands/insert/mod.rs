mod execute;
mod output;

use std::error::Error;

use clap::Args;
use serde_json::Value as JsonValue;

use crate::commands::{CommandRunner, Context, Execute};
use crate::output::{OutputFormat, Outputable};

pub use execute::InsertResult;

fn parse_row(s: &str) -> Result<JsonValue, String> {
    let value: JsonValue = serde_json::from_str(s).map_err(|e| format!("Invalid row JSON: {}", e))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("Row must be a JSON object".to_string())
    }
}

/// Insert one row, enforcing declared constraints
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  coursedb insert -t Student -r '{\"Sno\": \"S001\", \"Sname\": \"Alice\"}'
  coursedb insert -t SC -r '{\"Sno\": \"S001\", \"Cno\": \"C001\", \"Grade\": 90}'")]
pub struct InsertCmd {
    /// Target table
    #[arg(short, long)]
    pub table: String,

    /// Row as a JSON object; missing columns are NULL
    #[arg(short, long, value_parser = parse_row)]
    pub row: JsonValue,
}

impl CommandRunner for InsertCmd {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        let result = self.execute(ctx)?;
        Ok(result.format(format))
    }
}
