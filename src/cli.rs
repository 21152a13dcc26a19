//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared types.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Store location: a file path, sqlite://path or :memory:
    #[arg(short, long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Config file (defaults to ./.coursedb.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_global_defaults() {
        let args = Args::try_parse_from(["coursedb", "reset"]).unwrap();
        assert_eq!(args.db, None);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.config, None);
        assert_eq!(args.verbose, 0);
    }

    #[rstest]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["coursedb", "reset", "--db", ":memory:", "-o", "json", "-vv"]).unwrap();
        assert_eq!(args.db.as_deref(), Some(":memory:"));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.verbose, 2);
    }

    #[rstest]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["coursedb", "-o", "xml", "reset"]).is_err());
    }

    #[rstest]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["coursedb"]).is_err());
    }
}
