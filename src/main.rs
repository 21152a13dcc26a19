use clap::Parser;

use coursedb::cli::Args;
use coursedb::commands::{CommandRunner, Context};
use coursedb::config::ConfigFile;
use coursedb::db::DatabaseConfig;
use coursedb::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = ConfigFile::load_or_default(args.config.as_deref())?;
    logging::init(&config.logging, args.verbose);

    let database = DatabaseConfig::resolve(args.db.as_deref(), Some(&config))?;
    tracing::debug!(?database, "resolved store");
    let ctx = Context::new(database, config.schema.clone());

    let output = args.command.run(&ctx, args.format)?;
    println!("{}", output);
    Ok(())
}
