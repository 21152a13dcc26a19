//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Filter directive for the configured level raised by `-v` flags.
pub fn effective_level(config: &LoggingConfig, verbose: u8) -> String {
    match verbose {
        0 => config.level.clone(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let level = effective_level(config, verbose);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    // A subscriber may already be installed (tests); ignore that.
    let _ = match config.format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
}
