//! Configuration file handling.
//!
//! Loads `.coursedb.json` from the current directory (or the path given with
//! `--config`). Every section is optional:
//!
//! ```json
//! {
//!     "database": { "type": "sqlite", "path": "./coursedb.sqlite" },
//!     "schema": "./schema.json",
//!     "logging": { "level": "info", "format": "json" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseConfig;

/// Config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".coursedb.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: String, message: String },
}

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database location. Falls back to the environment when absent.
    #[serde(default)]
    pub database: Option<DatabaseConfigFile>,

    /// Default schema document for `setup`, `ddl` and `validate`.
    #[serde(default)]
    pub schema: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration variants.
///
/// JSON format uses a "type" field with lowercase variant names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// SQLite-backed store at a file path
    Sqlite { path: PathBuf },
    /// In-memory store, discarded on exit
    Memory,
}

impl DatabaseConfigFile {
    pub fn to_database_config(&self) -> DatabaseConfig {
        match self {
            Self::Sqlite { path } => DatabaseConfig::CozoSqlite { path: path.clone() },
            Self::Memory => DatabaseConfig::CozoMem,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `coursedb=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::NotFound { path: display });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: display.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
            path: display,
            message: e.to_string(),
        })
    }

    /// Load the explicit config file if given, otherwise `.coursedb.json` when
    /// present, otherwise defaults. A missing explicit file is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(CONFIG_FILE_NAME);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
