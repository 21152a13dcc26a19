//! Database configuration for runtime backend selection.
//!
//! The store location comes from, in priority order: the `--db` flag, the
//! `.coursedb.json` config file, the `DATABASE_URL` / `COURSEDB_PATH`
//! environment variables, and finally `./coursedb.sqlite`.

use std::error::Error;
use std::path::PathBuf;

use super::backend::DatabaseBackend;
use super::connection::{open_db, open_mem_db};
use crate::config::ConfigFile;

/// Default store location when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "./coursedb.sqlite";

/// Configuration for database backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// Local CozoDB with SQLite storage (default).
    CozoSqlite { path: PathBuf },

    /// Local CozoDB with in-memory storage.
    CozoMem,
}

impl DatabaseConfig {
    /// Create a backend instance from this configuration.
    pub fn connect(&self) -> Result<Box<dyn DatabaseBackend>, Box<dyn Error>> {
        match self {
            Self::CozoSqlite { path } => open_db(path),
            Self::CozoMem => open_mem_db(),
        }
    }

    /// Parse from a connection URL or file path.
    ///
    /// Supported formats:
    /// - `./path/to/db.sqlite` or `/absolute/path` → CozoSqlite
    /// - `sqlite:///path/to/db` → CozoSqlite
    /// - `:memory:` → CozoMem
    pub fn from_url(url: &str) -> Result<Self, Box<dyn Error>> {
        if url.trim().is_empty() {
            return Err("Database location must not be empty".into());
        }

        if url == ":memory:" {
            return Ok(Self::CozoMem);
        }

        if let Some(path) = url.strip_prefix("sqlite://") {
            return Ok(Self::CozoSqlite {
                path: PathBuf::from(path),
            });
        }

        if let Some((scheme, _)) = url.split_once("://") {
            return Err(format!("Unsupported database scheme '{}'", scheme).into());
        }

        Ok(Self::CozoSqlite {
            path: PathBuf::from(url),
        })
    }

    /// Load from environment variables.
    ///
    /// Checks `DATABASE_URL` first, then `COURSEDB_PATH`.
    pub fn from_env() -> Result<Option<Self>, Box<dyn Error>> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return Ok(Some(Self::from_url(&url)?));
        }

        if let Ok(path) = std::env::var("COURSEDB_PATH") {
            return Ok(Some(Self::CozoSqlite {
                path: PathBuf::from(path),
            }));
        }

        Ok(None)
    }

    /// Resolve configuration from an explicit location, the config file and
    /// the environment.
    pub fn resolve(explicit: Option<&str>, config: Option<&ConfigFile>) -> Result<Self, Box<dyn Error>> {
        if let Some(url) = explicit {
            return Self::from_url(url);
        }

        if let Some(database) = config.and_then(|c| c.database.as_ref()) {
            return Ok(database.to_database_config());
        }

        if let Some(config) = Self::from_env()? {
            return Ok(config);
        }

        Self::from_url(DEFAULT_DB_PATH)
    }
}
