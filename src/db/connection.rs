//! Database connection management.

use std::error::Error;
use std::path::Path;

use super::backend::{CozoBackend, DatabaseBackend};

/// Open a CozoDB database backed by SQLite storage.
pub fn open_db(path: &Path) -> Result<Box<dyn DatabaseBackend>, Box<dyn Error>> {
    tracing::debug!(path = %path.display(), "opening sqlite store");
    Ok(Box::new(CozoBackend::sqlite(path)?))
}

/// Create an in-memory database instance.
///
/// Used for tests and dry runs to avoid disk I/O.
pub fn open_mem_db() -> Result<Box<dyn DatabaseBackend>, Box<dyn Error>> {
    Ok(Box::new(CozoBackend::memory()?))
}
