//! Database backend trait and the CozoDB implementation.
//!
//! Everything above this layer talks to a `&dyn DatabaseBackend`, so tests can
//! swap the SQLite-backed store for an in-memory one.

use std::error::Error;
use std::path::Path;

use cozo::{DataValue, DbInstance, ScriptMutability};

use super::value::DatabaseValue;
use super::DbError;

/// Type alias for query parameters.
pub type Params = std::collections::BTreeMap<String, DataValue>;

/// Result of a query execution.
///
/// Generic over value type so result processing does not depend on Cozo's
/// own value enum.
#[derive(Debug, Clone)]
pub struct QueryResult<V: DatabaseValue = DataValue> {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<V>>,
}

impl<V: DatabaseValue> QueryResult<V> {
    /// Position of a named column in the result.
    pub fn column_index(&self, name: &str) -> Result<usize, DbError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DbError::MissingColumn {
                name: name.to_string(),
            })
    }
}

/// A column of a stored relation as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationColumn {
    pub name: String,
    pub is_key: bool,
    pub column_type: String,
}

/// Trait for database backends that can execute queries.
pub trait DatabaseBackend: Send + Sync {
    /// Execute a query with parameters, returning raw rows.
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, Box<dyn Error>>;

    /// Execute a query without parameters.
    fn execute_query_no_params(&self, script: &str) -> Result<QueryResult, Box<dyn Error>> {
        self.execute_query(script, &Params::new())
    }

    /// Get the backend name for logging/debugging.
    fn backend_name(&self) -> &'static str;

    /// Names of every stored relation.
    fn relation_names(&self) -> Result<Vec<String>, Box<dyn Error>>;

    /// Check if a relation (table) exists.
    fn relation_exists(&self, name: &str) -> Result<bool, Box<dyn Error>> {
        Ok(self.relation_names()?.iter().any(|n| n == name))
    }

    /// Columns of a stored relation in engine order (keys first).
    fn relation_columns(&self, name: &str) -> Result<Vec<RelationColumn>, Box<dyn Error>>;

    /// Run a `:create` script.
    /// Returns true if created, false if the relation already existed.
    fn create_relation(&self, script: &str) -> Result<bool, Box<dyn Error>>;

    /// Drop a stored relation.
    fn remove_relation(&self, name: &str) -> Result<(), Box<dyn Error>>;
}

/// CozoDB with SQLite storage or in memory.
pub struct CozoBackend {
    db: DbInstance,
    name: &'static str,
}

impl CozoBackend {
    /// Open a CozoDB database backed by SQLite storage.
    pub fn sqlite(path: &Path) -> Result<Self, DbError> {
        let db = DbInstance::new("sqlite", path, "").map_err(|e| DbError::OpenFailed {
            path: path.display().to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Self {
            db,
            name: "CozoSqlite",
        })
    }

    /// Create an in-memory database.
    pub fn memory() -> Result<Self, DbError> {
        let db = DbInstance::new("mem", "", "").map_err(|e| DbError::OpenFailed {
            path: ":memory:".to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Self { db, name: "CozoMem" })
    }
}

impl DatabaseBackend for CozoBackend {
    fn execute_query(&self, script: &str, params: &Params) -> Result<QueryResult, Box<dyn Error>> {
        tracing::debug!(backend = self.name, script, "running query");
        let rows = self
            .db
            .run_script(script, params.clone(), ScriptMutability::Mutable)
            .map_err(|e| DbError::QueryFailed {
                message: format!("{:?}", e),
            })?;
        Ok(QueryResult {
            headers: rows.headers,
            rows: rows.rows,
        })
    }

    fn backend_name(&self) -> &'static str {
        self.name
    }

    fn relation_names(&self) -> Result<Vec<String>, Box<dyn Error>> {
        let result = self.execute_query_no_params("::relations")?;
        let idx = result.column_index("name")?;
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.get(idx).and_then(|v| v.as_string()))
            .collect())
    }

    fn relation_columns(&self, name: &str) -> Result<Vec<RelationColumn>, Box<dyn Error>> {
        if !self.relation_exists(name)? {
            return Err(DbError::UnknownTable {
                table: name.to_string(),
            }
            .into());
        }
        let result = self.execute_query_no_params(&format!("::columns {}", name))?;
        let name_idx = result.column_index("column")?;
        let key_idx = result.column_index("is_key")?;
        let type_idx = result.column_index("type")?;

        Ok(result
            .rows
            .iter()
            .map(|row| RelationColumn {
                name: row.get(name_idx).and_then(|v| v.as_string()).unwrap_or_default(),
                is_key: row.get(key_idx).and_then(|v| v.as_bool()).unwrap_or(false),
                column_type: row.get(type_idx).and_then(|v| v.as_string()).unwrap_or_default(),
            })
            .collect())
    }

    fn create_relation(&self, script: &str) -> Result<bool, Box<dyn Error>> {
        match self.execute_query_no_params(script) {
            Ok(_) => Ok(true),
            Err(e) => {
                let err_str = e.to_string();
                if err_str.contains("AlreadyExists") || err_str.contains("stored_relation_conflict") {
                    Ok(false)
                } else {
                    Err(e)
                }
            }
        }
    }

    fn remove_relation(&self, name: &str) -> Result<(), Box<dyn Error>> {
        self.execute_query_no_params(&format!("::remove {}", name))?;
        Ok(())
    }
}
