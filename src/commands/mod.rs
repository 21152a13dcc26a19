//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl producing a typed, serializable result
//! - An `Outputable` impl rendering that result as a table

pub mod check;
pub mod ddl;
pub mod export;
pub mod import;
pub mod insert;
pub mod preview;
pub mod reset;
pub mod setup;
pub mod show_schema;
pub mod show_table;
pub mod validate;

pub use check::CheckCmd;
pub use ddl::DdlCmd;
pub use export::ExportCmd;
pub use import::ImportCmd;
pub use insert::InsertCmd;
pub use preview::PreviewCmd;
pub use reset::ResetCmd;
pub use setup::SetupCmd;
pub use show_schema::ShowSchemaCmd;
pub use show_table::ShowTableCmd;
pub use validate::ValidateCmd;

use std::cell::OnceCell;
use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use enum_dispatch::enum_dispatch;

use crate::db::DatabaseBackend;
use crate::db::DatabaseConfig;
use crate::db::schema::materialize::load_schema;
use crate::db::schema::{Schema, SchemaDocument, university_schema};
use crate::output::{OutputFormat, Outputable};

/// Label used for the schema compiled into the binary.
pub const BUNDLED_SCHEMA: &str = "bundled university schema";

/// What a command runs against: the store, opened on first use, and the
/// default schema document location.
pub struct Context {
    database: DatabaseConfig,
    default_schema: Option<PathBuf>,
    db: OnceCell<Box<dyn DatabaseBackend>>,
}

impl Context {
    pub fn new(database: DatabaseConfig, default_schema: Option<PathBuf>) -> Self {
        Self {
            database,
            default_schema,
            db: OnceCell::new(),
        }
    }

    /// Context over an already opened store.
    pub fn with_backend(db: Box<dyn DatabaseBackend>) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(db);
        Self {
            database: DatabaseConfig::CozoMem,
            default_schema: None,
            db: cell,
        }
    }

    pub fn with_default_schema(mut self, path: Option<PathBuf>) -> Self {
        self.default_schema = path;
        self
    }

    /// The store, connecting on first call.
    pub fn db(&self) -> Result<&dyn DatabaseBackend, Box<dyn Error>> {
        if let Some(db) = self.db.get() {
            return Ok(db.as_ref());
        }
        let db = self.database.connect()?;
        Ok(self.db.get_or_init(|| db).as_ref())
    }

    /// Load a schema document: the explicit path, else the configured
    /// default, else the bundled university schema. Returns the source label
    /// with the validated schema.
    pub fn schema_document(&self, explicit: Option<&Path>) -> Result<(String, Schema), Box<dyn Error>> {
        match explicit.or(self.default_schema.as_deref()) {
            Some(path) => {
                let doc = SchemaDocument::from_path(path)?;
                Ok((path.display().to_string(), Schema::from_document(&doc)?))
            }
            None => Ok((BUNDLED_SCHEMA.to_string(), university_schema()?)),
        }
    }

    /// The schema installed in the store.
    pub fn stored_schema(&self) -> Result<Schema, Box<dyn Error>> {
        load_schema(self.db()?)
    }
}

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>>;
}

/// Runs a parsed command and renders its result.
#[enum_dispatch]
pub trait CommandRunner {
    fn run(self, ctx: &Context, format: OutputFormat) -> Result<String, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
#[enum_dispatch(CommandRunner)]
pub enum Command {
    /// Create the schema's tables in the store
    Setup(SetupCmd),

    /// Print SQL CREATE TABLE statements for a schema document
    Ddl(DdlCmd),

    /// Validate a schema document without touching the store
    Validate(ValidateCmd),

    /// Drop every table in the store
    Reset(ResetCmd),

    /// Overview of the tables installed in the store
    ShowSchema(ShowSchemaCmd),

    /// Columns, keys and references of one stored table
    ShowTable(ShowTableCmd),

    /// Insert one row, enforcing declared constraints
    Insert(InsertCmd),

    /// Import rows for several tables from a JSON data file
    Import(ImportCmd),

    /// Show the first rows of a table
    Preview(PreviewCmd),

    /// Write a table's rows to a CSV or JSON file
    Export(ExportCmd),

    /// Scan stored rows for constraint violations
    Check(CheckCmd),
}
