//! Database schema compilers.
//!
//! Generates target-specific statements from validated table definitions:
//! portable SQL `CREATE TABLE` text for people and other engines, and Cozo
//! scripts for the embedded store.

pub mod cozo;
pub mod sql;

pub use cozo::CozoCompiler;
pub use sql::SqlCompiler;
