//! coursedb library - schema materialization for a university enrollment database
//!
//! Provides the schema document model and DDL compilers, the store backend,
//! row validation against declared keys, and the command execution and
//! output formatting behind the `coursedb` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod constraints;
pub mod db;
pub mod logging;
pub mod output;
pub mod queries;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod test_utils;
