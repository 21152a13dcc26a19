//! Row-level operations on materialized tables.

pub mod import;
pub mod integrity;
pub mod rows;

pub use import::{ImportError, ImportReport, ImportStatus, TableImport, import_data, import_file, import_json_str};
pub use integrity::{IntegrityReport, Violation, ViolationKind, check_integrity};
pub use rows::{InsertReport, RejectedRow, RowSet, StoreLookup, count_rows, insert_row, insert_rows, select_rows};
