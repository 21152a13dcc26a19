//! Test data shared by execute and integration tests.

/// Rows for all five university tables. Tables are listed out of dependency
/// order on purpose; import must sort them.
pub const SAMPLE_DATA: &str = include_str!("sample_data.json");
