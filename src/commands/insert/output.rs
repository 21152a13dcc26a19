//! Output formatting for insert command results.

use super::execute::InsertResult;
use crate::output::Outputable;

impl Outputable for InsertResult {
    fn to_table(&self) -> String {
        format!("Inserted 1 row into {}: {}", self.table, self.row)
    }
}
