//! Output formatting for ddl command results.

use super::execute::DdlResult;
use crate::output::Outputable;

impl Outputable for DdlResult {
    fn to_table(&self) -> String {
        self.statements.join("\n\n")
    }
}
