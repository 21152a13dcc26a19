use std::error::Error;

use super::CheckCmd;
use crate::commands::{Context, Execute};
use crate::queries::{IntegrityReport, check_integrity};

impl Execute for CheckCmd {
    type Output = IntegrityReport;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let schema = ctx.stored_schema()?;
        let report = check_integrity(ctx.db()?, &schema)?;
        if self.strict && !report.is_clean() {
            return Err(format!("Integrity check found {} violation(s)", report.violations.len()).into());
        }
        Ok(report)
    }
}
