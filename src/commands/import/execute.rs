use std::error::Error;

use super::ImportCmd;
use crate::commands::{Context, Execute};
use crate::queries::{ImportReport, import_file};

impl Execute for ImportCmd {
    type Output = ImportReport;

    fn execute(self, ctx: &Context) -> Result<Self::Output, Box<dyn Error>> {
        let schema = ctx.stored_schema()?;
        import_file(ctx.db()?, &schema, &self.file)
    }
}
