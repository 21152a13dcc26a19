//! CLI parsing tests for setup command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_defaults_test! {
        command: "setup",
        variant: Setup,
        required_args: [],
        defaults: {
            schema: None,
            dry_run: false,
            force: false,
            strict: false,
        },
    }

    crate::cli_option_test! {
        command: "setup",
        variant: Setup,
        test_name: test_with_schema,
        args: ["--schema", "other.json"],
        field: schema,
        expected: Some(PathBuf::from("other.json")),
    }

    crate::cli_option_test! {
        command: "setup",
        variant: Setup,
        test_name: test_dry_run,
        args: ["--dry-run"],
        field: dry_run,
        expected: true,
    }

    crate::cli_error_test! {
        command: "setup",
        test_name: test_force_conflicts_with_strict,
        args: ["--force", "--strict"],
    }
}
