//! CLI parsing tests for export command using the test DSL.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_option_test! {
        command: "export",
        variant: Export,
        test_name: test_with_out,
        args: ["--table", "SC", "--out", "sc.csv"],
        field: out,
        expected: PathBuf::from("sc.csv"),
    }

    crate::cli_required_arg_test! {
        command: "export",
        test_name: test_requires_table,
        required_arg: "--table",
    }

    crate::cli_error_test! {
        command: "export",
        test_name: test_requires_out,
        args: ["--table", "SC"],
    }
}
