//! Quoting helpers for generated SQL and exported CSV.

/// Quote an identifier for SQL output, doubling embedded double quotes.
pub fn quote_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 2);
    result.push('"');
    for c in name.chars() {
        if c == '"' {
            result.push('"');
        }
        result.push(c);
    }
    result.push('"');
    result
}

/// Format a single CSV field, quoting it when it is empty or contains a
/// delimiter, a quote or a line break. A bare empty field is left for NULL.
pub fn csv_field(value: &str) -> String {
    if value.is_empty() || value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Join already-unescaped fields into one CSV record (no trailing newline).
pub fn csv_record<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields.into_iter().map(csv_field).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Student", "\"Student\"")]
    #[case(r#"we"ird"#, r#""we""ird""#)]
    fn test_quote_identifier(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(quote_identifier(input), expected);
    }

    #[rstest]
    #[case("Alice", "Alice")]
    #[case("", "\"\"")]
    #[case("a,b", "\"a,b\"")]
    #[case(r#"say "hi""#, r#""say ""hi""""#)]
    #[case("two\nlines", "\"two\nlines\"")]
    fn test_csv_field(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(csv_field(input), expected);
    }

    #[rstest]
    fn test_csv_record() {
        assert_eq!(csv_record(["S001", "Alice, B.", ""]), "S001,\"Alice, B.\",\"\"");
    }
}
