//! Cozo Datalog script compiler.
//!
//! Generates the scripts the store runs for a table: `:create` DDL with the
//! primary key as the relation key, `:insert` from a `$rows` parameter, key
//! lookups used by constraint checks, and ordered selects.

use crate::db::schema::definition::TableDef;

/// Compiler for generating Cozo scripts from table definitions.
pub struct CozoCompiler;

fn names<'a>(columns: impl Iterator<Item = &'a str>) -> String {
    columns.collect::<Vec<_>>().join(", ")
}

impl CozoCompiler {
    /// Generate Cozo DDL for a single table.
    ///
    /// Produces output in the format:
    /// ```cozo
    /// :create SC {
    ///     Sno: String,
    ///     Cno: String
    ///     =>
    ///     Grade: Int?
    /// }
    /// ```
    ///
    /// Nullable columns get the `?` suffix. Key columns never do.
    pub fn compile_relation(table: &TableDef) -> String {
        let key_fields = table
            .key_columns()
            .map(|c| format!("    {}: {}", c.name, c.data_type().cozo_type()))
            .collect::<Vec<_>>()
            .join(",\n");

        let value_fields = table
            .value_columns()
            .map(|c| {
                let nullable = if table.is_nullable(c) { "?" } else { "" };
                format!("    {}: {}{}", c.name, c.data_type().cozo_type(), nullable)
            })
            .collect::<Vec<_>>()
            .join(",\n");

        if value_fields.is_empty() {
            format!(":create {} {{\n{}\n}}", table.name, key_fields)
        } else {
            format!(
                ":create {} {{\n{}\n    =>\n{}\n}}",
                table.name, key_fields, value_fields
            )
        }
    }

    /// Generate an insert script reading rows from the `$rows` parameter.
    ///
    /// Rows must list values in declared column order. `:insert` refuses to
    /// overwrite an existing key.
    /// ```cozo
    /// ?[Sno, Cno, Grade] <- $rows
    /// :insert SC { Sno, Cno => Grade }
    /// ```
    pub fn compile_insert(table: &TableDef) -> String {
        let all_columns = names(table.columns.iter().map(|c| c.name.as_str()));
        let key_columns = names(table.key_columns().map(|c| c.name.as_str()));
        let value_columns = names(table.value_columns().map(|c| c.name.as_str()));

        if value_columns.is_empty() {
            format!(
                "?[{}] <- $rows\n:insert {} {{ {} }}",
                all_columns, table.name, key_columns
            )
        } else {
            format!(
                "?[{}] <- $rows\n:insert {} {{ {} => {} }}",
                all_columns, table.name, key_columns, value_columns
            )
        }
    }

    /// Generate a lookup that returns at most one row where each of `columns`
    /// equals the matching `$k0`, `$k1`, ... parameter.
    /// ```cozo
    /// ?[Sno, Cno] := *SC{Sno, Cno}, Sno == $k0, Cno == $k1
    /// :limit 1
    /// ```
    pub fn compile_key_lookup(table: &str, columns: &[String]) -> String {
        let bound = names(columns.iter().map(String::as_str));
        let filters = columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} == $k{}", c, i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "?[{}] := *{}{{{}}}, {}\n:limit 1",
            bound, table, bound, filters
        )
    }

    /// Generate a select of every column in declared order, sorted by key.
    pub fn compile_select(table: &TableDef, limit: Option<usize>) -> String {
        let all_columns = names(table.columns.iter().map(|c| c.name.as_str()));
        let key_columns = names(table.key_columns().map(|c| c.name.as_str()));

        let mut script = format!(
            "?[{}] := *{}{{{}}}\n:order {}",
            all_columns, table.name, all_columns, key_columns
        );
        if let Some(limit) = limit {
            script.push_str(&format!("\n:limit {}", limit));
        }
        script
    }

    /// Generate a row count over the key columns.
    pub fn compile_count(table: &TableDef) -> String {
        let key_columns = names(table.key_columns().map(|c| c.name.as_str()));
        let first = table.primary_key.first().map(String::as_str).unwrap_or_default();
        format!(
            "?[count({})] := *{}{{{}}}",
            first, table.name, key_columns
        )
    }

    pub fn compile_remove(table: &str) -> String {
        format!("::remove {}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::{Schema, SchemaDocument, university_schema};
    use rstest::{fixture, rstest};

    /// Helper to normalize whitespace for comparison.
    fn normalize_whitespace(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[fixture]
    fn schema() -> Schema {
        university_schema().unwrap()
    }

    #[rstest]
    fn test_student_relation(schema: Schema) {
        let compiled = CozoCompiler::compile_relation(schema.table("Student").unwrap());
        assert_eq!(
            normalize_whitespace(&compiled),
            normalize_whitespace(
                ":create Student {
                    Sno: String
                    =>
                    Sname: String,
                    Ssex: String?,
                    Sage: Int?,
                    Sdept: String?,
                    Scholarship: String?
                }"
            )
        );
    }

    #[rstest]
    fn test_composite_key_relation(schema: Schema) {
        let compiled = CozoCompiler::compile_relation(schema.table("SC").unwrap());
        assert!(compiled.starts_with(":create SC {\n    Sno: String,\n    Cno: String\n    =>\n"));
        assert!(compiled.contains("Grade: Int?"));
    }

    #[rstest]
    fn test_key_only_relation_has_no_separator(schema: Schema) {
        let compiled = CozoCompiler::compile_relation(schema.table("TC").unwrap());
        assert_eq!(compiled, ":create TC {\n    Tno: String,\n    Cno: String\n}");
    }

    #[rstest]
    fn test_output_format_structure(schema: Schema) {
        let compiled = CozoCompiler::compile_relation(schema.table("Course").unwrap());
        let lines: Vec<&str> = compiled.lines().collect();
        assert!(lines[0].starts_with(":create Course"));
        for line in &lines[1..lines.len() - 1] {
            assert!(line.starts_with("    "), "Non-empty lines should be indented");
        }
        assert_eq!(lines[lines.len() - 1], "}");
    }

    #[rstest]
    fn test_compile_insert(schema: Schema) {
        let script = CozoCompiler::compile_insert(schema.table("SC").unwrap());
        assert_eq!(script, "?[Sno, Cno, Grade] <- $rows\n:insert SC { Sno, Cno => Grade }");

        let script = CozoCompiler::compile_insert(schema.table("TC").unwrap());
        assert_eq!(script, "?[Tno, Cno] <- $rows\n:insert TC { Tno, Cno }");
    }

    #[rstest]
    fn test_insert_keeps_declared_column_order() {
        let doc = SchemaDocument::from_json_str(
            r#"[{"table_name": "T", "columns": [
                {"name": "note", "type": "TEXT"},
                {"name": "id", "type": "INT"},
                {"name": "PRIMARY KEY", "type": "(id)"}
            ]}]"#,
        )
        .unwrap();
        let schema = Schema::from_document(&doc).unwrap();
        let script = CozoCompiler::compile_insert(schema.table("T").unwrap());
        assert_eq!(script, "?[note, id] <- $rows\n:insert T { id => note }");
    }

    #[rstest]
    fn test_compile_key_lookup() {
        let script = CozoCompiler::compile_key_lookup("SC", &["Sno".to_string(), "Cno".to_string()]);
        assert_eq!(
            script,
            "?[Sno, Cno] := *SC{Sno, Cno}, Sno == $k0, Cno == $k1\n:limit 1"
        );
    }

    #[rstest]
    fn test_compile_select(schema: Schema) {
        let script = CozoCompiler::compile_select(schema.table("SC").unwrap(), Some(5));
        assert_eq!(
            script,
            "?[Sno, Cno, Grade] := *SC{Sno, Cno, Grade}\n:order Sno, Cno\n:limit 5"
        );
        let script = CozoCompiler::compile_select(schema.table("SC").unwrap(), None);
        assert!(!script.contains(":limit"));
    }

    #[rstest]
    fn test_compile_count_and_remove(schema: Schema) {
        let script = CozoCompiler::compile_count(schema.table("SC").unwrap());
        assert_eq!(script, "?[count(Sno)] := *SC{Sno, Cno}");
        assert_eq!(CozoCompiler::compile_remove("SC"), "::remove SC");
    }
}
