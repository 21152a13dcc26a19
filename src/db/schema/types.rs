//! Parsing of declared SQL type strings and constraint bodies.
//!
//! Column `type` strings look like `CHAR(20) NOT NULL` or `SMALLINT`: a base
//! type with optional length/precision followed by column modifiers.
//! Constraint pseudo-columns carry bodies like `(Sno, Cno)` or
//! `(Sno) REFERENCES Student(Sno)`.

use std::sync::LazyLock;

use regex::Regex;

use super::definition::DataType;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

static TYPE_DEF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*([a-z]+(?:\s+(?:precision|varying))?)\s*(?:\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\))?(.*)$",
    )
    .expect("valid regex")
});

static KEY_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([\w\s,]+)\)$").expect("valid regex"));

static FOREIGN_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\(([\w\s,]+)\)\s+REFERENCES\s+(\w+)\s*\(([\w\s,]+)\)$")
        .expect("valid regex")
});

/// A recognized SQL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Char(u32),
    Varchar(Option<u32>),
    Text,
    Date,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Numeric {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    Real,
    Double,
    Boolean,
}

impl ColumnType {
    /// Storage-level type for this column type.
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnType::Char(_) | ColumnType::Varchar(_) | ColumnType::Text | ColumnType::Date => {
                DataType::String
            }
            ColumnType::TinyInt
            | ColumnType::SmallInt
            | ColumnType::Integer
            | ColumnType::BigInt => DataType::Int,
            ColumnType::Numeric { .. } | ColumnType::Real | ColumnType::Double => DataType::Float,
            ColumnType::Boolean => DataType::Bool,
        }
    }

    /// Maximum length in characters for CHAR-family types.
    pub fn max_len(&self) -> Option<u32> {
        match self {
            ColumnType::Char(n) => Some(*n),
            ColumnType::Varchar(n) => *n,
            _ => None,
        }
    }

    /// Canonical SQL spelling.
    pub fn sql_spelling(&self) -> String {
        match self {
            ColumnType::Char(n) => format!("CHAR({})", n),
            ColumnType::Varchar(Some(n)) => format!("VARCHAR({})", n),
            ColumnType::Varchar(None) => "VARCHAR".to_string(),
            ColumnType::Text => "TEXT".to_string(),
            ColumnType::Date => "DATE".to_string(),
            ColumnType::TinyInt => "TINYINT".to_string(),
            ColumnType::SmallInt => "SMALLINT".to_string(),
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::BigInt => "BIGINT".to_string(),
            ColumnType::Numeric {
                precision: Some(p),
                scale: Some(s),
            } => format!("NUMERIC({},{})", p, s),
            ColumnType::Numeric {
                precision: Some(p),
                scale: None,
            } => format!("NUMERIC({})", p),
            ColumnType::Numeric { .. } => "NUMERIC".to_string(),
            ColumnType::Real => "REAL".to_string(),
            ColumnType::Double => "DOUBLE PRECISION".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
        }
    }
}

/// A type string split into base type and column modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedType {
    pub column_type: ColumnType,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
}

/// Parse a declared column type. Returns `None` when the base type or any
/// modifier is not recognized.
pub fn parse_type_def(type_def: &str) -> Option<ParsedType> {
    let caps = TYPE_DEF.captures(type_def)?;
    let base = caps
        .get(1)?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    let first = caps.get(2).map(|m| m.as_str().parse::<u32>()).transpose().ok()?;
    let second = caps.get(3).map(|m| m.as_str().parse::<u32>()).transpose().ok()?;

    let column_type = match (base.as_str(), first, second) {
        ("CHAR" | "CHARACTER" | "NCHAR", None, None) => ColumnType::Char(1),
        ("CHAR" | "CHARACTER" | "NCHAR", Some(n), None) if n > 0 => ColumnType::Char(n),
        ("VARCHAR" | "NVARCHAR" | "CHARACTER VARYING", n, None) if n != Some(0) => {
            ColumnType::Varchar(n)
        }
        ("TEXT", None, None) => ColumnType::Text,
        ("DATE", None, None) => ColumnType::Date,
        ("TINYINT", None, None) => ColumnType::TinyInt,
        ("SMALLINT", None, None) => ColumnType::SmallInt,
        ("INT" | "INTEGER", None, None) => ColumnType::Integer,
        ("BIGINT", None, None) => ColumnType::BigInt,
        ("NUMERIC" | "DECIMAL", precision, scale) => ColumnType::Numeric { precision, scale },
        ("REAL" | "FLOAT", None, None) => ColumnType::Real,
        ("DOUBLE" | "DOUBLE PRECISION", None, None) => ColumnType::Double,
        ("BOOLEAN" | "BOOL", None, None) => ColumnType::Boolean,
        _ => return None,
    };

    let mut parsed = ParsedType {
        column_type,
        not_null: false,
        primary_key: false,
        unique: false,
    };
    let mut explicit_null = false;

    let rest = caps.get(4).map(|m| m.as_str()).unwrap_or("").to_uppercase();
    let mut tokens = rest.split_whitespace();
    while let Some(token) = tokens.next() {
        match token {
            "NOT" => {
                if tokens.next() != Some("NULL") {
                    return None;
                }
                parsed.not_null = true;
            }
            "NULL" => explicit_null = true,
            "PRIMARY" => {
                if tokens.next() != Some("KEY") {
                    return None;
                }
                parsed.primary_key = true;
            }
            "UNIQUE" => parsed.unique = true,
            _ => return None,
        }
    }

    if explicit_null && (parsed.not_null || parsed.primary_key) {
        return None;
    }

    Some(parsed)
}

/// Check a table or column name against the identifier rules.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

fn split_names(list: &str) -> Option<Vec<String>> {
    let names: Vec<String> = list.split(',').map(|s| s.trim().to_string()).collect();
    if names.iter().any(|n| !is_valid_identifier(n)) {
        return None;
    }
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return None;
        }
    }
    Some(names)
}

/// Parse a primary key body: `(a, b)` or a bare identifier.
pub fn parse_key_list(body: &str) -> Option<Vec<String>> {
    let body = body.trim();
    if is_valid_identifier(body) {
        return Some(vec![body.to_string()]);
    }
    let caps = KEY_LIST.captures(body)?;
    split_names(caps.get(1)?.as_str())
}

/// Parsed body of a `FOREIGN KEY` pseudo-column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyBody {
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
}

/// Parse a foreign key body: `(a, b) REFERENCES T(x, y)`.
pub fn parse_foreign_key(body: &str) -> Option<ForeignKeyBody> {
    let caps = FOREIGN_KEY.captures(body.trim())?;
    let ref_table = caps.get(2)?.as_str().to_string();
    if !is_valid_identifier(&ref_table) {
        return None;
    }
    Some(ForeignKeyBody {
        columns: split_names(caps.get(1)?.as_str())?,
        ref_table,
        ref_columns: split_names(caps.get(3)?.as_str())?,
    })
}
