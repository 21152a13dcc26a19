//! Conversions between stored values, JSON and display text.
//!
//! The `DatabaseValue` trait keeps result handling independent of Cozo's
//! `DataValue`; the free functions convert stored cells for output.

use std::fmt::Debug;

use cozo::{DataValue, Num};
use serde_json::Value as JsonValue;

/// Trait for database values that can be extracted to Rust types.
pub trait DatabaseValue: Clone + Debug {
    /// Extract as String if the value is a string.
    fn as_string(&self) -> Option<String>;

    /// Extract as i64 if the value is an integer.
    fn as_i64(&self) -> Option<i64>;

    /// Extract as f64 if the value is numeric.
    fn as_f64(&self) -> Option<f64>;

    fn as_bool(&self) -> Option<bool>;

    fn is_null(&self) -> bool;

    /// Get type name for error messages.
    fn type_name(&self) -> &'static str;

    /// Convert to the JSON value written to output and export files.
    fn to_json(&self) -> JsonValue;

    /// Text used in table and CSV output. NULL renders as an empty string.
    fn to_display(&self) -> String {
        display_json(&self.to_json())
    }
}

/// Display text for a converted value. NULL renders as an empty string.
pub fn display_json(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl DatabaseValue for DataValue {
    fn as_string(&self) -> Option<String> {
        match self {
            DataValue::Str(s) => Some(s.to_string()),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            DataValue::Num(Num::Int(i)) => Some(*i),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Num(Num::Int(i)) => Some(*i as f64),
            DataValue::Num(Num::Float(f)) => Some(*f),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "bool",
            DataValue::Num(_) => "number",
            DataValue::Str(_) => "string",
            DataValue::Bytes(_) => "bytes",
            DataValue::List(_) => "list",
            DataValue::Set(_) => "set",
            DataValue::Vec(_) => "vec",
            DataValue::Json(_) => "json",
            DataValue::Uuid(_) => "uuid",
            DataValue::Regex(_) => "regex",
            DataValue::Bot => "bot",
            DataValue::Validity(_) => "validity",
        }
    }

    fn to_json(&self) -> JsonValue {
        match self {
            DataValue::Null => JsonValue::Null,
            DataValue::Bool(b) => JsonValue::Bool(*b),
            DataValue::Num(Num::Int(i)) => JsonValue::from(*i),
            DataValue::Num(Num::Float(f)) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            DataValue::Str(s) => JsonValue::String(s.to_string()),
            DataValue::List(items) => JsonValue::Array(items.iter().map(|v| v.to_json()).collect()),
            other => JsonValue::String(format!("{:?}", other)),
        }
    }
}
