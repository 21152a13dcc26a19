//! Row validation against declared table rules.
//!
//! Checking a candidate row happens in two steps:
//!
//! 1. [`RowValidator::prepare`] works on the row alone: the table and every
//!    column must be declared, values must fit the column type and length,
//!    and NOT NULL columns (primary key columns included) must be present.
//!    The result is a [`PreparedRow`] holding store values in declared order.
//! 2. [`RowValidator::check_keys`] asks a [`KeyLookup`] about existing rows:
//!    the primary key and UNIQUE columns must be unused, and every foreign key
//!    must point at an existing row.
//!
//! Foreign keys with a NULL component are not checked. A row whose foreign
//! key points at its own key (a self-referencing table) is accepted.

use std::error::Error;
use std::fmt;

use cozo::{DataValue, Num};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use crate::db::schema::{ColumnDef, ColumnType, DataType, Schema, TableDef};

/// 2^63: the first float above every `i64`. `i64::MAX as f64` rounds up to it.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Constraint violations for a single row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstraintError {
    #[error("Unknown table '{table}'")]
    UnknownTable { table: String },

    #[error("Unknown column '{column}' for table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Row for table '{table}' must be a JSON object, got {found}")]
    InvalidRow { table: String, found: String },

    #[error("Column '{table}.{column}' must not be NULL")]
    NotNull { table: String, column: String },

    #[error("Column '{table}.{column}' expects {expected}, got {found}")]
    TypeMismatch {
        table: String,
        column: String,
        expected: String,
        found: String,
    },

    #[error("Value for '{table}.{column}' is {actual} characters, limit is {max}")]
    ValueTooLong {
        table: String,
        column: String,
        max: u32,
        actual: usize,
    },

    #[error("Duplicate value {values} for ({}) in table '{table}'", .columns.join(", "))]
    DuplicateKey {
        table: String,
        columns: Vec<String>,
        values: String,
    },

    #[error("Foreign key violation in table '{table}': {constraint} has no row matching {values}")]
    ForeignKey {
        table: String,
        constraint: String,
        values: String,
    },
}

/// Existence checks against stored rows.
pub trait KeyLookup {
    /// True when `table` holds a row whose `columns` equal `values`.
    fn exists(&self, table: &str, columns: &[String], values: &[DataValue]) -> Result<bool, Box<dyn Error>>;
}

/// A row that passed the row-local checks, with values in declared column order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    pub table: String,
    pub values: Vec<DataValue>,
}

/// Formats a tuple of values for error messages, e.g. `('S001', 'C001')`.
pub struct ValueTuple<'a>(pub &'a [DataValue]);

impl fmt::Display for ValueTuple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                DataValue::Str(s) => write!(f, "'{}'", s)?,
                DataValue::Null => write!(f, "NULL")?,
                DataValue::Num(Num::Int(n)) => write!(f, "{}", n)?,
                DataValue::Num(Num::Float(n)) => write!(f, "{}", n)?,
                DataValue::Bool(b) => write!(f, "{}", b)?,
                other => write!(f, "{:?}", other)?,
            }
        }
        write!(f, ")")
    }
}

static NULL: JsonValue = JsonValue::Null;

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn integer_range(column_type: ColumnType) -> Option<(i64, i64)> {
    match column_type {
        ColumnType::TinyInt => Some((i8::MIN as i64, i8::MAX as i64)),
        ColumnType::SmallInt => Some((i16::MIN as i64, i16::MAX as i64)),
        ColumnType::Integer => Some((i32::MIN as i64, i32::MAX as i64)),
        _ => None,
    }
}

/// Validates rows for the tables of one schema.
pub struct RowValidator<'a> {
    schema: &'a Schema,
}

impl<'a> RowValidator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    fn table(&self, name: &str) -> Result<&'a TableDef, ConstraintError> {
        self.schema.table(name).ok_or_else(|| ConstraintError::UnknownTable {
            table: name.to_string(),
        })
    }

    /// Row-local checks. Columns missing from the object are NULL.
    pub fn prepare(&self, table_name: &str, row: &JsonValue) -> Result<PreparedRow, ConstraintError> {
        let table = self.table(table_name)?;
        let object = row.as_object().ok_or_else(|| ConstraintError::InvalidRow {
            table: table.name.clone(),
            found: json_kind(row).to_string(),
        })?;

        for key in object.keys() {
            if table.column(key).is_none() {
                return Err(ConstraintError::UnknownColumn {
                    table: table.name.clone(),
                    column: key.clone(),
                });
            }
        }

        let values = table
            .columns
            .iter()
            .map(|column| self.coerce(table, column, object))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PreparedRow {
            table: table.name.clone(),
            values,
        })
    }

    fn coerce(&self, table: &TableDef, column: &ColumnDef, object: &Map<String, JsonValue>) -> Result<DataValue, ConstraintError> {
        let value = object.get(&column.name).unwrap_or(&NULL);
        let mismatch = || ConstraintError::TypeMismatch {
            table: table.name.clone(),
            column: column.name.clone(),
            expected: column.column_type.sql_spelling(),
            found: json_kind(value).to_string(),
        };

        if value.is_null() {
            if !table.is_nullable(column) {
                return Err(ConstraintError::NotNull {
                    table: table.name.clone(),
                    column: column.name.clone(),
                });
            }
            return Ok(DataValue::Null);
        }

        match column.data_type() {
            DataType::String => {
                let text = value.as_str().ok_or_else(mismatch)?;
                if let Some(max) = column.column_type.max_len() {
                    let actual = text.chars().count();
                    if actual > max as usize {
                        return Err(ConstraintError::ValueTooLong {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            max,
                            actual,
                        });
                    }
                }
                Ok(DataValue::Str(text.into()))
            }
            DataType::Int => {
                let n = match value.as_i64() {
                    Some(n) => n,
                    None => match value.as_f64() {
                        Some(f) if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) => f as i64,
                        _ => return Err(mismatch()),
                    },
                };
                if let Some((min, max)) = integer_range(column.column_type) {
                    if n < min || n > max {
                        return Err(ConstraintError::TypeMismatch {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            expected: format!("{} in {}..={}", column.column_type.sql_spelling(), min, max),
                            found: n.to_string(),
                        });
                    }
                }
                Ok(DataValue::Num(Num::Int(n)))
            }
            DataType::Float => {
                let f = value.as_f64().ok_or_else(mismatch)?;
                Ok(DataValue::Num(Num::Float(f)))
            }
            DataType::Bool => {
                let b = value.as_bool().ok_or_else(mismatch)?;
                Ok(DataValue::Bool(b))
            }
        }
    }

    /// Checks against stored rows: primary key, UNIQUE columns and foreign keys.
    ///
    /// Violations are returned as [`ConstraintError`]; lookup failures are
    /// passed through unchanged.
    pub fn check_keys(&self, row: &PreparedRow, lookup: &dyn KeyLookup) -> Result<(), Box<dyn Error>> {
        let table = self.table(&row.table)?;
        let value_of = |name: &str| -> DataValue {
            table
                .column_index(name)
                .and_then(|i| row.values.get(i))
                .cloned()
                .unwrap_or(DataValue::Null)
        };
        let values_of = |names: &[String]| -> Vec<DataValue> { names.iter().map(|n| value_of(n)).collect() };

        let key = values_of(&table.primary_key);
        if lookup.exists(&table.name, &table.primary_key, &key)? {
            return Err(ConstraintError::DuplicateKey {
                table: table.name.clone(),
                columns: table.primary_key.clone(),
                values: ValueTuple(&key).to_string(),
            }
            .into());
        }

        for column in table.columns.iter().filter(|c| c.unique && !table.is_sole_key(&c.name)) {
            let value = vec![value_of(&column.name)];
            if value[0] == DataValue::Null {
                continue;
            }
            let columns = vec![column.name.clone()];
            if lookup.exists(&table.name, &columns, &value)? {
                return Err(ConstraintError::DuplicateKey {
                    table: table.name.clone(),
                    columns,
                    values: ValueTuple(&value).to_string(),
                }
                .into());
            }
        }

        for fk in &table.foreign_keys {
            let values = values_of(&fk.columns);
            if values.iter().any(|v| *v == DataValue::Null) {
                continue;
            }
            if fk.is_self_reference(&table.name) && values_of(&fk.ref_columns) == values {
                continue;
            }
            if !lookup.exists(&fk.ref_table, &fk.ref_columns, &values)? {
                return Err(ConstraintError::ForeignKey {
                    table: table.name.clone(),
                    constraint: fk.to_string(),
                    values: ValueTuple(&values).to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// `prepare` followed by `check_keys`.
    pub fn validate(&self, table: &str, row: &JsonValue, lookup: &dyn KeyLookup) -> Result<PreparedRow, Box<dyn Error>> {
        let prepared = self.prepare(table, row)?;
        self.check_keys(&prepared, lookup)?;
        Ok(prepared)
    }
}
