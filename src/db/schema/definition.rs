//! Core schema definition types.
//!
//! A [`Schema`] is built from a [`SchemaDocument`] by lowering the constraint
//! pseudo-columns into primary and foreign keys and validating the result.
//! These types feed both the SQL and the Cozo compilers.

use std::fmt;

use super::document::{ColumnEntry, FOREIGN_KEY_ENTRY, PRIMARY_KEY_ENTRY, SchemaDocument, TableEntry};
use super::types::{self, ColumnType};
use super::SchemaError;

/// Prefix reserved for the catalog relations kept next to user tables.
pub const RESERVED_PREFIX: &str = "catalog_";

/// Represents a storage-level data type.
///
/// Every declared SQL type maps onto one of these; the Cozo relation uses the
/// matching engine type via `cozo_type()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// String/text data
    String,
    /// Integer data
    Int,
    /// Floating point data
    Float,
    /// Boolean data
    Bool,
}

impl DataType {
    /// Returns the Cozo type name for this data type.
    pub fn cozo_type(&self) -> &'static str {
        match self {
            DataType::String => "String",
            DataType::Int => "Int",
            DataType::Float => "Float",
            DataType::Bool => "Bool",
        }
    }

    /// Short name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Int => "integer",
            DataType::Float => "number",
            DataType::Bool => "boolean",
        }
    }
}

/// A real (non-constraint) column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    /// Type string exactly as written in the document.
    pub declared_type: String,
    /// Declared `NOT NULL`. Key columns are non-nullable regardless.
    pub not_null: bool,
    pub unique: bool,
    pub description: String,
}

impl ColumnDef {
    pub fn data_type(&self) -> DataType {
        self.column_type.data_type()
    }
}

/// A foreign key constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
}

impl ForeignKey {
    pub fn is_self_reference(&self, table: &str) -> bool {
        self.ref_table == table
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) REFERENCES {}({})",
            self.columns.join(", "),
            self.ref_table,
            self.ref_columns.join(", ")
        )
    }
}

/// Represents a complete table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    pub name: String,

    /// Real columns in document order.
    pub columns: Vec<ColumnDef>,

    /// Primary key column names in declaration order.
    pub primary_key: Vec<String>,

    pub foreign_keys: Vec<ForeignKey>,

    /// Source entries, pseudo-columns included.
    pub entries: Vec<ColumnEntry>,
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn is_key(&self, name: &str) -> bool {
        self.primary_key.iter().any(|k| k == name)
    }

    /// True when `name` is the whole primary key, so its uniqueness is
    /// already enforced by the key.
    pub fn is_sole_key(&self, name: &str) -> bool {
        matches!(self.primary_key.as_slice(), [only] if only == name)
    }

    pub fn is_nullable(&self, column: &ColumnDef) -> bool {
        !column.not_null && !self.is_key(&column.name)
    }

    /// Key columns in primary key order.
    pub fn key_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.primary_key.iter().filter_map(|k| self.column(k))
    }

    /// Non-key columns in document order.
    pub fn value_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| !self.is_key(&c.name))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of other tables this table references.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for fk in &self.foreign_keys {
            if !fk.is_self_reference(&self.name) && !deps.contains(&fk.ref_table.as_str()) {
                deps.push(&fk.ref_table);
            }
        }
        deps
    }

    /// Foreign keys of this table that target `column`.
    pub fn foreign_keys_on(&self, column: &str) -> Vec<&ForeignKey> {
        self.foreign_keys
            .iter()
            .filter(|fk| fk.columns.iter().any(|c| c == column))
            .collect()
    }

    pub fn to_entry(&self) -> TableEntry {
        TableEntry {
            table_name: self.name.clone(),
            columns: self.entries.clone(),
        }
    }
}

/// A validated set of tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    tables: Vec<TableDef>,
    /// Indices into `tables`, referenced tables first.
    order: Vec<usize>,
}

impl Schema {
    /// Lower and validate a document.
    pub fn from_document(doc: &SchemaDocument) -> Result<Self, SchemaError> {
        let mut tables: Vec<TableDef> = Vec::with_capacity(doc.tables.len());

        for entry in &doc.tables {
            let table = lower_table(entry)?;
            if tables.iter().any(|t| t.name == table.name) {
                return Err(SchemaError::DuplicateTable { table: table.name });
            }
            tables.push(table);
        }

        for table in &tables {
            for fk in &table.foreign_keys {
                check_reference(&tables, table, fk)?;
            }
        }

        let order = dependency_order(&tables)?;
        Ok(Self { tables, order })
    }

    pub fn to_document(&self) -> SchemaDocument {
        SchemaDocument {
            tables: self.tables.iter().map(TableDef::to_entry).collect(),
        }
    }

    /// Tables in document order.
    pub fn tables(&self) -> &[TableDef] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables ordered so that every referenced table precedes its referrers.
    pub fn creation_order(&self) -> Vec<&TableDef> {
        self.order.iter().map(|&i| &self.tables[i]).collect()
    }

    /// Reverse of the creation order.
    pub fn drop_order(&self) -> Vec<&TableDef> {
        self.order.iter().rev().map(|&i| &self.tables[i]).collect()
    }

    /// Other tables holding a foreign key to `name`.
    pub fn referencing(&self, name: &str) -> Vec<&TableDef> {
        self.tables
            .iter()
            .filter(|t| t.name != name && t.dependencies().contains(&name))
            .collect()
    }
}

fn lower_table(entry: &TableEntry) -> Result<TableDef, SchemaError> {
    let table_name = entry.table_name.as_str();
    if !types::is_valid_identifier(table_name) {
        return Err(SchemaError::InvalidIdentifier {
            name: table_name.to_string(),
        });
    }
    if table_name.starts_with('_') || table_name.starts_with(RESERVED_PREFIX) {
        return Err(SchemaError::ReservedName {
            table: table_name.to_string(),
        });
    }

    let mut columns: Vec<ColumnDef> = Vec::new();
    let mut primary_key: Option<Vec<String>> = None;
    let mut foreign_keys = Vec::new();

    for (position, col) in entry.columns.iter().enumerate() {
        if col.name.trim().is_empty() || col.type_def.trim().is_empty() {
            return Err(SchemaError::IncompleteColumn {
                table: table_name.to_string(),
                position,
            });
        }

        match col.name.as_str() {
            PRIMARY_KEY_ENTRY => {
                let keys = types::parse_key_list(&col.type_def).ok_or_else(|| {
                    SchemaError::MalformedConstraint {
                        table: table_name.to_string(),
                        body: col.type_def.clone(),
                    }
                })?;
                if primary_key.is_some() {
                    return Err(SchemaError::MultiplePrimaryKeys {
                        table: table_name.to_string(),
                    });
                }
                primary_key = Some(keys);
            }
            FOREIGN_KEY_ENTRY => {
                let body = types::parse_foreign_key(&col.type_def).ok_or_else(|| {
                    SchemaError::MalformedConstraint {
                        table: table_name.to_string(),
                        body: col.type_def.clone(),
                    }
                })?;
                foreign_keys.push(ForeignKey {
                    columns: body.columns,
                    ref_table: body.ref_table,
                    ref_columns: body.ref_columns,
                });
            }
            name => {
                if !types::is_valid_identifier(name) {
                    return Err(SchemaError::InvalidIdentifier {
                        name: name.to_string(),
                    });
                }
                // Cozo reads a leading underscore as an ignored binding.
                if name.starts_with('_') {
                    return Err(SchemaError::ReservedColumnName {
                        table: table_name.to_string(),
                        column: name.to_string(),
                    });
                }
                if columns.iter().any(|c| c.name == name) {
                    return Err(SchemaError::DuplicateColumn {
                        table: table_name.to_string(),
                        column: name.to_string(),
                    });
                }
                let parsed = types::parse_type_def(&col.type_def).ok_or_else(|| {
                    SchemaError::UnknownType {
                        table: table_name.to_string(),
                        column: name.to_string(),
                        type_name: col.type_def.clone(),
                    }
                })?;
                if parsed.primary_key {
                    if primary_key.is_some() {
                        return Err(SchemaError::MultiplePrimaryKeys {
                            table: table_name.to_string(),
                        });
                    }
                    primary_key = Some(vec![name.to_string()]);
                }
                columns.push(ColumnDef {
                    name: name.to_string(),
                    column_type: parsed.column_type,
                    declared_type: col.type_def.clone(),
                    not_null: parsed.not_null,
                    unique: parsed.unique,
                    description: col.description.clone(),
                });
            }
        }
    }

    let primary_key = primary_key.ok_or_else(|| SchemaError::MissingPrimaryKey {
        table: table_name.to_string(),
    })?;

    let declared = |name: &String| columns.iter().any(|c| &c.name == name);
    let constrained = primary_key
        .iter()
        .chain(foreign_keys.iter().flat_map(|fk| fk.columns.iter()));
    for name in constrained {
        if !declared(name) {
            return Err(SchemaError::UnknownKeyColumn {
                table: table_name.to_string(),
                column: name.clone(),
            });
        }
    }

    Ok(TableDef {
        name: table_name.to_string(),
        columns,
        primary_key,
        foreign_keys,
        entries: entry.columns.clone(),
    })
}

fn check_reference(tables: &[TableDef], table: &TableDef, fk: &ForeignKey) -> Result<(), SchemaError> {
    let target = tables
        .iter()
        .find(|t| t.name == fk.ref_table)
        .ok_or_else(|| SchemaError::UnknownReference {
            table: table.name.clone(),
            referenced: fk.ref_table.clone(),
        })?;

    for column in &fk.ref_columns {
        if target.column(column).is_none() {
            return Err(SchemaError::UnknownReferencedColumn {
                table: table.name.clone(),
                referenced: fk.ref_table.clone(),
                column: column.clone(),
            });
        }
    }

    if fk.columns.len() != fk.ref_columns.len() {
        return Err(SchemaError::ForeignKeyArity {
            table: table.name.clone(),
            constraint: fk.to_string(),
        });
    }

    let targets_primary_key = fk.ref_columns.len() == target.primary_key.len()
        && fk.ref_columns.iter().all(|c| target.is_key(c));
    let targets_unique = fk.ref_columns.len() == 1
        && target.column(&fk.ref_columns[0]).is_some_and(|c| c.unique);
    if !targets_primary_key && !targets_unique {
        return Err(SchemaError::ReferenceNotKey {
            table: table.name.clone(),
            constraint: fk.to_string(),
        });
    }

    Ok(())
}

/// Order tables so referenced tables come first, keeping document order
/// among independent tables.
fn dependency_order(tables: &[TableDef]) -> Result<Vec<usize>, SchemaError> {
    let mut order: Vec<usize> = Vec::with_capacity(tables.len());
    let mut placed = vec![false; tables.len()];

    while order.len() < tables.len() {
        let next = (0..tables.len()).find(|&i| {
            !placed[i]
                && tables[i].dependencies().iter().all(|dep| {
                    tables
                        .iter()
                        .position(|t| t.name == *dep)
                        .is_some_and(|j| placed[j])
                })
        });

        match next {
            Some(i) => {
                placed[i] = true;
                order.push(i);
            }
            None => {
                let remaining = (0..tables.len())
                    .filter(|&i| !placed[i])
                    .map(|i| tables[i].name.clone())
                    .collect();
                return Err(SchemaError::CyclicDependency { tables: remaining });
            }
        }
    }

    Ok(order)
}
