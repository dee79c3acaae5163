use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::load::Config;

/// Table configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The table name is empty.
    #[error("`name` cannot be empty")]
    EmptyName,
    /// A column name is empty.
    #[error("column names cannot be empty")]
    EmptyColumnName,
    /// A column is declared more than once.
    #[error("column `{0}` is declared more than once")]
    DuplicateColumn(String),
    /// The primary key names a column that is not declared.
    #[error("primary key `{0}` is not a declared column")]
    UnknownPrimaryKey(String),
    /// An index names a column that is not declared.
    #[error("index `{0}` is not a declared column")]
    UnknownIndex(String),
    /// An index is declared more than once.
    #[error("index `{0}` is declared more than once")]
    DuplicateIndex(String),
    /// An index is declared on the primary key column, which is already indexed by it.
    #[error("index `{0}` is the primary key column and cannot also be a secondary index")]
    IndexOnPrimaryKey(String),
}

/// Declarative description of a table: its columns, primary key and secondary indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TableConfig {
    /// Name used in logs and inspection output.
    pub name: String,
    /// Column names in declaration order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Column enforced unique and required, if any.
    #[serde(default)]
    pub primary_key: Option<String>,
    /// Columns with a secondary index.
    #[serde(default)]
    pub indices: Vec<String>,
}

impl TableConfig {
    /// Validates the configuration.
    ///
    /// The primary key and every index must name a declared column, names must be unique
    /// and the primary key column cannot also carry a secondary index.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let mut declared = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if column.is_empty() {
                return Err(ValidationError::EmptyColumnName);
            }
            if !declared.insert(column.as_str()) {
                return Err(ValidationError::DuplicateColumn(column.clone()));
            }
        }

        if let Some(primary_key) = &self.primary_key {
            if !declared.contains(primary_key.as_str()) {
                return Err(ValidationError::UnknownPrimaryKey(primary_key.clone()));
            }
        }

        let mut indexed = HashSet::with_capacity(self.indices.len());
        for index in &self.indices {
            if !declared.contains(index.as_str()) {
                return Err(ValidationError::UnknownIndex(index.clone()));
            }
            if self.primary_key.as_deref() == Some(index.as_str()) {
                return Err(ValidationError::IndexOnPrimaryKey(index.clone()));
            }
            if !indexed.insert(index.as_str()) {
                return Err(ValidationError::DuplicateIndex(index.clone()));
            }
        }

        Ok(())
    }
}

impl Config for TableConfig {
    const LIST_PARSE_KEYS: &'static [&'static str] = &["columns", "indices"];
}
