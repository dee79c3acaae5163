//! Ordered column declarations of a table.

use std::collections::HashMap;

use crate::chair_error;
use crate::error::{ChairResult, ErrorKind};
use crate::types::ColumnId;

/// Schema metadata for a single column.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ColumnSchema {
    /// The name of the column.
    pub name: String,
    /// The stable position of the column.
    pub id: ColumnId,
}

/// Ordered set of column names, each with a stable [`ColumnId`].
///
/// Columns can only be appended. Once declared, a column keeps its position for the lifetime
/// of the schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    column_schemas: Vec<ColumnSchema>,
    positions: HashMap<String, ColumnId>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new column at the next position.
    ///
    /// Fails with [`ErrorKind::DuplicateColumn`] if the name is already declared.
    pub fn add_column(&mut self, name: impl Into<String>) -> ChairResult<ColumnId> {
        let name = name.into();
        if self.positions.contains_key(&name) {
            return Err(
                chair_error!(ErrorKind::DuplicateColumn, "Column already exists").with_column(name),
            );
        }

        let id = ColumnId(self.column_schemas.len());
        self.positions.insert(name.clone(), id);
        self.column_schemas.push(ColumnSchema { name, id });

        Ok(id)
    }

    /// Declares every column in `names`, in order.
    ///
    /// Returns `true` only if every column was added. Duplicates are skipped and make the
    /// result `false`, but do not stop the remaining columns from being added and nothing
    /// added before them is rolled back.
    pub fn add_columns<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(true, |added, name| self.add_column(name).is_ok() && added)
    }

    /// Returns the position of `name`.
    ///
    /// Fails with [`ErrorKind::UnknownColumn`] if the column is not declared.
    pub fn column_position(&self, name: &str) -> ChairResult<ColumnId> {
        self.column_id(name).ok_or_else(|| {
            chair_error!(ErrorKind::UnknownColumn, "Column does not exist in table")
                .with_column(name)
        })
    }

    /// Returns the position of `name`, if declared.
    pub fn column_id(&self, name: &str) -> Option<ColumnId> {
        self.positions.get(name).copied()
    }

    /// Returns the name of the column at `id`.
    pub fn column_name(&self, id: ColumnId) -> Option<&str> {
        self.column_schemas
            .get(id.into_inner())
            .map(|column_schema| column_schema.name.as_str())
    }

    /// Returns the column schemas in declaration order.
    pub fn column_schemas(&self) -> &[ColumnSchema] {
        &self.column_schemas
    }

    /// Returns the column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.column_schemas
            .iter()
            .map(|column_schema| column_schema.name.as_str())
    }

    /// Returns whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Returns the number of declared columns.
    pub fn len(&self) -> usize {
        self.column_schemas.len()
    }

    /// Returns `true` if no column is declared.
    pub fn is_empty(&self) -> bool {
        self.column_schemas.is_empty()
    }
}
