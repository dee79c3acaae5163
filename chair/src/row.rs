//! Rows stored in a table.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::schema::Schema;
use crate::types::{ColumnId, RowId, TableId, Value};

/// A record stored in a table, tagged with its immutable [`RowId`].
///
/// Attributes are keyed by [`ColumnId`]. A column the row was never given is absent, which
/// [`Row::get`] reports as [`None`], distinct from a present [`Value::Null`] or empty string.
///
/// Rows are only created and mutated by their [`crate::table::Table`], which keeps the
/// indices consistent with every write.
#[derive(Debug, Clone)]
pub struct Row {
    table_id: TableId,
    row_id: RowId,
    attributes: BTreeMap<ColumnId, Value>,
}

impl Row {
    pub(crate) fn new(
        table_id: TableId,
        row_id: RowId,
        attributes: BTreeMap<ColumnId, Value>,
    ) -> Self {
        Self {
            table_id,
            row_id,
            attributes,
        }
    }

    /// Returns the insertion-order identifier of the row.
    pub fn row_id(&self) -> RowId {
        self.row_id
    }

    /// Returns the value stored for `column`, or [`None`] if the row has no such attribute.
    pub fn get(&self, column: ColumnId) -> Option<&Value> {
        self.attributes.get(&column)
    }

    /// Returns the value stored for the column named `name` in `schema`.
    pub fn value(&self, schema: &Schema, name: &str) -> Option<&Value> {
        schema.column_id(name).and_then(|column| self.get(column))
    }

    /// Writes `value` for `column`, returning the previous value if there was one.
    pub(crate) fn set(&mut self, column: ColumnId, value: Value) -> Option<Value> {
        self.attributes.insert(column, value)
    }

    /// Returns `true` if `column` is present with a non-null, non-empty value.
    ///
    /// Absent, null and empty values are all treated alike here.
    pub fn has_attribute(&self, column: ColumnId) -> bool {
        self.get(column).is_some_and(|value| !value.is_empty())
    }

    /// Returns `true` if the row holds no attribute.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Returns the number of present attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns the present attributes in column order.
    pub fn attributes(&self) -> impl Iterator<Item = (ColumnId, &Value)> + '_ {
        self.attributes.iter().map(|(column, value)| (*column, value))
    }

    /// Returns one value per column of `schema`, in column order. Absent columns read as null.
    pub fn to_values(&self, schema: &Schema) -> Vec<Value> {
        schema
            .column_schemas()
            .iter()
            .map(|column_schema| self.get(column_schema.id).cloned().unwrap_or(Value::Null))
            .collect()
    }

    /// Returns the present attributes as `(column name, value)` pairs in column order.
    pub fn to_record(&self, schema: &Schema) -> Vec<(String, Value)> {
        self.attributes
            .iter()
            .filter_map(|(column, value)| {
                schema
                    .column_name(*column)
                    .map(|name| (name.to_string(), value.clone()))
            })
            .collect()
    }

    /// Orders rows by [`RowId`].
    ///
    /// Rows of different tables are incomparable and yield [`None`].
    pub fn cmp_position(&self, other: &Row) -> Option<Ordering> {
        if self.table_id != other.table_id {
            return None;
        }

        Some(self.row_id.cmp(&other.row_id))
    }

    pub(crate) fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Returns a copy of this row owned by the table `table_id`.
    pub(crate) fn clone_into_table(&self, table_id: TableId) -> Row {
        Row {
            table_id,
            row_id: self.row_id,
            attributes: self.attributes.clone(),
        }
    }
}

/// Rows are equal when their attributes are, regardless of their identifiers.
impl PartialEq for Row {
    fn eq(&self, other: &Row) -> bool {
        self.attributes == other.attributes
    }
}

/// A row equals a positional sequence when it holds exactly those values at positions `0..n`.
impl PartialEq<[Value]> for Row {
    fn eq(&self, other: &[Value]) -> bool {
        self.attributes.len() == other.len()
            && other
                .iter()
                .enumerate()
                .all(|(position, value)| self.get(ColumnId(position)) == Some(value))
    }
}

impl PartialEq<Vec<Value>> for Row {
    fn eq(&self, other: &Vec<Value>) -> bool {
        self == other.as_slice()
    }
}
