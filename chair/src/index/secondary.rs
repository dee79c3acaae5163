use std::collections::{BTreeSet, HashMap};

use crate::row::Row;
use crate::types::{ColumnId, RowId, Value};

/// One-to-many map from a column value to the rows holding it.
///
/// Null values are never indexed, so rows whose value is null or absent belong to no bucket.
/// Buckets are never left empty.
#[derive(Debug, Clone)]
pub struct SecondaryIndex {
    column: ColumnId,
    buckets: HashMap<Value, BTreeSet<RowId>>,
}

impl SecondaryIndex {
    /// Builds the index by bucketing the non-null values of `column` across `rows`.
    pub(crate) fn build(column: ColumnId, rows: &[Row]) -> Self {
        let mut index = Self {
            column,
            buckets: HashMap::new(),
        };

        for row in rows {
            if let Some(value) = row.get(column) {
                index.insert(value, row.row_id());
            }
        }

        index
    }

    /// Returns the indexed column.
    pub fn column(&self) -> ColumnId {
        self.column
    }

    /// Returns the rows holding `value`, or [`None`] if no row does.
    pub fn bucket(&self, value: &Value) -> Option<&BTreeSet<RowId>> {
        self.buckets.get(value)
    }

    /// Returns the number of distinct indexed values.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if no value is indexed.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Adds `row_id` to the bucket of `value`. Null values are ignored.
    pub(crate) fn insert(&mut self, value: &Value, row_id: RowId) {
        if value.is_null() {
            return;
        }

        self.buckets
            .entry(value.clone())
            .or_default()
            .insert(row_id);
    }

    /// Removes `row_id` from the bucket of `value`, dropping the bucket once empty.
    pub(crate) fn remove(&mut self, value: &Value, row_id: RowId) {
        if let Some(bucket) = self.buckets.get_mut(value) {
            bucket.remove(&row_id);
            if bucket.is_empty() {
                self.buckets.remove(value);
            }
        }
    }
}
