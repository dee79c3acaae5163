use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::chair_error;
use crate::error::{ChairResult, ErrorKind};
use crate::row::Row;
use crate::types::{ColumnId, RowId, Value};

/// One-to-one map from primary key value to the [`RowId`] holding it.
///
/// Every key is non-null, non-empty and unique.
#[derive(Debug, Clone)]
pub struct PrimaryKeyIndex {
    column: ColumnId,
    map: HashMap<Value, RowId>,
}

impl PrimaryKeyIndex {
    /// Builds the index over `rows`.
    ///
    /// Fails with [`ErrorKind::InvalidPrimaryKeyValue`] on the first row whose value is absent,
    /// null or empty, and with [`ErrorKind::DuplicatePrimaryKeyValue`] on the first repeated
    /// value.
    pub(crate) fn build(column: ColumnId, column_name: &str, rows: &[Row]) -> ChairResult<Self> {
        let mut map = HashMap::with_capacity(rows.len());

        for row in rows {
            let value = row.get(column).cloned().unwrap_or(Value::Null);
            validate_key_value(column_name, &value)?;

            match map.entry(value) {
                Entry::Occupied(entry) => {
                    return Err(chair_error!(
                        ErrorKind::DuplicatePrimaryKeyValue,
                        "Primary key value is not unique in column",
                        format!("rows {} and {} share the value", entry.get(), row.row_id())
                    )
                    .with_column(column_name)
                    .with_value(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(row.row_id());
                }
            }
        }

        Ok(Self { column, map })
    }

    /// Returns the primary key column.
    pub fn column(&self) -> ColumnId {
        self.column
    }

    /// Returns the row holding `value`.
    pub fn get(&self, value: &Value) -> Option<RowId> {
        self.map.get(value).copied()
    }

    /// Returns whether some row holds `value`.
    pub fn contains(&self, value: &Value) -> bool {
        self.map.contains_key(value)
    }

    /// Returns the number of keys, which equals the number of rows.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no key is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Checks that `value` can key a new row: present, non-empty and not taken.
    pub(crate) fn check_new_key(&self, column_name: &str, value: Option<&Value>) -> ChairResult<()> {
        let Some(value) = value else {
            return Err(chair_error!(
                ErrorKind::MissingPrimaryKey,
                "Missing primary key in record to be inserted"
            )
            .with_column(column_name));
        };

        validate_key_value(column_name, value)?;

        if let Some(row_id) = self.get(value) {
            return Err(chair_error!(
                ErrorKind::DuplicatePrimaryKeyValue,
                "Primary key value is already taken",
                format!("row {row_id} holds the value")
            )
            .with_column(column_name)
            .with_value(value.clone()));
        }

        Ok(())
    }

    /// Maps `value` to `row_id`. The key must have been checked with [`Self::check_new_key`].
    pub(crate) fn insert(&mut self, value: Value, row_id: RowId) {
        self.map.insert(value, row_id);
    }

    /// Moves `row_id` from `old` to `new`.
    pub(crate) fn rekey(&mut self, old: &Value, new: Value, row_id: RowId) {
        self.map.remove(old);
        self.map.insert(new, row_id);
    }
}

/// Fails with [`ErrorKind::InvalidPrimaryKeyValue`] if `value` is null or empty.
fn validate_key_value(column_name: &str, value: &Value) -> ChairResult<()> {
    if value.is_empty() {
        return Err(chair_error!(
            ErrorKind::InvalidPrimaryKeyValue,
            "Row does not have a value in primary key column"
        )
        .with_column(column_name)
        .with_value(value.clone()));
    }

    Ok(())
}
