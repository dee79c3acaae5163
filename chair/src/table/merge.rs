use tracing::{debug, warn};

use crate::{bail, chair_error};
use crate::error::{ChairResult, ErrorKind};
use crate::table::Table;
use crate::types::{ColumnId, Record, Value};

/// Options of [`Table::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Replace values already present in the target column.
    pub overwrite: bool,
    /// Insert a row for primary key values no row holds yet.
    pub create_row: bool,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn create_row(mut self, create_row: bool) -> Self {
        self.create_row = create_row;
        self
    }
}

impl Table {
    /// Writes values into `column`, addressing rows by primary key.
    ///
    /// For each `(key, value)` pair the row holding `key` gets `value` in `column`. A row that
    /// already has a value there fails with [`ErrorKind::ValueConflict`] unless
    /// [`MergeOptions::overwrite`] is set. A key no row holds fails with
    /// [`ErrorKind::MissingRow`] unless [`MergeOptions::create_row`] is set, in which case a
    /// row with the key and the value is inserted.
    ///
    /// Pairs are applied in iteration order and the call stops at the first failure. Pairs
    /// applied before the failure stay applied.
    pub fn merge<I, K, V>(
        &mut self,
        column: &str,
        values: I,
        options: MergeOptions,
    ) -> ChairResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let Some(primary_key) = self.primary_key() else {
            bail!(ErrorKind::NoPrimaryKey, "Merging requires a primary key");
        };
        let primary_key = primary_key.to_string();
        let column_id = self.schema.column_position(column)?;

        let mut applied = 0usize;
        for (key, value) in values {
            let result = self.merge_pair(
                &primary_key,
                column,
                column_id,
                key.into(),
                value.into(),
                options,
            );

            if let Err(err) = result {
                if applied > 0 {
                    warn!(
                        table = self.log_name(),
                        column,
                        applied,
                        error = %err,
                        "merge failed after applying some pairs"
                    );
                }

                return Err(err);
            }

            applied += 1;
        }

        debug!(table = self.log_name(), column, applied, "merged values");

        Ok(self)
    }

    fn merge_pair(
        &mut self,
        primary_key: &str,
        column: &str,
        column_id: ColumnId,
        key: Value,
        value: Value,
        options: MergeOptions,
    ) -> ChairResult<()> {
        let row_id = self
            .primary_key
            .as_ref()
            .and_then(|index| index.get(&key));

        let Some(row_id) = row_id else {
            if !options.create_row {
                return Err(chair_error!(
                    ErrorKind::MissingRow,
                    "No row holds the primary key value"
                )
                .with_column(primary_key)
                .with_value(key));
            }

            let record = Record::from_pairs([(primary_key, key), (column, value)]);
            self.insert(record)?;

            return Ok(());
        };

        let occupied = self
            .row(row_id)
            .is_some_and(|row| row.has_attribute(column_id));
        if occupied && !options.overwrite {
            return Err(chair_error!(
                ErrorKind::ValueConflict,
                "Row already has a value in column",
                format!("refusing to overwrite `{column}` without the overwrite option")
            )
            .with_column(column)
            .with_value(key));
        }

        self.write_cell(row_id, column_id, value)?;

        Ok(())
    }
}
