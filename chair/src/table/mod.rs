//! The table: schema, append-only row store, primary key and secondary indices.
//!
//! [`Table`] is the only component allowed to mutate rows and index maps. Every mutation that
//! touches an indexed or primary key column updates the corresponding index before returning,
//! so no reader can observe a row whose indices lag behind it. Failing mutations leave the
//! table unchanged, except for [`Table::merge`] which is documented as fail-fast.

mod display;
mod merge;
mod query;

use std::collections::BTreeMap;
use std::path::Path;

use chair_config::{Environment, TableConfig};
use tracing::{debug, info};

use crate::chair_error;
use crate::error::{ChairResult, ErrorKind};
use crate::index::{PrimaryKeyIndex, SecondaryIndex};
use crate::row::Row;
use crate::schema::Schema;
use crate::types::{ColumnId, Record, RowId, TableId, Value};

pub use display::RowDisplay;
pub use merge::MergeOptions;
pub use query::QueryPlan;

/// Name used in logs for tables created without one.
const UNNAMED_TABLE: &str = "unnamed";

/// In-memory table with an optional primary key and secondary indices.
///
/// The table is a synchronous, single-writer data structure. Hosts sharing it across threads
/// must wrap it in their own lock.
///
/// A clone is a distinct table: it gets a fresh [`TableId`], so its rows are incomparable with
/// the rows of the table it was cloned from.
#[derive(Debug)]
pub struct Table {
    id: TableId,
    name: Option<String>,
    schema: Schema,
    rows: Vec<Row>,
    primary_key: Option<PrimaryKeyIndex>,
    indices: BTreeMap<ColumnId, SecondaryIndex>,
}

impl Table {
    /// Creates a table with no column.
    pub fn new() -> Self {
        Self {
            id: TableId::next(),
            name: None,
            schema: Schema::new(),
            rows: Vec::new(),
            primary_key: None,
            indices: BTreeMap::new(),
        }
    }

    /// Creates a table declaring `columns` in order. Repeated names are declared once.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        table.add_columns(columns);
        table
    }

    /// Creates a table from its declarative configuration.
    ///
    /// The configuration is validated first; validation failures are reported as
    /// [`ErrorKind::InvalidConfig`].
    pub fn from_config(config: &TableConfig) -> ChairResult<Self> {
        config.validate()?;

        let mut table = Self::with_columns(config.columns.iter().cloned()).named(&config.name);
        if let Some(primary_key) = &config.primary_key {
            table.set_primary_key(primary_key)?;
        }
        for index in &config.indices {
            table.add_index(index)?;
        }

        Ok(table)
    }

    /// Loads the configuration layered from `directory` for `environment` and creates the table.
    ///
    /// `directory` must hold a `base` file and one named after the environment, each with a
    /// `yaml`, `yml` or `json` extension. Loading failures are reported as
    /// [`ErrorKind::InvalidConfig`].
    ///
    /// ```
    /// use chair::Table;
    /// use chair_config::Environment;
    ///
    /// let dir = std::env::temp_dir().join(format!("chair-doc-{}", std::process::id()));
    /// std::fs::create_dir_all(&dir).unwrap();
    /// std::fs::write(dir.join("base.yaml"), "name: books\ncolumns: [id, title]\n").unwrap();
    /// std::fs::write(dir.join("dev.yaml"), "primary_key: id\n").unwrap();
    ///
    /// let table = Table::from_config_dir(&dir, Environment::Dev).unwrap();
    ///
    /// assert_eq!(table.name(), Some("books"));
    /// assert_eq!(table.primary_key(), Some("id"));
    /// ```
    pub fn from_config_dir(directory: &Path, environment: Environment) -> ChairResult<Self> {
        let config: TableConfig = chair_config::load_config_from(directory, environment)?;

        info!(
            table = %config.name,
            %environment,
            directory = %directory.display(),
            "loaded table configuration"
        );

        Self::from_config(&config)
    }

    /// Sets the name used in logs.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the table name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the column names in declaration order.
    pub fn columns(&self) -> Vec<&str> {
        self.schema.column_names().collect()
    }

    /// Declares a new column.
    ///
    /// Fails with [`ErrorKind::DuplicateColumn`] if the name is taken. Existing rows read the
    /// new column as absent.
    pub fn add_column(&mut self, name: impl Into<String>) -> ChairResult<ColumnId> {
        self.schema.add_column(name)
    }

    /// Declares several columns, returning `true` only if all of them were added.
    ///
    /// See [`Schema::add_columns`]: duplicates do not abort the call and nothing is rolled back.
    pub fn add_columns<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.add_columns(names)
    }

    /// Returns the position of column `name`, failing with [`ErrorKind::UnknownColumn`].
    pub fn column_position(&self, name: &str) -> ChairResult<ColumnId> {
        self.schema.column_position(name)
    }

    /// Returns the primary key column name, if a primary key is set.
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key
            .as_ref()
            .and_then(|primary_key| self.schema.column_name(primary_key.column()))
    }

    /// Returns whether a primary key is set.
    pub fn has_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    /// Returns the primary key index, if a primary key is set.
    pub fn primary_key_index(&self) -> Option<&PrimaryKeyIndex> {
        self.primary_key.as_ref()
    }

    /// Returns the names of the columns carrying a secondary index, in column order.
    pub fn indices(&self) -> Vec<&str> {
        self.indices
            .keys()
            .filter_map(|column| self.schema.column_name(*column))
            .collect()
    }

    /// Returns the secondary index on column `name`, if any.
    pub fn index(&self, name: &str) -> Option<&SecondaryIndex> {
        self.schema
            .column_id(name)
            .and_then(|column| self.indices.get(&column))
    }

    /// Returns the number of rows.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Alias of [`Table::size`].
    pub fn count(&self) -> usize {
        self.size()
    }

    /// Returns `true` if the table holds no row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns every row in insertion order.
    pub fn all(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the first inserted row.
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Returns the last inserted row.
    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    /// Returns the row with identifier `row_id`.
    pub fn row(&self, row_id: RowId) -> Option<&Row> {
        self.rows.get(row_id.into_inner())
    }

    /// Inserts a record and returns the new row.
    ///
    /// Named records must only reference declared columns ([`ErrorKind::UnknownColumn`]).
    /// Positional records are matched against the column order; missing trailing values leave
    /// their columns absent and surplus values fail with [`ErrorKind::UnknownColumn`].
    ///
    /// When a primary key is set the record must carry a value for it
    /// ([`ErrorKind::MissingPrimaryKey`]) that is neither null nor empty
    /// ([`ErrorKind::InvalidPrimaryKeyValue`]) nor already taken
    /// ([`ErrorKind::DuplicatePrimaryKeyValue`]).
    ///
    /// An empty record is a no-op and returns [`None`].
    pub fn insert(&mut self, record: impl Into<Record>) -> ChairResult<Option<&Row>> {
        let record = record.into();
        if record.is_empty() {
            debug!(table = self.log_name(), "skipping insert of an empty record");
            return Ok(None);
        }

        let attributes = self.resolve_record(record)?;

        if let Some(primary_key) = &self.primary_key {
            let column = primary_key.column();
            primary_key.check_new_key(self.column_name(column), attributes.get(&column))?;
        }

        let row_id = RowId(self.rows.len());

        if let Some(primary_key) = &mut self.primary_key {
            if let Some(value) = attributes.get(&primary_key.column()) {
                primary_key.insert(value.clone(), row_id);
            }
        }
        for (column, index) in self.indices.iter_mut() {
            if let Some(value) = attributes.get(column) {
                index.insert(value, row_id);
            }
        }

        self.rows.push(Row::new(self.id, row_id, attributes));

        debug!(table = self.log_name(), %row_id, "inserted row");

        Ok(self.rows.last())
    }

    /// Updates the value of `column` in row `row_id` and returns the previous value.
    ///
    /// The row moves from its old index bucket to the new one, so secondary indices never
    /// report stale matches. Updating the primary key column re-keys the row after checking
    /// that the new value is non-empty and not held by another row.
    pub fn set_cell(
        &mut self,
        row_id: RowId,
        column: &str,
        value: impl Into<Value>,
    ) -> ChairResult<Option<Value>> {
        let column = self.schema.column_position(column)?;

        self.write_cell(row_id, column, value.into())
    }

    /// Adds a secondary index on `column`, built from the existing rows.
    ///
    /// Fails with [`ErrorKind::UnknownColumn`] if the column is not declared and with
    /// [`ErrorKind::ColumnAlreadyIndexed`] if it already has an index or is the primary key.
    pub fn add_index(&mut self, column: &str) -> ChairResult<ColumnId> {
        let column_id = self.schema.column_position(column)?;

        let is_primary_key = self
            .primary_key
            .as_ref()
            .is_some_and(|primary_key| primary_key.column() == column_id);
        if is_primary_key || self.indices.contains_key(&column_id) {
            return Err(
                chair_error!(ErrorKind::ColumnAlreadyIndexed, "Column is already an index")
                    .with_column(column),
            );
        }

        let index = SecondaryIndex::build(column_id, &self.rows);
        info!(
            table = self.log_name(),
            column,
            rows = self.rows.len(),
            buckets = index.len(),
            "built secondary index"
        );
        self.indices.insert(column_id, index);

        Ok(column_id)
    }

    /// Drops the secondary index on `column`. Row data is untouched.
    ///
    /// Fails with [`ErrorKind::UnknownColumn`] or [`ErrorKind::ColumnNotIndexed`].
    pub fn remove_index(&mut self, column: &str) -> ChairResult<ColumnId> {
        let column_id = self.schema.column_position(column)?;

        if self.indices.remove(&column_id).is_none() {
            return Err(
                chair_error!(ErrorKind::ColumnNotIndexed, "Column is not indexed")
                    .with_column(column),
            );
        }

        info!(table = self.log_name(), column, "dropped secondary index");

        Ok(column_id)
    }

    /// Makes `column` the primary key.
    ///
    /// Every existing row must hold a non-empty ([`ErrorKind::InvalidPrimaryKeyValue`]) and
    /// unique ([`ErrorKind::DuplicatePrimaryKeyValue`]) value for it. A secondary index on the
    /// column is dropped since the primary key subsumes it. The primary key can only be set
    /// once: later calls fail with [`ErrorKind::PrimaryKeyAlreadySet`].
    ///
    /// On failure the table is left exactly as it was.
    pub fn set_primary_key(&mut self, column: &str) -> ChairResult<ColumnId> {
        if let Some(current) = self.primary_key() {
            return Err(chair_error!(
                ErrorKind::PrimaryKeyAlreadySet,
                "Primary key is already set",
                format!("cannot change the primary key to `{column}`")
            )
            .with_column(current));
        }

        let column_id = self.schema.column_position(column)?;
        let primary_key = PrimaryKeyIndex::build(column_id, column, &self.rows)?;

        if self.indices.remove(&column_id).is_some() {
            debug!(
                table = self.log_name(),
                column, "dropped secondary index subsumed by the primary key"
            );
        }

        info!(
            table = self.log_name(),
            column,
            rows = primary_key.len(),
            "set primary key"
        );
        self.primary_key = Some(primary_key);

        Ok(column_id)
    }

    /// Writes a cell and keeps the primary key and secondary indices in sync.
    fn write_cell(
        &mut self,
        row_id: RowId,
        column: ColumnId,
        value: Value,
    ) -> ChairResult<Option<Value>> {
        let Some(row) = self.rows.get(row_id.into_inner()) else {
            return Err(
                chair_error!(ErrorKind::UnknownRow, "Row does not exist in table")
                    .with_value(row_id.into_inner() as i64),
            );
        };
        let previous = row.get(column).cloned();

        if let Some(primary_key) = &mut self.primary_key {
            if primary_key.column() == column && previous.as_ref() != Some(&value) {
                let column_name = self.schema.column_name(column).unwrap_or_default();
                primary_key.check_new_key(column_name, Some(&value))?;
                match &previous {
                    Some(old) => primary_key.rekey(old, value.clone(), row_id),
                    None => primary_key.insert(value.clone(), row_id),
                }
            }
        }

        if let Some(index) = self.indices.get_mut(&column) {
            if let Some(old) = &previous {
                index.remove(old, row_id);
            }
            index.insert(&value, row_id);
        }

        let row = &mut self.rows[row_id.into_inner()];

        Ok(row.set(column, value))
    }

    /// Resolves a record into attributes keyed by column, validating every column.
    fn resolve_record(&self, record: Record) -> ChairResult<BTreeMap<ColumnId, Value>> {
        match record {
            Record::Named(pairs) => {
                let unknown: Vec<&str> = pairs
                    .iter()
                    .map(|(column, _)| column.as_str())
                    .filter(|column| !self.schema.contains(column))
                    .collect();
                if let Some(first) = unknown.first() {
                    return Err(chair_error!(
                        ErrorKind::UnknownColumn,
                        "Record references columns that do not exist in table",
                        format!("no such column(s): {}", unknown.join(", "))
                    )
                    .with_column(*first));
                }

                Ok(pairs
                    .into_iter()
                    .filter_map(|(column, value)| {
                        self.schema.column_id(&column).map(|id| (id, value))
                    })
                    .collect())
            }
            Record::Positional(values) => {
                if values.len() > self.schema.len() {
                    return Err(chair_error!(
                        ErrorKind::UnknownColumn,
                        "Record has more values than the table has columns",
                        format!(
                            "got {} values for {} columns",
                            values.len(),
                            self.schema.len()
                        )
                    )
                    .with_value(values[self.schema.len()].clone()));
                }

                Ok(values
                    .into_iter()
                    .enumerate()
                    .map(|(position, value)| (ColumnId(position), value))
                    .collect())
            }
        }
    }

    fn column_name(&self, column: ColumnId) -> &str {
        self.schema.column_name(column).unwrap_or_default()
    }

    fn log_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_TABLE)
    }
}

impl Clone for Table {
    fn clone(&self) -> Self {
        let id = TableId::next();

        Self {
            id,
            name: self.name.clone(),
            schema: self.schema.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.clone_into_table(id))
                .collect(),
            primary_key: self.primary_key.clone(),
            indices: self.indices.clone(),
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}
