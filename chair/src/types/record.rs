use crate::chair_error;
use crate::error::{ChairError, ErrorKind};
use crate::types::Value;

/// Data handed to [`crate::table::Table::insert`].
///
/// A named record maps column names to values. A positional record is matched left to right
/// against the schema's column order.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Named(Vec<(String, Value)>),
    Positional(Vec<Value>),
}

impl Record {
    /// Creates a named record from `(column, value)` pairs.
    pub fn from_pairs<I, C, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<String>,
        V: Into<Value>,
    {
        Record::Named(
            pairs
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }

    /// Creates a positional record.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Record::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if the record carries no value at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Record::Named(pairs) => pairs.is_empty(),
            Record::Positional(values) => values.is_empty(),
        }
    }
}

impl<C, V, const N: usize> From<[(C, V); N]> for Record
where
    C: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(C, V); N]) -> Self {
        Record::from_pairs(pairs)
    }
}

impl From<Vec<(String, Value)>> for Record {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        Record::Named(pairs)
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Record::Positional(values)
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = ChairError;

    /// Converts a JSON object into a named record and a JSON array into a positional one.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(object) => object
                .into_iter()
                .map(|(column, value)| Ok((column, Value::try_from(value)?)))
                .collect::<Result<Vec<_>, ChairError>>()
                .map(Record::Named),
            serde_json::Value::Array(values) => values
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, ChairError>>()
                .map(Record::Positional),
            other => Err(chair_error!(
                ErrorKind::UnsupportedValue,
                "Only JSON objects and arrays can be inserted as records",
                other
            )),
        }
    }
}

/// Equality constraints used by `where`, `find_by` and `table_scan`.
///
/// Maps column names to requested values; setting the same column twice keeps the last value.
/// A row matches when its value equals the requested one for every column. A requested
/// [`Value::Null`] also matches rows where the column is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    constraints: Vec<(String, Value)>,
}

impl Predicate {
    /// Creates a predicate matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the constraint `column == value`.
    pub fn and(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let value = value.into();

        match self.constraints.iter_mut().find(|(name, _)| *name == column) {
            Some(existing) => existing.1 = value,
            None => self.constraints.push((column, value)),
        }

        self
    }

    /// Returns the requested value for `column`, if constrained.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.constraints
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the constraints in the order they were added.
    pub fn constraints(&self) -> &[(String, Value)] {
        &self.constraints
    }

    /// Returns `true` if the predicate has no constraint.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl<C, V, const N: usize> From<[(C, V); N]> for Predicate
where
    C: Into<String>,
    V: Into<Value>,
{
    fn from(pairs: [(C, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<C, V> FromIterator<(C, V)> for Predicate
where
    C: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Predicate::new(), |predicate, (column, value)| {
                predicate.and(column, value)
            })
    }
}

impl From<&Predicate> for Predicate {
    fn from(predicate: &Predicate) -> Self {
        predicate.clone()
    }
}
