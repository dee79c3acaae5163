//! Error types and result definitions for table operations.
//!
//! [`ChairError`] carries an [`ErrorKind`] for programmatic handling, a static description, an
//! optional dynamic detail and, for data errors, the offending column and value so callers can
//! react to them without parsing messages.

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;
use std::sync::Arc;

use crate::types::Value;

/// Convenient result type for table operations using [`ChairError`] as the error type.
pub type ChairResult<T> = Result<T, ChairError>;

/// Error raised by a table operation.
///
/// Not-found is never an error: lookups return [`Option`] or an empty collection instead.
#[derive(Debug, Clone)]
pub struct ChairError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    column: Option<String>,
    value: Option<Value>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

/// Specific categories of errors that can occur on a table.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // Usage Errors
    UnknownColumn,
    DuplicateColumn,
    ColumnAlreadyIndexed,
    ColumnNotIndexed,
    MissingPrimaryKey,
    PrimaryKeyAlreadySet,
    NoPrimaryKey,
    UnknownRow,
    UnsupportedValue,
    InvalidConfig,

    // Data Integrity Errors
    DuplicatePrimaryKeyValue,
    InvalidPrimaryKeyValue,
    ValueConflict,
    MissingRow,
}

/// Broad classification of an [`ErrorKind`].
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum ErrorTier {
    /// The caller violated a precondition. The table is unchanged.
    Usage,
    /// Existing or incoming data violates an index invariant.
    DataIntegrity,
}

impl ErrorKind {
    /// Returns the tier this kind belongs to.
    pub fn tier(self) -> ErrorTier {
        match self {
            ErrorKind::DuplicatePrimaryKeyValue
            | ErrorKind::InvalidPrimaryKeyValue
            | ErrorKind::ValueConflict
            | ErrorKind::MissingRow => ErrorTier::DataIntegrity,
            _ => ErrorTier::Usage,
        }
    }
}

impl ChairError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the static description of this error.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the column the error is about, if any.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Returns the offending value, if any.
    ///
    /// For primary key errors this is the key value, for merge errors the primary key of the
    /// pair that failed.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Attaches the column the error is about.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Attaches the offending value.
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attaches an originating [`error::Error`] to this error.
    ///
    /// The stored source is preserved across clones and exposed via [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates a [`ChairError`] from its components.
    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
    ) -> Self {
        ChairError {
            kind,
            description,
            detail,
            column: None,
            value: None,
            source: None,
            location: Location::caller(),
        }
    }
}

impl PartialEq for ChairError {
    fn eq(&self, other: &ChairError) -> bool {
        self.kind == other.kind
    }
}

impl Hash for ChairError {
    /// Hashes only the kind and static description so that occurrences of the same failure
    /// group together regardless of the values involved.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.description.hash(state);
    }
}

impl fmt::Display for ChairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.description)?;

        if let Some(column) = &self.column {
            write!(f, " (column: {column}")?;
            if let Some(value) = &self.value {
                write!(f, ", value: {value}")?;
            }
            f.write_str(")")?;
        } else if let Some(value) = &self.value {
            write!(f, " (value: {value})")?;
        }

        write_detail(self.detail.as_deref(), f, 1)
    }
}

impl error::Error for ChairError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

/// Writes the detail block with indentation.
fn write_detail(detail: Option<&str>, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    if let Some(detail) = detail {
        let indent_str = "  ".repeat(indent);
        if detail.trim().is_empty() {
            write!(f, "\n{indent_str}Detail: <empty>")?;
        } else {
            write!(f, "\n{indent_str}Detail:")?;
            for line in detail.lines() {
                if line.trim().is_empty() {
                    write!(f, "\n{indent_str}  ")?;
                } else {
                    write!(f, "\n{indent_str}  {line}")?;
                }
            }
        }
    }

    Ok(())
}

/// Creates a [`ChairError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for ChairError {
    #[track_caller]
    fn from((kind, desc): (ErrorKind, &'static str)) -> ChairError {
        ChairError::from_components(kind, Cow::Borrowed(desc), None)
    }
}

/// Creates a [`ChairError`] from an error kind, static description, and dynamic detail.
impl<D> From<(ErrorKind, &'static str, D)> for ChairError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, desc, detail): (ErrorKind, &'static str, D)) -> ChairError {
        ChairError::from_components(kind, Cow::Borrowed(desc), Some(detail.into()))
    }
}

/// Converts [`chair_config::ValidationError`] to [`ChairError`] with [`ErrorKind::InvalidConfig`].
impl From<chair_config::ValidationError> for ChairError {
    #[track_caller]
    fn from(err: chair_config::ValidationError) -> ChairError {
        let detail = err.to_string();
        ChairError::from_components(
            ErrorKind::InvalidConfig,
            Cow::Borrowed("Table configuration is invalid"),
            Some(Cow::Owned(detail)),
        )
        .with_source(err)
    }
}

/// Converts [`chair_config::LoadConfigError`] to [`ChairError`] with [`ErrorKind::InvalidConfig`].
impl From<chair_config::LoadConfigError> for ChairError {
    #[track_caller]
    fn from(err: chair_config::LoadConfigError) -> ChairError {
        let detail = err.to_string();
        ChairError::from_components(
            ErrorKind::InvalidConfig,
            Cow::Borrowed("Table configuration could not be loaded"),
            Some(Cow::Owned(detail)),
        )
        .with_source(err)
    }
}

/// Converts [`serde_json::Error`] to [`ChairError`] with [`ErrorKind::UnsupportedValue`].
impl From<serde_json::Error> for ChairError {
    #[track_caller]
    fn from(err: serde_json::Error) -> ChairError {
        let detail = err.to_string();
        ChairError::from_components(
            ErrorKind::UnsupportedValue,
            Cow::Borrowed("JSON deserialization failed"),
            Some(Cow::Owned(detail)),
        )
        .with_source(err)
    }
}
