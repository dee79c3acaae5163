use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable zero-based position of a column in a [`crate::schema::Schema`].
///
/// Assigned when the column is declared and never changed afterwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct ColumnId(pub usize);

impl ColumnId {
    /// Returns the zero-based position.
    pub fn into_inner(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insertion-order identifier of a row.
///
/// Equal to the number of rows the table held when the row was inserted. Rows are never
/// deleted, so a [`RowId`] is never reused.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RowId(pub usize);

impl RowId {
    /// Returns the position of the row in the row store.
    pub fn into_inner(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-unique identity of a table, used to tell whether two rows share a table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TableId(u64);

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

impl TableId {
    /// Allocates a fresh identifier.
    pub(crate) fn next() -> Self {
        Self(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}
