//! Index structures kept in sync with the row store by [`crate::table::Table`].
//!
//! A table has at most one [`PrimaryKeyIndex`], mapping each key value to the single row
//! holding it, and any number of [`SecondaryIndex`]es mapping a value to the set of rows that
//! share it. Both are rebuilt from the rows whenever they are (re-)created.

mod primary;
mod secondary;

pub use primary::PrimaryKeyIndex;
pub use secondary::SecondaryIndex;
