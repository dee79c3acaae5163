//! Embeddable in-memory table with a primary key and secondary equality indices.
//!
//! A [`Table`] holds an ordered [`Schema`], append-only [`Row`]s, an optional primary key and
//! one secondary index per indexed column. Queries are equality predicates answered through the
//! primary key, the intersection of secondary index buckets, and a scan over what remains.
//!
//! ```
//! use chair::{Predicate, Table};
//!
//! let mut table = Table::with_columns(["id", "title", "author"]);
//! table.set_primary_key("id").unwrap();
//! table.add_index("author").unwrap();
//! table
//!     .insert([("id", "0"), ("title", "War and Peace"), ("author", "Leo Tolstoy")])
//!     .unwrap();
//!
//! assert_eq!(table.filter(Predicate::new().and("author", "Leo Tolstoy")).len(), 1);
//! assert!(table.find("0").is_some());
//! ```

pub mod error;
pub mod index;
mod macros;
pub mod row;
pub mod schema;
pub mod table;
pub mod types;

pub use error::{ChairError, ChairResult, ErrorKind, ErrorTier};
pub use index::{PrimaryKeyIndex, SecondaryIndex};
pub use row::Row;
pub use schema::{ColumnSchema, Schema};
pub use table::{MergeOptions, QueryPlan, RowDisplay, Table};
pub use types::{ColumnId, Predicate, Record, RowId, TableId, Value};
