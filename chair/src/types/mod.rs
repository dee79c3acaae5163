//! Value and identifier types shared by the schema, rows, indices and tables.

mod ids;
mod record;
mod value;

pub use ids::*;
pub use record::*;
pub use value::*;
