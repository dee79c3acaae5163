//! Configuration for `chair` tables.
//!
//! Tables can be declared in configuration files instead of code: [`TableConfig`] describes the
//! columns, primary key and secondary indices of a table, and [`load_config`] layers base and
//! environment specific files with `APP_` environment variable overrides.

mod environment;
mod load;
mod table;

pub use environment::Environment;
pub use load::{Config, LoadConfigError, load_config, load_config_from};
pub use table::{TableConfig, ValidationError};
