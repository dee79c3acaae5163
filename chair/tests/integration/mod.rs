mod common;

mod config_test;
mod merge_test;
mod properties_test;
mod scenarios_test;
