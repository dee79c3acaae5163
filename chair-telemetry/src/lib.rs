//! Telemetry setup shared by hosts embedding `chair` and by its tests.
//!
//! The library crates only emit `tracing` events; installing a subscriber is left to
//! whoever owns the process, which is what this crate helps with.

pub mod tracing;
