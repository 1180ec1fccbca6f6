//! CLI command handlers

pub mod commands;

pub use commands::{catalog, load_exporter, menu, snapshot, stats};
