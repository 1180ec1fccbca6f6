//! Sheetfeed - spreadsheet tabs as a live JSON feed
//!
//! Reads the rows of a workbook tab, zips them against the header row and
//! wraps the result in a small JSON envelope for map and listing front-ends.
//!
//! # Features
//!
//! - One record per data row, keyed by header label
//! - Multi-location workbooks: a location catalog picks the tab
//! - Per-status unit counts (available, sold, reserved, leased)
//! - HTTP server (`sheetfeed-server`) and CLI (`sheetfeed`)
//!
//! # Example
//!
//! ```no_run
//! use sheetfeed::catalog::LocationCatalog;
//! use sheetfeed::core::SnapshotExporter;
//! use sheetfeed::source::open_source;
//! use std::path::Path;
//!
//! let source = open_source(Path::new("units.xlsx"))?;
//! let exporter = SnapshotExporter::new(source, LocationCatalog::storage_caves());
//!
//! let snapshot = exporter.try_snapshot(Some("Buford"))?;
//! println!("{} units in {:?}", snapshot.total_units, snapshot.sheet);
//! # Ok::<(), sheetfeed::error::FeedError>(())
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod source;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use error::{FeedError, FeedResult};
pub use types::{CellValue, RawGrid, Record, Snapshot, SnapshotResponse, StatusStats};
