//! Data-source port
//!
//! A data source is an ordered set of named tabs, each readable as a
//! [`RawGrid`]. Sources are read fresh on every call; nothing is cached.

pub mod memory;
pub mod workbook;

use std::path::Path;
use std::sync::Arc;

use crate::error::{FeedError, FeedResult};
use crate::types::RawGrid;

pub use memory::{GridFile, MemorySource, SheetData};
pub use workbook::WorkbookSource;

/// Read access to the tabs of a workbook
pub trait DataSource: Send + Sync {
    /// Tab names in workbook order
    fn list_sources(&self) -> FeedResult<Vec<String>>;

    /// All rows of one tab, anchored at the top-left cell
    fn read_grid(&self, name: &str) -> FeedResult<RawGrid>;
}

/// Workbook extensions handled by calamine
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Open a source from a file, choosing the reader from its extension
///
/// Spreadsheets (`.xlsx`, `.xls`, `.ods`, ...) go through calamine; `.json`
/// and `.yaml` grid files are read as [`GridFile`]s.
pub fn open_source(path: &Path) -> FeedResult<Arc<dyn DataSource>> {
    if !path.exists() {
        return Err(FeedError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("source file not found: {}", path.display()),
        )));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "json" | "yaml" | "yml" => Ok(Arc::new(GridFile::new(path))),
        e if WORKBOOK_EXTENSIONS.contains(&e) => Ok(Arc::new(WorkbookSource::new(path))),
        _ => Err(FeedError::Workbook(format!(
            "Unsupported source file type: {}",
            path.display()
        ))),
    }
}
