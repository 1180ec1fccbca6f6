//! In-memory tabs and JSON/YAML grid files
//!
//! Grid file layout:
//!
//! ```yaml
//! sheets:
//!   - name: Buford - GA
//!     rows:
//!       - [unit_id, status, price]
//!       - [A1, Available, 1200]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::DataSource;
use crate::error::{FeedError, FeedResult};
use crate::types::RawGrid;

/// One named tab
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    pub name: String,
    #[serde(default)]
    pub rows: RawGrid,
}

/// Tabs held in memory, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySource {
    #[serde(default)]
    pub sheets: Vec<SheetData>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style tab insertion
    pub fn with_sheet(mut self, name: impl Into<String>, rows: RawGrid) -> Self {
        self.add_sheet(name, rows);
        self
    }

    /// Add a tab, replacing the rows of an existing tab with the same name
    pub fn add_sheet(&mut self, name: impl Into<String>, rows: RawGrid) {
        let name = name.into();
        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(sheet) => sheet.rows = rows,
            None => self.sheets.push(SheetData { name, rows }),
        }
    }

    pub fn from_json_str(content: &str) -> FeedResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> FeedResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a grid file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> FeedResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }
}

impl DataSource for MemorySource {
    fn list_sources(&self) -> FeedResult<Vec<String>> {
        Ok(self.sheets.iter().map(|s| s.name.clone()).collect())
    }

    fn read_grid(&self, name: &str) -> FeedResult<RawGrid> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.rows.clone())
            .ok_or_else(|| FeedError::SourceNotFound(name.to_string()))
    }
}

/// Grid file on disk, re-read on every call so edits show up on the next request
#[derive(Debug, Clone)]
pub struct GridFile {
    path: PathBuf,
}

impl GridFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for GridFile {
    fn list_sources(&self) -> FeedResult<Vec<String>> {
        MemorySource::load(&self.path)?.list_sources()
    }

    fn read_grid(&self, name: &str) -> FeedResult<RawGrid> {
        MemorySource::load(&self.path)?.read_grid(name)
    }
}
