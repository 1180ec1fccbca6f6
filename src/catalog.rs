//! Location catalog
//!
//! Maps short location keys (as used in map front-ends, e.g. `Buford`) to the
//! tab that holds that location's units (`Buford - GA`).

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, FeedResult};
use crate::types::CatalogInfo;

/// One location key → tab name pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub key: String,
    pub sheet: String,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sheet: sheet.into(),
        }
    }
}

/// Ordered, read-only location table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationCatalog {
    entries: Vec<CatalogEntry>,
}

impl LocationCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// The Storage Caves locations
    pub fn storage_caves() -> Self {
        Self::new(vec![
            CatalogEntry::new("Buford", "Buford - GA"),
            CatalogEntry::new("FortMill", "Fort Mill - SC"),
            CatalogEntry::new("Concord", "Concord - NC"),
            CatalogEntry::new("Concord2", "Concord 2 - NC"),
            CatalogEntry::new("LakeNorman", "Lake Norman - NC"),
            CatalogEntry::new("Lexington", "Lexington - NC"),
            CatalogEntry::new("Nashville", "Nashville - TN"),
        ])
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tab name for a selector: the catalog's tab if the key is known, else the selector itself
    pub fn translate<'a>(&'a self, selector: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|entry| entry.key == selector)
            .map(|entry| entry.sheet.as_str())
            .unwrap_or(selector)
    }

    /// Pick the tab to read out of `available`
    ///
    /// A known key is translated, an unknown selector is taken literally, and
    /// a missing (or empty) selector falls back to the first available tab.
    pub fn resolve(&self, selector: Option<&str>, available: &[String]) -> FeedResult<String> {
        match selector.filter(|s| !s.is_empty()) {
            Some(selector) => {
                let name = self.translate(selector);
                if available.iter().any(|tab| tab == name) {
                    Ok(name.to_string())
                } else {
                    Err(FeedError::SourceNotFound(name.to_string()))
                }
            }
            None => available.first().cloned().ok_or(FeedError::NoSources),
        }
    }

    /// Tab names in declared order
    pub fn sheets(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.sheet.clone()).collect()
    }

    pub fn default_location(&self) -> Option<&str> {
        self.entries.first().map(|entry| entry.sheet.as_str())
    }

    pub fn info(&self) -> CatalogInfo {
        CatalogInfo {
            locations: self.sheets(),
            default_location: self.default_location().map(str::to_string),
        }
    }
}
