//! YAML configuration file
//!
//! Every key is optional; command-line flags override the file.
//!
//! ```yaml
//! source: units.xlsx
//! mode: multi            # or "single"
//! status_column: Status  # header label; defaults to column B
//! locations:
//!   - key: Buford
//!     sheet: Buford - GA
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! views:
//!   dir: views
//!   external_url: https://example.com/map.html
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, LocationCatalog};
use crate::core::StatusColumn;
use crate::error::FeedResult;

/// How the selector is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Always read the first tab; the envelope carries no `sheet`
    Single,
    /// Resolve the tab through the location catalog
    #[default]
    Multi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Public interactive map opened by the "Open External Map" menu entry
pub const DEFAULT_EXTERNAL_MAP_URL: &str =
    "https://pxl360.com/interactive-map/storage-caves-v3.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSection {
    pub dir: PathBuf,
    pub external_url: Option<String>,
}

impl Default for ViewSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("views"),
            external_url: Some(DEFAULT_EXTERNAL_MAP_URL.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub source: Option<PathBuf>,
    pub mode: SourceMode,
    /// Overrides the built-in location table when present
    pub locations: Option<Vec<CatalogEntry>>,
    pub status_column: Option<String>,
    pub server: ServerSection,
    pub views: ViewSection,
}

impl FeedConfig {
    pub fn from_yaml_str(content: &str) -> FeedResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read a config file; relative paths inside it resolve against its directory
    pub fn load(path: &Path) -> FeedResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content)?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        if let Some(source) = config.source.as_mut() {
            if source.is_relative() {
                *source = base_dir.join(&*source);
            }
        }
        if config.views.dir.is_relative() {
            config.views.dir = base_dir.join(&config.views.dir);
        }
        Ok(config)
    }

    /// Load `path` if given, else fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> FeedResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn catalog(&self) -> LocationCatalog {
        match &self.locations {
            Some(entries) => LocationCatalog::new(entries.clone()),
            None => LocationCatalog::storage_caves(),
        }
    }

    pub fn status_column(&self) -> StatusColumn {
        match &self.status_column {
            Some(label) => StatusColumn::Header(label.clone()),
            None => StatusColumn::default(),
        }
    }
}
