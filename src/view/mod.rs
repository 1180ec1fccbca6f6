//! View-host port
//!
//! Companion pages (the map sidebar, the large dialog, the external map) are
//! plain HTML files the feed never generates. A [`ViewHost`] looks them up by
//! name and hands back what the caller should display.

pub mod menu;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{FeedError, FeedResult};

pub use menu::{Menu, MenuEntry, MenuRegistrar};

/// Where a view is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Sidebar,
    Dialog,
    /// A page outside the host, opened in a new browser context
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOptions {
    pub kind: ViewKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ViewOptions {
    pub fn sidebar(title: impl Into<String>) -> Self {
        Self {
            kind: ViewKind::Sidebar,
            title: title.into(),
            width: None,
            height: None,
        }
    }

    pub fn dialog(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            kind: ViewKind::Dialog,
            title: title.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn external(title: impl Into<String>) -> Self {
        Self {
            kind: ViewKind::External,
            title: title.into(),
            width: None,
            height: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Html(String),
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub name: String,
    pub options: ViewOptions,
    pub body: ViewBody,
}

pub trait ViewHost: Send + Sync {
    fn render_view(&self, name: &str, options: &ViewOptions) -> FeedResult<RenderedView>;
}

/// Serves `<dir>/<name>.html`, and redirects external views to a fixed URL
#[derive(Debug, Clone)]
pub struct FileViewHost {
    dir: PathBuf,
    external_url: Option<String>,
}

impl FileViewHost {
    pub fn new<P: AsRef<Path>>(dir: P, external_url: Option<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            external_url,
        }
    }

    fn view_path(&self, name: &str) -> FeedResult<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(FeedError::ViewNotFound(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.html", name)))
    }
}

impl ViewHost for FileViewHost {
    fn render_view(&self, name: &str, options: &ViewOptions) -> FeedResult<RenderedView> {
        let body = match options.kind {
            ViewKind::External => {
                let url = self.external_url.clone().ok_or_else(|| {
                    FeedError::View("no external map URL configured".to_string())
                })?;
                ViewBody::Redirect(url)
            }
            ViewKind::Sidebar | ViewKind::Dialog => {
                let path = self.view_path(name)?;
                if !path.is_file() {
                    return Err(FeedError::ViewNotFound(name.to_string()));
                }
                ViewBody::Html(std::fs::read_to_string(path)?)
            }
        };

        Ok(RenderedView {
            name: name.to_string(),
            options: options.clone(),
            body,
        })
    }
}
