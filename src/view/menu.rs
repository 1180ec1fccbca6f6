//! Entry-point menu
//!
//! The menu is registered once when the host opens (the server starting, for
//! the HTTP host) and only ever points at views.

use serde::Serialize;
use tracing::info;

use super::{RenderedView, ViewHost, ViewOptions};
use crate::error::{FeedError, FeedResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: String,
    pub slug: String,
    pub view: String,
    pub options: ViewOptions,
}

impl MenuEntry {
    pub fn new(label: impl Into<String>, view: impl Into<String>, options: ViewOptions) -> Self {
        let label = label.into();
        Self {
            slug: slugify(&label),
            label,
            view: view.into(),
            options,
        }
    }
}

/// "Open Large Dialog" → "open-large-dialog"
pub fn slugify(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Receives menu entries when the host opens
pub trait MenuRegistrar {
    fn add_item(&mut self, menu_title: &str, entry: &MenuEntry);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn item(mut self, label: &str, view: &str, options: ViewOptions) -> Self {
        self.entries.push(MenuEntry::new(label, view, options));
        self
    }

    /// The Storage Caves map menu
    pub fn storage_caves() -> Self {
        Self::new("Storage Caves Map")
            .item("Open Sidebar", "mapSidebar", ViewOptions::sidebar("Storage Caves"))
            .item(
                "Open Large Dialog",
                "mapSidebar",
                ViewOptions::dialog("Storage Caves Interactive Map", 900, 700),
            )
            .item("Open External Map", "externalMap", ViewOptions::external("Opening Map..."))
    }

    /// Document-open hook: hand every entry to the registrar
    pub fn on_open(&self, registrar: &mut dyn MenuRegistrar) {
        for entry in &self.entries {
            registrar.add_item(&self.title, entry);
        }
        info!(menu = %self.title, items = self.entries.len(), "menu registered");
    }

    pub fn find(&self, slug: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.slug == slug)
    }

    /// Render the view behind a menu entry
    pub fn invoke(&self, slug: &str, host: &dyn ViewHost) -> FeedResult<RenderedView> {
        let entry = self
            .find(slug)
            .ok_or_else(|| FeedError::ViewNotFound(slug.to_string()))?;
        host.render_view(&entry.view, &entry.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ViewBody, ViewKind};

    #[derive(Default)]
    struct Recorder {
        items: Vec<(String, String)>,
    }

    impl MenuRegistrar for Recorder {
        fn add_item(&mut self, menu_title: &str, entry: &MenuEntry) {
            self.items.push((menu_title.to_string(), entry.label.clone()));
        }
    }

    struct EchoHost;

    impl ViewHost for EchoHost {
        fn render_view(&self, name: &str, options: &ViewOptions) -> FeedResult<RenderedView> {
            Ok(RenderedView {
                name: name.to_string(),
                options: options.clone(),
                body: ViewBody::Html(name.to_string()),
            })
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Open Large Dialog"), "open-large-dialog");
        assert_eq!(slugify("  Opening Map... "), "opening-map");
    }

    #[test]
    fn test_on_open_registers_all_entries() {
        let mut recorder = Recorder::default();
        Menu::storage_caves().on_open(&mut recorder);

        assert_eq!(recorder.items.len(), 3);
        assert_eq!(recorder.items[0], ("Storage Caves Map".to_string(), "Open Sidebar".to_string()));
    }

    #[test]
    fn test_invoke_dialog_entry() {
        let view = Menu::storage_caves()
            .invoke("open-large-dialog", &EchoHost)
            .unwrap();

        assert_eq!(view.name, "mapSidebar");
        assert_eq!(view.options.kind, ViewKind::Dialog);
        assert_eq!(view.options.width, Some(900));
        assert_eq!(view.options.height, Some(700));
    }

    #[test]
    fn test_invoke_unknown_entry() {
        let err = Menu::storage_caves().invoke("close-everything", &EchoHost).unwrap_err();
        assert!(matches!(err, FeedError::ViewNotFound(_)));
    }
}
