//! Overlay layout persistence
//!
//! Key-value store keyed by a stable widget identifier. Writes are
//! best-effort from the caller's point of view: the region logs and drops
//! store errors so they never reach the touch event path.

use op_core::StoreError;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Persisted geometry and appearance of one overlay widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLayout {
    /// Left edge of the widget bounds
    pub x: i32,
    /// Top edge of the widget bounds
    pub y: i32,
    pub scale_percent: u8,
    pub opacity_percent: u8,
}

/// Swappable persistence port for overlay widgets
pub trait OverlayStore: Send + Sync {
    /// Read the stored layout for a widget, `None` if never saved
    fn load(&self, id: &str) -> Result<Option<OverlayLayout>, StoreError>;

    /// Write the layout for a widget, replacing any previous value
    fn save(&self, id: &str, layout: &OverlayLayout) -> Result<(), StoreError>;

    /// Remove the stored layout for a widget
    fn clear(&self, id: &str) -> Result<(), StoreError>;
}

/// In-memory store used by tests and as a fallback backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, OverlayLayout>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverlayStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<OverlayLayout>, StoreError> {
        Ok(self.entries.lock().get(id).copied())
    }

    fn save(&self, id: &str, layout: &OverlayLayout) -> Result<(), StoreError> {
        self.entries.lock().insert(id.to_string(), *layout);
        Ok(())
    }

    fn clear(&self, id: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(id);
        Ok(())
    }
}

/// TOML-file-backed store
///
/// All widget layouts live in one file as a map of tables keyed by widget
/// id; the whole file is rewritten on every save.
#[derive(Debug)]
pub struct TomlStore {
    path: PathBuf,
}

impl TomlStore {
    /// Store at the default location under the user config directory
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("overlay-pad")
            .join("overlays.toml");
        Self { path }
    }

    /// Store at an explicit file path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, OverlayLayout>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn write_all(&self, entries: &HashMap<String, OverlayLayout>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Default for TomlStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayStore for TomlStore {
    fn load(&self, id: &str) -> Result<Option<OverlayLayout>, StoreError> {
        Ok(self.read_all()?.get(id).copied())
    }

    fn save(&self, id: &str, layout: &OverlayLayout) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(id.to_string(), *layout);
        self.write_all(&entries)
    }

    fn clear(&self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(id).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> OverlayLayout {
        OverlayLayout {
            x: 120,
            y: 340,
            scale_percent: 75,
            opacity_percent: 40,
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("dpad").unwrap(), None);

        store.save("dpad", &layout()).unwrap();
        assert_eq!(store.load("dpad").unwrap(), Some(layout()));

        store.clear("dpad").unwrap();
        assert_eq!(store.load("dpad").unwrap(), None);
    }

    #[test]
    fn test_toml_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlStore::with_path(dir.path().join("overlays.toml"));

        assert_eq!(store.load("dpad").unwrap(), None);
        store.save("dpad", &layout()).unwrap();

        // fresh store over the same file sees the saved value
        let reopened = TomlStore::with_path(dir.path().join("overlays.toml"));
        assert_eq!(reopened.load("dpad").unwrap(), Some(layout()));

        reopened.clear("dpad").unwrap();
        assert_eq!(store.load("dpad").unwrap(), None);
    }

    #[test]
    fn test_toml_store_keeps_other_widgets() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlStore::with_path(dir.path().join("overlays.toml"));

        store.save("dpad", &layout()).unwrap();
        store
            .save(
                "buttons",
                &OverlayLayout {
                    x: 900,
                    y: 500,
                    scale_percent: 50,
                    opacity_percent: 50,
                },
            )
            .unwrap();

        store.clear("dpad").unwrap();
        assert_eq!(store.load("dpad").unwrap(), None);
        assert!(store.load("buttons").unwrap().is_some());
    }

    #[test]
    fn test_clear_missing_widget_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlStore::with_path(dir.path().join("overlays.toml"));
        store.clear("dpad").unwrap();
        assert!(!dir.path().join("overlays.toml").exists());
    }
}
