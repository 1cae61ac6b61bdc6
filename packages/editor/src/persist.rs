//! # Persistence Boundary
//!
//! The store's host decides persistence cadence; the store itself only
//! pushes through this trait. Two backings are provided, mirroring the
//! memory/file split of the editing stack's document storage:
//!
//! - [`MemoryPersistence`]: temporary, for tests and in-memory sessions
//! - [`JsonFilePersistence`]: one `<uuid>.json` document per page under a
//!   root directory
//!
//! Persistence is eventual, not synchronous: a failed save leaves the
//! in-memory document as the source of truth for the session.

use pagecanvas_config::{page_from_json, ConfigError, PageConfig};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("page not found: {0}")]
    NotFound(Uuid),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Load/save contract between the store and whatever owns durable storage.
pub trait PersistenceBoundary {
    fn load(&self, page_id: Uuid) -> Result<PageConfig, PersistenceError>;
    fn save(&mut self, page: &PageConfig) -> Result<(), PersistenceError>;
}

/// In-memory only (for testing, temp sessions).
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    pages: HashMap<Uuid, PageConfig>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(page: PageConfig) -> Self {
        let mut pages = HashMap::new();
        pages.insert(page.uuid, page);
        Self { pages }
    }

    pub fn page(&self, page_id: Uuid) -> Option<&PageConfig> {
        self.pages.get(&page_id)
    }
}

impl PersistenceBoundary for MemoryPersistence {
    fn load(&self, page_id: Uuid) -> Result<PageConfig, PersistenceError> {
        self.pages
            .get(&page_id)
            .cloned()
            .ok_or(PersistenceError::NotFound(page_id))
    }

    fn save(&mut self, page: &PageConfig) -> Result<(), PersistenceError> {
        self.pages.insert(page.uuid, page.clone());
        Ok(())
    }
}

/// File-backed: each page is a pretty-printed JSON document named by its
/// uuid. Loads pass through the config boundary, so an invalid or
/// version-mismatched file never reaches the store.
#[derive(Debug)]
pub struct JsonFilePersistence {
    root: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn page_path(&self, page_id: Uuid) -> PathBuf {
        self.root.join(format!("{page_id}.json"))
    }
}

impl PersistenceBoundary for JsonFilePersistence {
    fn load(&self, page_id: Uuid) -> Result<PageConfig, PersistenceError> {
        let path = self.page_path(page_id);
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(page_id));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(page_from_json(&json)?)
    }

    fn save(&mut self, page: &PageConfig) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.root)?;
        let json = page.to_json_pretty()?;
        std::fs::write(self.page_path(page.uuid), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecanvas_config::{PageElementConfig, TextElementConfig, CURRENT_SCHEMA_VERSION};

    fn sample_page() -> PageConfig {
        PageConfig {
            version: CURRENT_SCHEMA_VERSION,
            uuid: Uuid::new_v4(),
            path: "/notes".to_string(),
            title: "Notes".to_string(),
            icon: "📝".to_string(),
            on_nav: true,
            elements: vec![PageElementConfig::Text(TextElementConfig::empty(
                Uuid::new_v4(),
            ))],
        }
    }

    #[test]
    fn test_memory_roundtrip() {
        let page = sample_page();
        let mut persistence = MemoryPersistence::new();

        persistence.save(&page).unwrap();
        let loaded = persistence.load(page.uuid).unwrap();
        assert_eq!(loaded, page);
    }

    #[test]
    fn test_memory_missing_page() {
        let persistence = MemoryPersistence::new();
        let err = persistence.load(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut persistence = JsonFilePersistence::new(dir.path());

        let page = sample_page();
        persistence.save(&page).unwrap();

        let loaded = persistence.load(page.uuid).unwrap();
        assert_eq!(loaded, page);
    }

    #[test]
    fn test_file_missing_page() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = JsonFilePersistence::new(dir.path());
        let err = persistence.load(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, PersistenceError::NotFound(_)));
    }

    #[test]
    fn test_file_load_refuses_tampered_version() {
        let dir = tempfile::tempdir().unwrap();
        let mut persistence = JsonFilePersistence::new(dir.path());

        let page = sample_page();
        persistence.save(&page).unwrap();

        // Simulate a document written by a future schema revision.
        let path = dir.path().join(format!("{}.json", page.uuid));
        let tampered = std::fs::read_to_string(&path)
            .unwrap()
            .replacen("\"version\": 1", "\"version\": 9", 1);
        std::fs::write(&path, tampered).unwrap();

        let err = persistence.load(page.uuid).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Config(ConfigError::SchemaVersionMismatch { .. })
        ));
    }
}
