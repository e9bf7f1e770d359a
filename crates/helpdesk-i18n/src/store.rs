//! Client-side persistence of the chosen locale

use crate::error::{I18nError, I18nResult};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage key used by the client when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "helpone.locale";

/// Durable slot for the user's locale choice.
///
/// Reads are best-effort: unreadable storage behaves like empty storage.
pub trait LocaleStore: Send + Sync {
    /// The persisted locale, if any
    fn load(&self) -> Option<String>;

    /// Persist `locale`, replacing any previous value
    fn save(&self, locale: &str) -> I18nResult<()>;
}

/// Keeps the value in memory; used in tests and by hosts without storage
#[derive(Debug, Default)]
pub struct MemoryLocaleStore {
    value: Mutex<Option<String>>,
    writes: Mutex<usize>,
}

impl MemoryLocaleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `locale`
    pub fn with_value(locale: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(locale.into())),
            writes: Mutex::new(0),
        }
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        *self.writes.lock()
    }
}

impl LocaleStore for MemoryLocaleStore {
    fn load(&self) -> Option<String> {
        self.value.lock().clone()
    }

    fn save(&self, locale: &str) -> I18nResult<()> {
        *self.value.lock() = Some(locale.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }
}

/// Stores the locale in a single file named after the storage key
#[derive(Debug, Clone)]
pub struct FileLocaleStore {
    path: PathBuf,
}

impl FileLocaleStore {
    /// Store at an explicit path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at `<dir>/<storage_key>`
    pub fn in_dir<P: AsRef<Path>>(dir: P, storage_key: &str) -> Self {
        Self::new(dir.as_ref().join(storage_key))
    }

    /// File backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocaleStore for FileLocaleStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let value = content.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No stored locale");
                None
            }
        }
    }

    fn save(&self, locale: &str) -> I18nResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| I18nError::Persistence {
                message: format!("cannot create {}", parent.display()),
                source: Some(e),
            })?;
        }

        fs::write(&self.path, locale).map_err(|e| I18nError::Persistence {
            message: format!("cannot write {}", self.path.display()),
            source: Some(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryLocaleStore::new();
        assert_eq!(store.load(), None);
        store.save("en").unwrap();
        assert_eq!(store.load().as_deref(), Some("en"));
        assert_eq!(store.writes(), 1);
        assert_eq!(MemoryLocaleStore::with_value("es").load().as_deref(), Some("es"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLocaleStore::in_dir(temp_dir.path().join("state"), DEFAULT_STORAGE_KEY);

        assert_eq!(store.load(), None);
        store.save("en").unwrap();
        assert_eq!(store.load().as_deref(), Some("en"));
        assert!(store.path().ends_with("state/helpone.locale"));
    }

    #[test]
    fn test_file_store_ignores_blank_content() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileLocaleStore::in_dir(temp_dir.path(), "locale");
        fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        // a directory where the file should go
        let store = FileLocaleStore::new(temp_dir.path());
        let err = store.save("en").unwrap_err();
        assert!(matches!(err, I18nError::Persistence { source: Some(_), .. }));
    }
}
