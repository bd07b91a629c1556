//! Local key-value store for client-side persisted state
//!
//! Holds the auth token and the selected platform id. Writes are not
//! transactional: the last write wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{ClientError, Result};

/// Key holding the bearer token for unscoped calls
pub const TOKEN_KEY: &str = "omnicloud_token";

/// Key holding the selected platform id (string-encoded integer)
pub const SELECTED_PLATFORM_KEY: &str = "selectedPlatformId";

/// Persistent string key-value store
pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

/// In-process store, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk.
///
/// The whole file is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| storage_error(&path, e))?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Default location: `$OMNICLOUD_HOME/state.json`, else `~/.omnicloud/state.json`
    pub fn default_path() -> PathBuf {
        if let Ok(home) = std::env::var("OMNICLOUD_HOME") {
            return PathBuf::from(home).join("state.json");
        }
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".omnicloud").join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_error(parent, e))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| storage_error(&self.path, e))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

fn storage_error(path: &Path, err: std::io::Error) -> ClientError {
    ClientError::Storage(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "abc")]);
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        store.set(SELECTED_PLATFORM_KEY, "3").unwrap();
        assert_eq!(store.get(SELECTED_PLATFORM_KEY).as_deref(), Some("3"));

        store.remove(TOKEN_KEY).unwrap();
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = FileStore::open(&path).unwrap();
        assert!(store.get(SELECTED_PLATFORM_KEY).is_none());
        store.set(SELECTED_PLATFORM_KEY, "5").unwrap();
        store.set(TOKEN_KEY, "secret").unwrap();
        store.remove(TOKEN_KEY).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(SELECTED_PLATFORM_KEY).as_deref(), Some("5"));
        assert!(reopened.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStore::open(&path), Err(ClientError::Decode(_))));
    }
}
