//! Key-Value stores with automatic JSON serialization.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::CacheError;

/// A string-keyed store of JSON values.
///
/// Implementors only deal in [`serde_json::Value`]; the provided `get` and
/// `set` methods handle typed (de)serialization.
pub trait KvStore {
    /// Get the raw JSON value stored under `key`.
    fn get_value(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Store a raw JSON value under `key`, replacing any previous value.
    fn set_value(&self, key: &str, value: Value) -> Result<(), CacheError>;

    /// Delete `key`. Returns whether a value was present.
    fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Check whether `key` holds a value.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get_value(key)?.is_some())
    }

    /// Get a typed value.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// ```rust,ignore
    /// let location: Option<Location> = store.get("userLocation")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        Self: Sized,
    {
        match self.get_value(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Set a typed value.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        Self: Sized,
    {
        self.set_value(key, serde_json::to_value(value)?)
    }
}

/// In-memory store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Value>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::StoreError("memory store lock poisoned".to_string()))
    }
}

impl KvStore for MemoryStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_value(&self, key: &str, value: Value) -> Result<(), CacheError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.lock()?.remove(key).is_some())
    }
}

/// Store backed by a single JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`, creating parent directories as needed.
    ///
    /// The file itself is created lazily on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CacheError::OpenError(format!("{}: {}", parent.display(), e))
                })?;
            }
        }
        if path.is_dir() {
            return Err(CacheError::OpenError(format!(
                "{} is a directory",
                path.display()
            )));
        }
        debug!(path = %path.display(), "opened file store");
        Ok(Self {
            path,
            guard: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, CacheError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, Value>) -> Result<(), CacheError> {
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, CacheError> {
        self.guard
            .lock()
            .map_err(|_| CacheError::StoreError("file store lock poisoned".to_string()))
    }
}

impl KvStore for FileStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let _guard = self.lock()?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_value(&self, key: &str, value: Value) -> Result<(), CacheError> {
        let _guard = self.lock()?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let _guard = self.lock()?;
        let mut entries = self.read_all()?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.write_all(&entries)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
        pinned: bool,
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let note = Note {
            text: "hello".to_string(),
            pinned: true,
        };
        store.set("note", &note).unwrap();

        let loaded: Option<Note> = store.get("note").unwrap();
        assert_eq!(loaded, Some(note));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_missing_key() {
        let store = MemoryStore::new();
        let loaded: Option<Note> = store.get("missing").unwrap();
        assert!(loaded.is_none());
        assert!(!store.exists("missing").unwrap());
        assert!(!store.delete("missing").unwrap());
    }

    #[test]
    fn test_memory_store_type_mismatch() {
        let store = MemoryStore::new();
        store.set("note", &42).unwrap();
        let result: Result<Option<Note>, _> = store.get("note");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("count", &3).unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get::<i32>("count").unwrap(), Some(3));
        assert!(store.delete("count").unwrap());
        assert_eq!(store.get::<i32>("count").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert!(!store.exists("anything").unwrap());
    }

    #[test]
    fn test_file_store_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileStore::open(dir.path()),
            Err(CacheError::OpenError(_))
        ));
    }
}
