use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use jobscan_logging::{scan_info, scan_warn};
use thiserror::Error;

use crate::persist::{AtomicFile, PersistError};

/// Key under which the keyword list is stored.
pub const KEYWORDS_KEY: &str = "keywords";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("store file is not a JSON object of strings: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
}

/// String key/value persistence, the shape of a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Key/value store kept as one JSON object in a file.
#[derive(Debug)]
pub struct JsonFileStore {
    file: AtomicFile,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(file: AtomicFile) -> Self {
        Self {
            file,
            write_lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match self.file.read()? {
            Some(text) => serde_json::from_str(&text).map_err(StoreError::Corrupt),
            None => Ok(BTreeMap::new()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(StoreError::Corrupt(err)) => {
                scan_warn!(
                    "Replacing unreadable store {:?}: {}",
                    self.file.path(),
                    err
                );
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        map.insert(key.to_string(), value);
        let content = serde_json::to_string_pretty(&map).map_err(StoreError::Encode)?;
        self.file.write(&content)?;
        Ok(())
    }
}

/// In-memory store used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Reads and writes the keyword list as a JSON-encoded array under [`KEYWORDS_KEY`].
pub struct KeywordStore<S> {
    store: S,
}

impl<S: KeyValueStore> KeywordStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads the persisted keywords. Missing, unreadable or malformed state
    /// yields an empty list; problems are logged, never returned.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(KEYWORDS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                scan_warn!("Failed to read persisted keywords: {}", err);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(keywords) => {
                scan_info!("Loaded {} persisted keywords", keywords.len());
                keywords
            }
            Err(err) => {
                scan_warn!("Ignoring malformed persisted keywords: {}", err);
                Vec::new()
            }
        }
    }

    pub fn save(&self, keywords: &[String]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(keywords).map_err(StoreError::Encode)?;
        self.store.set(KEYWORDS_KEY, encoded)
    }
}
