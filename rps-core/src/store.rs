//! Persisted key-value storage for the best streak.
//!
//! Values are strings, like browser local storage. Reading the best streak
//! never fails: a missing, unreadable or malformed entry counts as 0.
//! A file written by hand with `{"bestStreak": 9}` still loads as 9.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

/// Key the best streak is stored under.
pub const BEST_STREAK_KEY: &str = "bestStreak";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {path} is not a JSON object: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A string key-value store that outlives the session.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding a single entry, handy for seeding a session.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// A missing file reads as empty. Every `set` rewrites the whole file and
/// keeps the keys it did not touch. Number values read back as their digits.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store over the file at `path`; nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this store reads and rewrites.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

/// Text form of a stored value. `null` counts as absent.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key).and_then(value_text))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StoreError::Malformed { path, source }) => {
                warn!(path = %path.display(), error = %source, "replacing unparseable store file");
                Map::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), Value::String(value.to_string()));

        let body = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Reads and writes the persisted best streak.
pub struct BestStreakRecord;

impl BestStreakRecord {
    /// Load the best streak, treating anything unusable as 0.
    pub fn load(store: &dyn KeyValueStore) -> u32 {
        match store.get(BEST_STREAK_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(best) => {
                    info!(best, "loaded best streak");
                    best
                }
                Err(e) => {
                    warn!(value = %raw, error = %e, "ignoring malformed best streak");
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                warn!(error = %e, "could not read best streak, starting from 0");
                0
            }
        }
    }

    /// Write `best` as its decimal string.
    pub fn save(store: &mut dyn KeyValueStore, best: u32) -> Result<(), StoreError> {
        store.set(BEST_STREAK_KEY, &best.to_string())
    }
}
