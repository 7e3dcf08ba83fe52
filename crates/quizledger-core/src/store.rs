//! Durable key-value media the ledger persists into.
//!
//! The ledger only needs get/set/remove by string key with values that are
//! already serialized JSON. Two media are provided: an in-memory map and a
//! directory of JSON files, one per key.

use std::collections::HashMap;
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// The four independently stored ledger entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    User,
    QuizAttempts,
    UserStats,
    WeeklyPoints,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::User,
        StorageKey::QuizAttempts,
        StorageKey::UserStats,
        StorageKey::WeeklyPoints,
    ];

    /// The key string written to the medium.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::User => "quiz_app_user",
            StorageKey::QuizAttempts => "quiz_app_attempts",
            StorageKey::UserStats => "quiz_app_stats",
            StorageKey::WeeklyPoints => "quiz_app_weekly_points",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synchronous string-keyed store of serialized values.
pub trait KeyValueStore {
    /// Read the value under `key`; `Ok(None)` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a uniquely named temporary file in the same directory which
/// is then renamed over the target, so a reader sees either the old value or
/// the new one and concurrent writers of one key end with the last rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            key: key.to_string(),
            source,
        };
        let mut tmp = tempfile::Builder::new()
            .prefix(&format!(".{key}."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                key: key.to_string(),
                source,
            }),
        }
    }
}
