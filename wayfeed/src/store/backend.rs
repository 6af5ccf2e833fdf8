//! Storage backends for the persistent store adapter.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;

/// Raw key/value storage a [`Store`](super::Store) persists collections to.
///
/// This is the crate's stand-in for browser local storage: opaque string
/// payloads addressed by collection key.
pub trait StoreBackend {
    /// Read the payload stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `payload` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError>;
}

/// File-per-key backend rooted at a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if necessary) a file store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StoreBackend for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        fs::write(self.path_for(key), payload)?;
        Ok(())
    }
}

/// In-memory backend, mainly for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, e.g. to simulate an existing or corrupt payload.
    pub fn with_entry(mut self, key: impl Into<String>, payload: impl Into<String>) -> Self {
        self.entries.insert(key.into(), payload.into());
        self
    }
}

impl StoreBackend for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
