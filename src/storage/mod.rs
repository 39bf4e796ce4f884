//! Preset persistence.
//!
//! - [`FilePresetStorage`]: one JSON file per key in a directory
//! - [`MemoryPresetStorage`]: in-process map, for headless runs

mod error;

pub use error::StorageError;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use crate::sync::PresetStorage;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FilePresetStorage {
    dir: PathBuf,
}

impl FilePresetStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl PresetStorage for FilePresetStorage {
    fn persist(&mut self, key: &str, blob: &Value) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let content = serde_json::to_string_pretty(blob).map_err(|source| StorageError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "presets persisted");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        let value = serde_json::from_str(&content).map_err(|source| StorageError::Json {
            path: path.clone(),
            source,
        })?;
        Ok(Some(value))
    }
}

/// Keeps blobs in memory. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPresetStorage {
    blobs: Rc<RefCell<HashMap<String, Value>>>,
}

impl MemoryPresetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl PresetStorage for MemoryPresetStorage {
    fn persist(&mut self, key: &str, blob: &Value) -> Result<(), StorageError> {
        self.blobs.borrow_mut().insert(key.to_string(), blob.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.get(key))
    }
}
