//! Score store backends.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::StoreError;

/// Persistence capability for integer scores.
pub trait ScoreStore {
    /// Read the score stored under `key`, if any.
    fn get_high_score(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Overwrite the score stored under `key`.
    fn set_high_score(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn get_high_score(&self, key: &str) -> Result<Option<u32>, StoreError> {
        (**self).get_high_score(key)
    }

    fn set_high_score(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).set_high_score(key, value)
    }
}

/// In-memory store holding raw string values, like browser local storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored string for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store an arbitrary string, bypassing score formatting.
    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Drop a key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

impl ScoreStore for MemoryStore {
    fn get_high_score(&self, key: &str) -> Result<Option<u32>, StoreError> {
        self.entries
            .get(key)
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|_| StoreError::Corrupt {
                    key: key.to_string(),
                    value: raw.clone(),
                })
            })
            .transpose()
    }

    fn set_high_score(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Scores kept in a JSON object on disk.
///
/// The file is read on every `get` and rewritten on every `set`. A
/// missing file reads as empty.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl ScoreStore for FileStore {
    fn get_high_score(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.load()?.get(key).copied())
    }

    fn set_high_score(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}
