//! Key-value persistence boundary for presets and search history.
//!
//! The core only ever needs get/set/remove over string values. Absence and
//! corruption degrade to "nothing stored"; write failures report `false` and
//! are logged, never thrown, because losing a convenience feature must not
//! block browsing.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use crate::app_dirs;

/// Minimal string store contract shared by all persistence consumers.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Best-effort write; `false` means the value was not persisted.
    fn set(&mut self, key: &str, value: &str) -> bool;
    fn remove(&mut self, key: &str) -> bool;
}

/// One file per key under a directory, typically the app data dir.
#[derive(Debug)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open the store under the platform data directory.
    pub fn for_app() -> Result<Self> {
        Self::open(app_dirs::get_data_dir()?)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        let path = self.path_for(key);
        match fs::write(&path, value) {
            Ok(()) => true,
            Err(err) => {
                warn!(path = %path.display(), %err, "storage write failed");
                false
            }
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
            Err(err) => {
                warn!(path = %path.display(), %err, "storage remove failed");
                false
            }
        }
    }
}

/// In-memory store for tests, with a switch to make writes fail so
/// best-effort paths can be exercised.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    pub fail_writes: bool,
}

impl MemoryKvStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        if self.fail_writes {
            return false;
        }
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        if self.fail_writes {
            return false;
        }
        self.entries.remove(key);
        true
    }
}
