use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Key-value persistence port. Keys are file names such as `settings.json`.
pub trait Store {
    /// Contents stored under `key`, or `None` if nothing was saved yet
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, contents: &str) -> Result<()>;
}

/// Stores each key as a file inside one directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.path(key);
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// In-memory store, handy for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Store whose reads and writes always fail
#[cfg(test)]
pub(crate) struct BrokenStore;

#[cfg(test)]
impl Store for BrokenStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        anyhow::bail!("cannot read {key}")
    }

    fn write(&self, key: &str, _contents: &str) -> Result<()> {
        anyhow::bail!("cannot write {key}")
    }
}
