//! JSON-backed key/value store.
//!
//! The store is a flat JSON object kept in a single file. Every load reads
//! and parses the file again; nothing is cached between invocations.

use crate::error::{ConfigError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Flat mapping from key to arbitrary JSON value.
pub type Store = Map<String, Value>;

/// Whole-file blob access used by the handler.
pub trait BlobStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Real filesystem access. Missing parent directories are created on write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsBlobStore;

impl BlobStore for FsBlobStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, contents)
    }
}

/// In-memory blobs keyed by path.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(path, contents);
        store
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files_mut(|files| {
            files.insert(path.into(), contents.into());
        });
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        let mut found = None;
        self.files_mut(|files| found = files.get(path).cloned());
        found
    }

    pub fn len(&self) -> usize {
        let mut count = 0;
        self.files_mut(|files| count = files.len());
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn files_mut(&self, f: impl FnOnce(&mut HashMap<PathBuf, String>)) {
        match self.files.lock() {
            Ok(mut files) => f(&mut *files),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn exists(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.get(path).map(String::into_bytes).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.insert(path, contents);
        Ok(())
    }
}

/// Read and parse the store at `path`. Bytes that are not UTF-8 JSON are a
/// parse error, not an I/O error.
pub fn load(backend: &dyn BlobStore, path: &Path) -> Result<Store> {
    let content = backend
        .read(path)
        .map_err(|e| ConfigError::io(path, e))?;

    let value: Value = serde_json::from_slice(&content).map_err(|e| ConfigError::StoreParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Replace the whole file at `path` with `store`.
pub fn save(backend: &dyn BlobStore, path: &Path, store: &Store) -> Result<()> {
    let mut content = render(store)?;
    content.push('\n');
    backend
        .write(path, &content)
        .map_err(|e| ConfigError::io(path, e))
}

/// Pretty-printed JSON, as shown by `view` and written to disk.
pub fn render(store: &Store) -> Result<String> {
    Ok(serde_json::to_string_pretty(store)?)
}
