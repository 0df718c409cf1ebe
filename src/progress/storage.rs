//! Key-value persistence boundary.
//!
//! Each logical record is an opaque JSON document stored under a string key.
//! [`FileStore`] keeps one `<key>.json` file per record in a data directory;
//! [`MemoryStore`] keeps them in memory for tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::error::{StorageError, StorageResult};

/// Default data directory, relative to the home directory.
const DEFAULT_DATA_DIR: &str = ".hanma";

/// Extension of record files.
const RECORD_EXTENSION: &str = "json";

/// Trait for key-value storage implementations.
pub trait KeyValueStore {
    /// Returns the document stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous document.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the document under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Removes every document.
    fn clear(&self) -> StorageResult<()>;
}

// ============================================================================
// FileStore
// ============================================================================

/// File-backed store with one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(StorageError::DirectoryCreation)?;
        Ok(Self { dir })
    }

    /// Opens the store in `~/.hanma`.
    pub fn open_default() -> StorageResult<Self> {
        Self::open(default_data_dir()?)
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{RECORD_EXTENSION}"))
    }
}

/// Returns `~/.hanma`.
pub fn default_data_dir() -> StorageResult<PathBuf> {
    let home = dirs::home_dir().ok_or(StorageError::HomeDirectoryNotFound)?;
    Ok(home.join(DEFAULT_DATA_DIR))
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.record_path(key);
        let tmp = path.with_extension("json.tmp");
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn clear(&self) -> StorageResult<()> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StorageError::Read {
            key: "*".to_string(),
            source,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) {
                self.remove(key)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory store for testing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set`, `remove` and `clear` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `get` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Seeds a raw document, bypassing failure flags.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Returns the raw document under `key`, bypassing failure flags.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.lock().unwrap().get(key).cloned()
    }

    /// Returns the number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.insert_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        self.records.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        self.check_writable()?;
        self.records.lock().unwrap().clear();
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }
}

// ============================================================================
// Tests
// ============================================================================
