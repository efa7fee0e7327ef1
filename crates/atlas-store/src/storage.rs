//! # Key-Value Storage
//!
//! The durable facility the cart is written to. It behaves like browser
//! local storage: string keys, string values, whole-value overwrites.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStorage                                      │
//! │                                                                         │
//! │  MemoryStorage                        FileStorage                       │
//! │  ─────────────                        ───────────                       │
//! │  Shared map (clones see the           <dir>/<key>.json                  │
//! │  same data), optional quota,          each write goes to its own temp   │
//! │  can be switched off to               file, is synced, then renamed     │
//! │  simulate disabled storage            over the target                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers of a `FileStorage` key see either the previous record or the new
//! one, never a mix, even with several writers (processes) on one directory.
//! Concurrent writers still race: the last rename wins.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::Builder;
use tracing::{debug, trace};

use crate::error::{StoreError, StoreResult};

/// A string key-value store.
///
/// `get` returns `Ok(None)` for a key that was never written (or was
/// removed); that is not an error.
pub trait KeyValueStorage: Send {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Storage
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses any value longer than `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        MemoryStorage {
            inner: Arc::new(Mutex::new(MemoryInner {
                quota: Some(limit),
                ..MemoryInner::default()
            })),
        }
    }

    /// Switches the storage off (every call fails) or back on.
    pub fn set_disabled(&self, disabled: bool) -> StoreResult<()> {
        self.lock_raw()?.disabled = disabled;
        Ok(())
    }

    /// Writes a raw value regardless of quota or disabled state.
    pub fn seed(&self, key: &str, value: &str) -> StoreResult<()> {
        self.lock_raw()?
            .entries
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn lock_raw(&self) -> StoreResult<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory storage lock poisoned".to_string()))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, MemoryInner>> {
        let inner = self.lock_raw()?;
        if inner.disabled {
            return Err(StoreError::Unavailable("storage is disabled".to_string()));
        }
        Ok(inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut inner = self.lock()?;

        if let Some(limit) = inner.quota {
            if value.len() > limit {
                return Err(StoreError::QuotaExceeded {
                    size: value.len(),
                    limit,
                });
            }
        }

        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.lock()?.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` for storage. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => {
                trace!(?path, bytes = value.len(), "Read storage file");
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;

        let path = self.path_for(key);
        let mut tmp = Builder::new()
            .prefix(&format!(".{}.", key))
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(|e| StoreError::io(&self.dir, e))?;

        tmp.write_all(value.as_bytes())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| StoreError::io(&path, e.error))?;

        debug!(?path, bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));

        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_memory_storage_clones_share_data() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("cart", "{}").unwrap();
        assert_eq!(other.get("cart").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_memory_storage_quota() {
        let storage = MemoryStorage::with_quota(4);
        assert!(storage.set("cart", "1234").is_ok());

        let err = storage.set("cart", "12345").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { size: 5, limit: 4 }));
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn test_memory_storage_disabled() {
        let storage = MemoryStorage::new();
        storage.set_disabled(true).unwrap();

        assert!(matches!(storage.get("cart"), Err(StoreError::Unavailable(_))));
        assert!(matches!(storage.set("cart", "[]"), Err(StoreError::Unavailable(_))));

        storage.set_disabled(false).unwrap();
        assert!(storage.set("cart", "[]").is_ok());
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", r#"{"items":[]}"#).unwrap();
        assert!(storage.path_for("cart").exists());
        assert_eq!(
            storage.get("cart").unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );

        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_file_storage_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for n in 0..5 {
            storage.set("cart", &format!("[{}]", n)).unwrap();
        }

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("cart.json")]);
    }

    #[test]
    fn test_file_storage_concurrent_writers_never_publish_partial_record() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        let done = Arc::new(AtomicBool::new(false));

        // Large enough that a single write takes several syscalls.
        let record = |fill: char| {
            let name: String = std::iter::repeat(fill).take(200_000).collect();
            serde_json::json!({ "items": [{ "id": "p", "name": name }] }).to_string()
        };

        let writers: Vec<_> = ['a', 'b']
            .into_iter()
            .map(|fill| {
                let storage = FileStorage::new(dir.path());
                let value = record(fill);
                thread::spawn(move || {
                    for _ in 0..40 {
                        storage.set("cart", &value).unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let storage = FileStorage::new(dir.path());
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut torn = 0;
                while !done.load(Ordering::SeqCst) {
                    if let Some(raw) = storage.get("cart").unwrap() {
                        if serde_json::from_str::<serde_json::Value>(&raw).is_err() {
                            torn += 1;
                        }
                    }
                }
                torn
            })
        };

        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::SeqCst);

        assert_eq!(reader.join().unwrap(), 0);
        let last: serde_json::Value =
            serde_json::from_str(&FileStorage::new(dir.path()).get("cart").unwrap().unwrap())
                .unwrap();
        assert_eq!(last["items"][0]["id"], "p");
    }

    #[test]
    fn test_file_storage_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let storage = FileStorage::new(&blocker);
        let err = storage.set("cart", "[]").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
