//! Persistence: the key-value capability and the sync adapter.
//!
//! The backend is an injected capability (`KvStore`: get/set over strings),
//! never a global, so tests substitute an in-memory fake. `PersistedStore`
//! layers the synchronization contract on top: load once at construction,
//! write on every subsequent value change, and never let a failing backend
//! into the mutation path.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::lock::{self, DEFAULT_LOCK_TIMEOUT_MS};

/// Storage key for the task sequence - the single logical record.
pub const TASKS_KEY: &str = "tasks";

/// String-keyed store capability. The persistence backend behind the
/// adapter; implementations only need best-effort durability.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// HashMap-backed store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a data directory. Writes are atomic and guarded
/// by an advisory lock so concurrent invocations cannot interleave.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory for the default storage location.
    pub fn default_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "tasks").ok_or_else(|| {
            Error::OperationFailed("could not determine a data directory".to_string())
        })?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.file_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        lock::write_atomic_locked(self.file_path(key), value.as_bytes(), DEFAULT_LOCK_TIMEOUT_MS)
    }
}

/// Load-once/write-on-change adapter between an in-memory value and a
/// `KvStore` record.
///
/// Guarantees:
/// - the backend is read at most once per key per process lifetime, at
///   construction; absent or unparseable data falls back to the supplied
///   default, and the fallback load never writes back;
/// - each logical value change is written at most once; setting an equal
///   value writes nothing;
/// - write failures are swallowed (warn log) - the in-memory value stays
///   authoritative for the session and the mutation path never fails.
pub struct PersistedStore<T, S> {
    store: S,
    key: String,
    value: T,
}

impl<T, S> PersistedStore<T, S>
where
    T: Serialize + DeserializeOwned + PartialEq,
    S: KvStore,
{
    /// Loads the value for `key`, falling back to `default` on absence or
    /// parse failure.
    pub fn open(store: S, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(%key, error = %err, "discarding unreadable persisted value");
                    default
                }
            },
            None => default,
        };
        Self { store, key, value }
    }

    /// Current in-memory value - authoritative for the session.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Replaces the value, persisting it if it actually changed. Backend
    /// failures are logged and dropped; the new value is kept regardless.
    pub fn set(&mut self, next: T) {
        if next == self.value {
            return;
        }
        match serde_json::to_string(&next) {
            Ok(raw) => {
                if let Err(err) = self.store.set(&self.key, &raw) {
                    tracing::warn!(key = %self.key, error = %err, "persist failed; keeping in-memory value");
                }
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "serialize failed; keeping in-memory value");
            }
        }
        self.value = next;
    }

    /// Applies a snapshot transform and persists the result.
    pub fn update(&mut self, transform: impl FnOnce(&T) -> T) {
        let next = transform(&self.value);
        self.set(next);
    }

    /// Consumes the adapter, returning the backend store.
    pub fn into_store(self) -> S {
        self.store
    }
}
