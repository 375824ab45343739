// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key-value document store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (account list, passwords included)
//! - Current user (session projection)
//! - Workouts (per-user workout lists)
//! - App settings (per-user preference documents)
//!
//! Raw documents are opaque strings. Typed reads never fail on bad data:
//! a document that does not decode is logged and treated as absent.

use crate::config::{Config, StorageKind};
use crate::db::{documents, keys};
use crate::error::{AppError, Result};
use crate::models::{Preferences, Session, UserAccount, WorkoutRecord};
use dashmap::DashMap;
use futures_util::{stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

const MAX_CONCURRENT_FILE_OPS: usize = 16;

/// Per-key mutexes serializing read-modify-write sequences.
pub type KeyLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

#[derive(Clone)]
enum Backend {
    Memory(Arc<DashMap<String, String>>),
    Directory(Arc<PathBuf>),
}

/// One write of a multi-document commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedWrite {
    pub key: String,
    /// Document payload; `None` removes the key
    pub data: Option<Value>,
}

impl StagedWrite {
    /// Stage `value` to be written under `key`.
    pub fn put<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Result<Self> {
        let data = serde_json::to_value(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to stage document: {}", e)))?;
        Ok(Self {
            key: key.into(),
            data: Some(data),
        })
    }

    /// Stage removal of `key`.
    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            data: None,
        }
    }
}

/// Document store client.
#[derive(Clone)]
pub struct RecordStore {
    backend: Option<Backend>,
    key_locks: KeyLocks,
}

impl RecordStore {
    /// Open the backend selected by the configuration.
    pub async fn open(config: &Config) -> Result<Self> {
        match config.storage {
            StorageKind::Memory => Ok(Self::in_memory()),
            StorageKind::Directory => Self::open_dir(&config.data_dir).await,
        }
    }

    /// Create a process-local store.
    pub fn in_memory() -> Self {
        Self {
            backend: Some(Backend::Memory(Arc::new(DashMap::new()))),
            key_locks: Arc::new(DashMap::new()),
        }
    }

    /// Open (creating if needed) a store with one file per key under `dir`.
    ///
    /// A multi-document commit interrupted by a crash is replayed here.
    pub async fn open_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            AppError::StorageUnavailable(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let store = Self {
            backend: Some(Backend::Directory(Arc::new(dir.to_path_buf()))),
            key_locks: Arc::new(DashMap::new()),
        };

        let replayed = store.recover().await?;
        tracing::info!(path = %dir.display(), replayed, "Opened record store");

        Ok(store)
    }

    /// Create an offline store for testing.
    ///
    /// All operations will return `StorageUnavailable`.
    pub fn new_mock() -> Self {
        Self {
            backend: None,
            key_locks: Arc::new(DashMap::new()),
        }
    }

    /// Helper to get the backend or return an error if offline.
    fn get_backend(&self) -> Result<&Backend> {
        self.backend
            .as_ref()
            .ok_or_else(|| AppError::StorageUnavailable("Store not opened (offline mode)".to_string()))
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        self.key_locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Hold a named lock spanning several store operations.
    ///
    /// Names live apart from document keys, so the holder can still use
    /// `update_document` and `commit_staged` on any key.
    pub async fn exclusive(&self, name: &str) -> OwnedMutexGuard<()> {
        self.lock_for(&format!("exclusive:{}", name))
            .lock_owned()
            .await
    }

    // ─── Raw Operations ──────────────────────────────────────────

    /// Read the raw document stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.get_backend()? {
            Backend::Memory(map) => Ok(map.get(key).map(|v| v.value().clone())),
            Backend::Directory(dir) => {
                let path = document_path(dir, key);
                match tokio::fs::read_to_string(&path).await {
                    Ok(raw) => Ok(Some(raw)),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(AppError::StorageUnavailable(format!(
                        "Failed to read {}: {}",
                        key, e
                    ))),
                }
            }
        }
    }

    /// Replace the raw document stored under `key`.
    pub async fn set(&self, key: &str, raw: &str) -> Result<()> {
        match self.get_backend()? {
            Backend::Memory(map) => {
                map.insert(key.to_string(), raw.to_string());
            }
            Backend::Directory(dir) => {
                let path = document_path(dir, key);
                let tmp = dir.join(format!(".{}.tmp", urlencoding::encode(key)));
                tokio::fs::write(&tmp, raw).await.map_err(|e| {
                    AppError::StorageUnavailable(format!("Failed to write {}: {}", key, e))
                })?;
                tokio::fs::rename(&tmp, &path).await.map_err(|e| {
                    AppError::StorageUnavailable(format!("Failed to replace {}: {}", key, e))
                })?;
            }
        }
        tracing::debug!(key, bytes = raw.len(), "Stored document");
        Ok(())
    }

    /// Remove `key`; removing an absent key succeeds.
    pub async fn remove(&self, key: &str) -> Result<()> {
        match self.get_backend()? {
            Backend::Memory(map) => {
                map.remove(key);
            }
            Backend::Directory(dir) => match tokio::fs::remove_file(document_path(dir, key)).await
            {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(AppError::StorageUnavailable(format!(
                        "Failed to remove {}: {}",
                        key, e
                    )))
                }
            },
        }
        tracing::debug!(key, "Removed document");
        Ok(())
    }

    /// Remove every document.
    pub async fn clear(&self) -> Result<()> {
        match self.get_backend()? {
            Backend::Memory(map) => map.clear(),
            Backend::Directory(dir) => {
                let mut entries = tokio::fs::read_dir(dir.as_path()).await?;
                let mut paths = Vec::new();
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "json") {
                        paths.push(path);
                    }
                }

                stream::iter(paths)
                    .map(|path| async move { tokio::fs::remove_file(path).await })
                    .buffer_unordered(MAX_CONCURRENT_FILE_OPS)
                    .collect::<Vec<std::io::Result<()>>>()
                    .await
                    .into_iter()
                    .collect::<std::io::Result<Vec<()>>>()?;
            }
        }
        tracing::info!("Cleared record store");
        Ok(())
    }

    // ─── Typed Documents ─────────────────────────────────────────

    /// Read and decode a document; undecodable documents read as absent.
    pub async fn read_document<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get(key).await? else {
            return Ok(None);
        };

        match documents::decode(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding undecodable document");
                Ok(None)
            }
        }
    }

    /// Encode and write a document, serialized with other writers of `key`.
    pub async fn write_document<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = documents::encode(value)?;
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;
        self.set(key, &raw).await
    }

    /// Read-modify-write a document while holding the key's lock.
    ///
    /// An absent or undecodable document starts from `T::default()`. When `f`
    /// fails nothing is written.
    pub async fn update_document<T, R, F>(&self, key: &str, f: F) -> Result<R>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> Result<R>,
    {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        let mut doc: T = self.read_document(key).await?.unwrap_or_default();
        let result = f(&mut doc)?;
        self.set(key, &documents::encode(&doc)?).await?;

        Ok(result)
    }

    // ─── Staged Multi-Document Writes ────────────────────────────

    /// Apply several writes so that an interruption can be repaired.
    ///
    /// The full write set is journaled under `keys::STAGED_WRITES` before any
    /// target is touched and removed once all of them are applied. `recover`
    /// replays a journal left behind.
    pub async fn commit_staged(&self, writes: Vec<StagedWrite>) -> Result<()> {
        let mut lock_keys: Vec<&str> = writes.iter().map(|w| w.key.as_str()).collect();
        lock_keys.sort_unstable();
        lock_keys.dedup();

        // Acquire in key order
        let locks: Vec<Arc<Mutex<()>>> = lock_keys.iter().map(|k| self.lock_for(k)).collect();
        let mut guards = Vec::with_capacity(locks.len());
        for lock in &locks {
            guards.push(lock.lock().await);
        }

        self.set(keys::STAGED_WRITES, &documents::encode(&writes)?)
            .await?;
        self.apply_staged(&writes).await?;
        self.remove(keys::STAGED_WRITES).await?;

        tracing::debug!(writes = writes.len(), "Committed staged writes");
        Ok(())
    }

    /// Replay an interrupted commit, if any. Returns the number of writes replayed.
    pub async fn recover(&self) -> Result<usize> {
        let Some(raw) = self.get(keys::STAGED_WRITES).await? else {
            return Ok(0);
        };

        let writes: Vec<StagedWrite> = match documents::decode(&raw) {
            Ok(writes) => writes,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping undecodable staged write journal");
                self.remove(keys::STAGED_WRITES).await?;
                return Ok(0);
            }
        };

        self.apply_staged(&writes).await?;
        self.remove(keys::STAGED_WRITES).await?;

        tracing::warn!(writes = writes.len(), "Replayed interrupted staged writes");
        Ok(writes.len())
    }

    async fn apply_staged(&self, writes: &[StagedWrite]) -> Result<()> {
        for write in writes {
            match &write.data {
                Some(data) => self.set(&write.key, &documents::encode(data)?).await?,
                None => self.remove(&write.key).await?,
            }
        }
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get the account list (empty when absent or undecodable).
    pub async fn get_users(&self) -> Result<Vec<UserAccount>> {
        Ok(self.read_document(keys::USERS).await?.unwrap_or_default())
    }

    /// Replace the account list.
    pub async fn set_users(&self, users: &[UserAccount]) -> Result<()> {
        self.write_document(keys::USERS, users).await
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Get the stored session projection.
    pub async fn get_current_user(&self) -> Result<Option<Session>> {
        self.read_document(keys::CURRENT_USER).await
    }

    /// Store the session projection.
    pub async fn set_current_user(&self, session: &Session) -> Result<()> {
        self.write_document(keys::CURRENT_USER, session).await
    }

    /// Forget the session projection.
    pub async fn clear_current_user(&self) -> Result<()> {
        self.remove(keys::CURRENT_USER).await
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a user's workout list; `None` when never saved or undecodable.
    pub async fn get_workouts(&self, user_id: &str) -> Result<Option<Vec<WorkoutRecord>>> {
        self.read_document(&keys::workouts(user_id)).await
    }

    /// Replace a user's workout list.
    pub async fn set_workouts(&self, user_id: &str, workouts: &[WorkoutRecord]) -> Result<()> {
        self.write_document(&keys::workouts(user_id), workouts).await
    }

    /// Delete a user's workout list and the legacy global list.
    pub async fn delete_workouts(&self, user_id: &str) -> Result<()> {
        self.remove(keys::LEGACY_WORKOUTS).await?;
        self.remove(&keys::workouts(user_id)).await
    }

    // ─── Preference Operations ───────────────────────────────────

    /// Get a user's preferences merged over the defaults.
    ///
    /// `None` when nothing usable is stored.
    pub async fn get_preferences(&self, user_id: &str) -> Result<Option<Preferences>> {
        let key = keys::app_settings(user_id);
        let Some(raw) = self.get(&key).await? else {
            return Ok(None);
        };

        match documents::decode_value(&raw) {
            Ok(Value::Object(stored)) => Ok(Some(Preferences::merged_over_defaults(&stored))),
            Ok(other) => {
                tracing::warn!(key = %key, kind = json_kind(&other), "Preference document is not an object");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding undecodable preferences");
                Ok(None)
            }
        }
    }

    /// Replace a user's preferences.
    pub async fn set_preferences(&self, user_id: &str, prefs: &Preferences) -> Result<()> {
        self.write_document(&keys::app_settings(user_id), prefs).await
    }
}

/// File holding `key`; keys are URL-encoded so any string is a safe name.
fn document_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", urlencoding::encode(key)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
