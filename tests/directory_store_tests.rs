// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Directory-backed store: one file per document.

mod common;

use common::test_dir_store;
use prehab_tracker::config::{Config, StorageKind};
use prehab_tracker::db::RecordStore;
use prehab_tracker::services::SessionManager;

#[tokio::test]
async fn test_documents_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = RecordStore::open_dir(dir.path()).await.unwrap();
        let sessions = SessionManager::new(store);
        sessions
            .register("ana@example.com", "pw", "Ana")
            .await
            .unwrap();
    }

    let store = RecordStore::open_dir(dir.path()).await.unwrap();
    let restored = SessionManager::new(store).restore().await.unwrap();
    assert_eq!(restored.session().unwrap().email, "ana@example.com");
}

#[tokio::test]
async fn test_unsafe_key_characters_round_trip() {
    let (dir, store) = test_dir_store().await;

    for key in ["../escape", "a/b", "spaces and ünicode", "appSettings_42"] {
        store.set(key, key).await.unwrap();
        assert_eq!(store.get(key).await.unwrap().as_deref(), Some(key));
    }

    // Nothing may be written outside the data directory
    let parent_entries = std::fs::read_dir(dir.path().parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().contains("escape"))
        .count();
    assert_eq!(parent_entries, 0);
}

#[tokio::test]
async fn test_remove_absent_key_succeeds() {
    let (_dir, store) = test_dir_store().await;
    store.remove("never-written").await.unwrap();
}

#[tokio::test]
async fn test_clear_removes_every_document() {
    let (dir, store) = test_dir_store().await;
    for i in 0..40 {
        store.set(&format!("doc{}", i), "{}").await.unwrap();
    }

    store.clear().await.unwrap();

    assert!(store.get("doc0").await.unwrap().is_none());
    let remaining = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn test_open_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().join("nested").join("data"),
        storage: StorageKind::Directory,
        ..Config::default()
    };

    let store = RecordStore::open(&config).await.unwrap();
    store.set("k", "v").await.unwrap();
    assert!(config.data_dir.join("k.json").exists());
}
