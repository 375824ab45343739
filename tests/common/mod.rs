// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use prehab_tracker::db::RecordStore;
use prehab_tracker::models::{Session, SessionState};
use prehab_tracker::services::SessionManager;
use tempfile::TempDir;

/// Create a process-local store.
#[allow(dead_code)]
pub fn test_store() -> RecordStore {
    RecordStore::in_memory()
}

/// Create an offline store; every operation fails.
#[allow(dead_code)]
pub fn test_store_offline() -> RecordStore {
    RecordStore::new_mock()
}

/// Create a directory-backed store in a fresh temporary directory.
///
/// The directory lives as long as the returned guard.
#[allow(dead_code)]
pub async fn test_dir_store() -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = RecordStore::open_dir(dir.path())
        .await
        .expect("Failed to open directory store");
    (dir, store)
}

/// Register an account and return its session.
#[allow(dead_code)]
pub async fn register(sessions: &SessionManager, email: &str) -> SessionState {
    sessions
        .register(email, "hunter2", "Test User")
        .await
        .expect("Registration should succeed")
}

/// The session inside an authenticated state.
#[allow(dead_code)]
pub fn session_of(state: &SessionState) -> &Session {
    state.session().expect("Expected a signed-in session")
}
