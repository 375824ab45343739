// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Prehab-Tracker: injury-aware rehabilitation workouts
//!
//! This crate provides the data core of a prehab app: local accounts and
//! sessions, a per-user workout catalog filtered by declared injuries,
//! progress statistics and per-user preferences, all persisted in a local
//! key-value document store.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

use config::Config;
use db::RecordStore;
use services::{PreferenceStore, SessionManager, WorkoutCatalog};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: RecordStore,
    pub sessions: SessionManager,
}

impl AppState {
    /// Open the configured store and build the services on top of it.
    pub async fn open(config: Config) -> error::Result<Self> {
        let db = RecordStore::open(&config).await?;
        Ok(Self {
            sessions: SessionManager::new(db.clone()),
            config,
            db,
        })
    }

    pub fn catalog(&self) -> WorkoutCatalog {
        WorkoutCatalog::new(self.db.clone())
    }

    pub fn preferences(&self) -> PreferenceStore {
        PreferenceStore::new(self.db.clone())
    }
}
