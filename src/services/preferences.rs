// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user preference state.

use crate::db::RecordStore;
use crate::error::Result;
use crate::models::{PreferenceUpdate, Preferences, SessionState};

/// Preferences of the signed-in user, always complete.
pub struct PreferenceStore {
    db: RecordStore,
    settings: Preferences,
}

impl PreferenceStore {
    pub fn new(db: RecordStore) -> Self {
        Self {
            db,
            settings: Preferences::default(),
        }
    }

    /// Load the session's stored preferences over the defaults.
    ///
    /// Anonymous sessions and missing or unreadable documents give the
    /// defaults.
    pub async fn load(&mut self, state: &SessionState) -> Result<&Preferences> {
        self.settings = match state.session() {
            Some(session) => self
                .db
                .get_preferences(&session.id)
                .await?
                .unwrap_or_default(),
            None => Preferences::default(),
        };
        Ok(&self.settings)
    }

    pub fn settings(&self) -> &Preferences {
        &self.settings
    }

    /// Merge `update` over the current settings and persist the result.
    pub async fn update(
        &mut self,
        state: &SessionState,
        update: PreferenceUpdate,
    ) -> Result<&Preferences> {
        let session = state.require()?;

        let mut merged = self.settings.clone();
        merged.apply(update);
        self.db.set_preferences(&session.id, &merged).await?;
        self.settings = merged;

        tracing::info!(user_id = %session.id, "Updated preferences");
        Ok(&self.settings)
    }

    /// Replace stored and in-memory preferences with the defaults.
    pub async fn reset(&mut self, state: &SessionState) -> Result<&Preferences> {
        let session = state.require()?;

        let defaults = Preferences::default();
        self.db.set_preferences(&session.id, &defaults).await?;
        self.settings = defaults;

        tracing::info!(user_id = %session.id, "Reset preferences");
        Ok(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Session, Units};

    fn signed_in() -> SessionState {
        SessionState::Authenticated(Session {
            id: "1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            injuries: vec![],
        })
    }

    #[tokio::test]
    async fn test_anonymous_gets_defaults() {
        let mut prefs = PreferenceStore::new(RecordStore::in_memory());
        let loaded = prefs.load(&SessionState::Anonymous).await.unwrap();
        assert_eq!(*loaded, Preferences::default());
    }

    #[tokio::test]
    async fn test_update_requires_session() {
        let mut prefs = PreferenceStore::new(RecordStore::in_memory());
        let result = prefs
            .update(&SessionState::Anonymous, PreferenceUpdate::default())
            .await;
        assert!(matches!(result, Err(AppError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_reset_overwrites_stored_settings() {
        let store = RecordStore::in_memory();
        let state = signed_in();
        let mut prefs = PreferenceStore::new(store.clone());

        prefs
            .update(
                &state,
                PreferenceUpdate {
                    units: Some(Units::Imperial),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        prefs.reset(&state).await.unwrap();

        let mut reloaded = PreferenceStore::new(store);
        assert_eq!(*reloaded.load(&state).await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_offline_load_fails() {
        let mut prefs = PreferenceStore::new(RecordStore::new_mock());
        assert!(prefs.load(&signed_in()).await.is_err());
    }
}
