// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user workout catalog.
//!
//! The stored list is always the full catalog. The injury filter is applied
//! when reading, so it holds after a reset as well as after a load:
//! - no injuries declared: every workout is visible
//! - injuries declared: only workouts tagged with at least one of them

use crate::db::RecordStore;
use crate::error::Result;
use crate::models::{sample_workouts, ProgressStats, SessionState, WorkoutRecord};
use chrono::{DateTime, NaiveDate, Utc};

/// A user's workout list, loaded for the current session.
pub struct WorkoutCatalog {
    db: RecordStore,
    /// Owner of `workouts`; `None` when nothing is loaded
    user_id: Option<String>,
    injuries: Vec<String>,
    workouts: Vec<WorkoutRecord>,
    is_loading: bool,
}

impl WorkoutCatalog {
    pub fn new(db: RecordStore) -> Self {
        Self {
            db,
            user_id: None,
            injuries: Vec::new(),
            workouts: Vec::new(),
            is_loading: false,
        }
    }

    /// Load the catalog for the session, seeding it from the sample set on
    /// first use. An anonymous session empties the catalog.
    pub async fn load(&mut self, state: &SessionState) -> Result<()> {
        let Some(session) = state.session() else {
            self.clear();
            return Ok(());
        };

        self.is_loading = true;
        let stored = self.db.get_workouts(&session.id).await;
        self.is_loading = false;

        let workouts = match stored? {
            Some(workouts) => workouts,
            None => {
                tracing::debug!(user_id = %session.id, "Seeding workouts from sample catalog");
                sample_workouts()
            }
        };

        self.user_id = Some(session.id.clone());
        self.injuries = session.injuries.clone();
        self.workouts = workouts;

        tracing::info!(
            user_id = %session.id,
            total = self.workouts.len(),
            visible = self.workouts().len(),
            "Loaded workouts"
        );
        Ok(())
    }

    /// Drop everything loaded.
    pub fn clear(&mut self) {
        self.user_id = None;
        self.injuries.clear();
        self.workouts.clear();
        self.is_loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Workouts visible to the user after the injury filter.
    pub fn workouts(&self) -> Vec<&WorkoutRecord> {
        self.workouts
            .iter()
            .filter(|w| self.injuries.is_empty() || w.applies_to(&self.injuries))
            .collect()
    }

    /// The full stored list, ignoring the injury filter.
    pub fn all_workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    /// Look up a visible workout.
    pub fn find(&self, id: &str) -> Option<&WorkoutRecord> {
        self.workouts().into_iter().find(|w| w.id == id)
    }

    /// Statistics over the visible workouts as of `today`.
    pub fn progress(&self, today: NaiveDate) -> ProgressStats {
        let visible: Vec<WorkoutRecord> = self.workouts().into_iter().cloned().collect();
        ProgressStats::compute(&visible, today)
    }

    /// Mark a workout completed now. See [`Self::complete_workout_at`].
    pub async fn complete_workout(&mut self, state: &SessionState, id: &str) -> Result<bool> {
        self.complete_workout_at(state, id, Utc::now()).await
    }

    /// Mark a visible workout completed at `at` and persist the list.
    ///
    /// Returns `false` without touching anything when nobody is signed in or
    /// no visible workout has this id.
    pub async fn complete_workout_at(
        &mut self,
        state: &SessionState,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let Some(user_id) = self.owner(state).await? else {
            tracing::debug!(workout_id = id, "Ignoring completion without a session");
            return Ok(false);
        };

        if self.find(id).is_none() {
            tracing::debug!(workout_id = id, "Ignoring completion of unknown workout");
            return Ok(false);
        }

        let mut updated = self.workouts.clone();
        for workout in updated.iter_mut().filter(|w| w.id == id) {
            workout.mark_completed(at);
        }

        self.db.set_workouts(&user_id, &updated).await?;
        self.workouts = updated;

        tracing::info!(user_id = %user_id, workout_id = id, "Completed workout");
        Ok(true)
    }

    /// Delete the stored list and go back to the sample catalog.
    pub async fn reset_workouts(&mut self, state: &SessionState) -> Result<()> {
        let Some(user_id) = self.owner(state).await? else {
            return Ok(());
        };

        self.db.delete_workouts(&user_id).await?;
        self.workouts = sample_workouts();

        tracing::info!(user_id = %user_id, "Reset workouts");
        Ok(())
    }

    /// Overwrite the stored list and the in-memory list.
    pub async fn save_workouts(
        &mut self,
        state: &SessionState,
        workouts: Vec<WorkoutRecord>,
    ) -> Result<()> {
        let Some(user_id) = self.owner(state).await? else {
            return Ok(());
        };

        self.db.set_workouts(&user_id, &workouts).await?;
        self.workouts = workouts;
        Ok(())
    }

    /// Id of the signed-in user, loading their catalog if a different user
    /// (or nobody) was loaded before.
    async fn owner(&mut self, state: &SessionState) -> Result<Option<String>> {
        let Some(session) = state.session() else {
            return Ok(None);
        };
        if self.user_id.as_deref() == Some(session.id.as_str()) {
            self.injuries = session.injuries.clone();
        } else {
            self.load(state).await?;
        }
        Ok(Some(session.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Session;
    use chrono::TimeZone;

    fn signed_in(injuries: &[&str]) -> SessionState {
        SessionState::Authenticated(Session {
            id: "42".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            injuries: injuries.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[tokio::test]
    async fn test_load_seeds_sample_catalog() {
        let mut catalog = WorkoutCatalog::new(RecordStore::in_memory());
        catalog.load(&signed_in(&[])).await.unwrap();

        assert_eq!(catalog.workouts().len(), sample_workouts().len());
        assert!(!catalog.is_loading());
    }

    #[tokio::test]
    async fn test_anonymous_load_empties_catalog() {
        let mut catalog = WorkoutCatalog::new(RecordStore::in_memory());
        catalog.load(&signed_in(&[])).await.unwrap();
        catalog.load(&SessionState::Anonymous).await.unwrap();

        assert!(catalog.workouts().is_empty());
        assert!(catalog.all_workouts().is_empty());
    }

    #[tokio::test]
    async fn test_injury_filter_applies_on_read() {
        let mut catalog = WorkoutCatalog::new(RecordStore::in_memory());
        catalog.load(&signed_in(&["Sprain"])).await.unwrap();

        let visible: Vec<&str> = catalog.workouts().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(visible, vec!["5"]);
        assert_eq!(catalog.all_workouts().len(), sample_workouts().len());
        assert!(catalog.find("1").is_none());
    }

    #[tokio::test]
    async fn test_unmatched_injuries_give_empty_view() {
        let mut catalog = WorkoutCatalog::new(RecordStore::in_memory());
        catalog.load(&signed_in(&["Nothing Like This"])).await.unwrap();
        assert!(catalog.workouts().is_empty());
    }

    #[tokio::test]
    async fn test_complete_unknown_id_is_noop() {
        let store = RecordStore::in_memory();
        let state = signed_in(&[]);
        let mut catalog = WorkoutCatalog::new(store.clone());
        catalog.load(&state).await.unwrap();

        assert!(!catalog.complete_workout(&state, "missing").await.unwrap());
        assert!(store.get_workouts("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_complete_anonymous_is_noop() {
        let mut catalog = WorkoutCatalog::new(RecordStore::in_memory());
        assert!(!catalog
            .complete_workout(&SessionState::Anonymous, "1")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_complete_persists_full_list() {
        let store = RecordStore::in_memory();
        let state = signed_in(&["Sprain"]);
        let mut catalog = WorkoutCatalog::new(store.clone());
        catalog.load(&state).await.unwrap();

        let at = Utc.with_ymd_and_hms(2024, 1, 11, 8, 0, 0).unwrap();
        assert!(catalog.complete_workout_at(&state, "5", at).await.unwrap());

        let stored = store.get_workouts("42").await.unwrap().unwrap();
        assert_eq!(stored.len(), sample_workouts().len());
        let done = stored.iter().find(|w| w.id == "5").unwrap();
        assert!(done.completed);
        assert_eq!(done.completed_at, Some(at));
    }

    #[tokio::test]
    async fn test_hidden_workout_cannot_be_completed() {
        let mut catalog = WorkoutCatalog::new(RecordStore::in_memory());
        let state = signed_in(&["Sprain"]);
        catalog.load(&state).await.unwrap();

        assert!(!catalog.complete_workout(&state, "1").await.unwrap());
    }

    #[tokio::test]
    async fn test_session_switch_reloads_catalog() {
        let store = RecordStore::in_memory();
        let mut catalog = WorkoutCatalog::new(store.clone());
        catalog.load(&signed_in(&[])).await.unwrap();

        let other = SessionState::Authenticated(Session {
            id: "7".to_string(),
            name: "Other".to_string(),
            email: "other@example.com".to_string(),
            injuries: vec![],
        });
        assert!(catalog.complete_workout(&other, "2").await.unwrap());

        assert!(store.get_workouts("7").await.unwrap().is_some());
        assert!(store.get_workouts("42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_progress_uses_visible_workouts() {
        let mut catalog = WorkoutCatalog::new(RecordStore::in_memory());
        let state = signed_in(&["Sprain"]);
        catalog.load(&state).await.unwrap();

        let at = Utc.with_ymd_and_hms(2024, 1, 11, 8, 0, 0).unwrap();
        catalog.complete_workout_at(&state, "5", at).await.unwrap();

        let stats = catalog.progress(at.date_naive());
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.current_streak, 1);
    }
}
