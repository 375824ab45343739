//! Database layer (key-value JSON documents).

pub mod documents;
pub mod record_store;

pub use record_store::{RecordStore, StagedWrite};

/// Document keys as constants.
pub mod keys {
    /// Account list, passwords included
    pub const USERS: &str = "users";
    /// Session projection of the signed-in user
    pub const CURRENT_USER: &str = "currentUser";
    /// Global workout list written by old builds; only ever removed
    pub const LEGACY_WORKOUTS: &str = "workouts";
    /// Pending multi-document write, present only while a commit is in flight
    pub const STAGED_WRITES: &str = "_staged_writes";

    /// Per-user workout list.
    pub fn workouts(user_id: &str) -> String {
        format!("workouts_{}", user_id)
    }

    /// Per-user preference document.
    pub fn app_settings(user_id: &str) -> String {
        format!("appSettings_{}", user_id)
    }
}
