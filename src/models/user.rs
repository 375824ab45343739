// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account and session models for storage.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Account stored in the `users` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Creation timestamp in epoch milliseconds, unique among accounts
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (unique, case-sensitive)
    pub email: String,
    /// Password as entered at registration
    pub password: String,
    /// Declared injuries, joined against workout applicability tags
    #[serde(default)]
    pub injuries: Vec<String>,
    /// When the account was created (RFC3339)
    pub created_at: String,
    /// Last profile update (RFC3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl UserAccount {
    /// Projection exposed to the session (everything but the password).
    pub fn session(&self) -> Session {
        Session {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            injuries: self.injuries.clone(),
        }
    }
}

/// Projected identity of the signed-in user, stored under `currentUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub injuries: Vec<String>,
}

/// Whether anyone is signed in on this device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    /// The active session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(session) => Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// The active session, or `NotAuthenticated`.
    pub fn require(&self) -> crate::error::Result<&Session> {
        self.session().ok_or(crate::error::AppError::NotAuthenticated)
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        match session {
            Some(session) => SessionState::Authenticated(session),
            None => SessionState::Anonymous,
        }
    }
}
