// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account and session management.
//!
//! The signed-in identity is an explicit [`SessionState`] returned by every
//! transition and passed back in by the caller. Operations that change both
//! the account list and the session projection write them as one staged
//! commit.

use crate::db::{keys, RecordStore, StagedWrite};
use crate::error::{AppError, Result};
use crate::models::{Session, SessionState, UserAccount};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

/// Lock name serializing every change to the account list.
const ACCOUNTS_LOCK: &str = "accounts";

const DEMO_USER_NAME: &str = "Demo User";
const DEMO_USER_PASSWORD: &str = "password";

/// Registration, sign-in and profile changes for accounts on this device.
#[derive(Clone)]
pub struct SessionManager {
    db: RecordStore,
}

impl SessionManager {
    pub fn new(db: RecordStore) -> Self {
        Self { db }
    }

    /// Session persisted by a previous run, if any.
    pub async fn restore(&self) -> Result<SessionState> {
        let session = self.db.get_current_user().await?;
        if let Some(session) = &session {
            tracing::debug!(user_id = %session.id, "Restored session");
        }
        Ok(session.into())
    }

    /// Create an account and sign it in.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<SessionState> {
        let _guard = self.db.exclusive(ACCOUNTS_LOCK).await;

        let mut users = self.db.get_users().await?;
        if users.iter().any(|u| u.email == email) {
            tracing::info!("Registration rejected: email already exists");
            return Err(AppError::DuplicateEmail);
        }

        let now = Utc::now();
        let account = UserAccount {
            id: next_user_id(&users, now),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            injuries: Vec::new(),
            created_at: format_utc_rfc3339(now),
            updated_at: None,
        };
        let session = account.session();
        users.push(account);

        self.commit_account_change(&users, &session).await?;

        tracing::info!(user_id = %session.id, "Registered account");
        Ok(SessionState::Authenticated(session))
    }

    /// Sign in with an exact email and password pair.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<SessionState> {
        let users = self.db.get_users().await?;

        let Some(account) = users
            .iter()
            .find(|u| u.email == email && password_matches(&u.password, password))
        else {
            tracing::info!("Sign-in rejected");
            return Err(AppError::InvalidCredentials);
        };

        let session = account.session();
        self.db.set_current_user(&session).await?;

        tracing::info!(user_id = %session.id, "Signed in");
        Ok(SessionState::Authenticated(session))
    }

    /// Change the signed-in user's name and email.
    pub async fn update_profile(
        &self,
        state: &SessionState,
        name: &str,
        email: &str,
    ) -> Result<SessionState> {
        let current = state.require()?;
        let _guard = self.db.exclusive(ACCOUNTS_LOCK).await;

        let mut users = self.db.get_users().await?;
        if users.iter().any(|u| u.email == email && u.id != current.id) {
            return Err(AppError::EmailTaken);
        }

        let account = users
            .iter_mut()
            .find(|u| u.id == current.id)
            .ok_or(AppError::UserNotFound)?;
        account.name = name.to_string();
        account.email = email.to_string();
        account.updated_at = Some(format_utc_rfc3339(Utc::now()));
        let session = account.session();

        self.commit_account_change(&users, &session).await?;

        tracing::info!(user_id = %session.id, "Updated profile");
        Ok(SessionState::Authenticated(session))
    }

    /// Replace the signed-in user's declared injuries.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub async fn set_injuries(
        &self,
        state: &SessionState,
        injuries: &[String],
    ) -> Result<SessionState> {
        let current = state.require()?;
        let _guard = self.db.exclusive(ACCOUNTS_LOCK).await;

        let mut unique: Vec<String> = Vec::with_capacity(injuries.len());
        for injury in injuries {
            if !unique.contains(injury) {
                unique.push(injury.clone());
            }
        }

        let mut users = self.db.get_users().await?;
        let account = users
            .iter_mut()
            .find(|u| u.id == current.id)
            .ok_or(AppError::UserNotFound)?;
        account.injuries = unique;
        let session = account.session();

        self.commit_account_change(&users, &session).await?;

        tracing::info!(
            user_id = %session.id,
            injuries = ?session.injuries,
            "Updated injuries"
        );
        Ok(SessionState::Authenticated(session))
    }

    /// Forget the signed-in user. Never fails; storage errors are logged.
    pub async fn sign_out(&self) -> SessionState {
        match self.db.clear_current_user().await {
            Ok(()) => tracing::info!("Signed out"),
            Err(e) => tracing::warn!(error = %e, "Failed to clear stored session"),
        }
        SessionState::Anonymous
    }

    /// Remove the signed-in user's account and data, then sign out.
    pub async fn delete_account(&self, state: &SessionState) -> Result<SessionState> {
        let current = state.require()?;
        let user_id = current.id.clone();

        {
            let _guard = self.db.exclusive(ACCOUNTS_LOCK).await;

            let mut users = self.db.get_users().await?;
            let before = users.len();
            users.retain(|u| u.id != user_id);
            if users.len() == before {
                tracing::warn!(user_id = %user_id, "Account already gone during deletion");
            }

            self.db
                .commit_staged(vec![
                    StagedWrite::put(keys::USERS, &users)?,
                    StagedWrite::delete(keys::workouts(&user_id)),
                    StagedWrite::delete(keys::app_settings(&user_id)),
                ])
                .await?;
        }

        tracing::info!(user_id = %user_id, "Deleted account");
        Ok(self.sign_out().await)
    }

    /// Erase every document and sign in a fresh demo account.
    pub async fn reset_app_data(&self) -> Result<SessionState> {
        let _guard = self.db.exclusive(ACCOUNTS_LOCK).await;

        self.db.clear().await?;

        let now = Utc::now();
        let account = UserAccount {
            id: next_user_id(&[], now),
            name: DEMO_USER_NAME.to_string(),
            email: format!("demo{}@example.com", now.timestamp_subsec_nanos() % 10_000),
            password: DEMO_USER_PASSWORD.to_string(),
            injuries: Vec::new(),
            created_at: format_utc_rfc3339(now),
            updated_at: None,
        };
        let session = account.session();

        self.commit_account_change(&[account], &session).await?;

        tracing::info!(user_id = %session.id, "Reset app data");
        Ok(SessionState::Authenticated(session))
    }

    async fn commit_account_change(&self, users: &[UserAccount], session: &Session) -> Result<()> {
        self.db
            .commit_staged(vec![
                StagedWrite::put(keys::USERS, users)?,
                StagedWrite::put(keys::CURRENT_USER, session)?,
            ])
            .await
    }
}

/// Creation time in epoch milliseconds, bumped past any id already taken.
fn next_user_id(users: &[UserAccount], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    while users.iter().any(|u| u.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

fn password_matches(stored: &str, given: &str) -> bool {
    stored.as_bytes().ct_eq(given.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account(id: &str) -> UserAccount {
        UserAccount {
            id: id.to_string(),
            name: "A".to_string(),
            email: format!("{}@example.com", id),
            password: "p".to_string(),
            injuries: vec![],
            created_at: String::new(),
            updated_at: None,
        }
    }

    #[test]
    fn test_next_user_id_skips_taken() {
        let now = Utc.timestamp_millis_opt(1_704_067_200_000).unwrap();
        let users = vec![account("1704067200000"), account("1704067200001")];
        assert_eq!(next_user_id(&users, now), "1704067200002");
        assert_eq!(next_user_id(&[], now), "1704067200000");
    }

    #[test]
    fn test_password_matches() {
        assert!(password_matches("secret", "secret"));
        assert!(!password_matches("secret", "Secret"));
        assert!(!password_matches("secret", "secret1"));
        assert!(!password_matches("", "x"));
    }
}
