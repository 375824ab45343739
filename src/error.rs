// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent, human-readable messages.

/// Application error type returned by every store and service operation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Email already exists")]
    DuplicateEmail,

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already taken")]
    EmailTaken,

    #[error("No user logged in")]
    NotAuthenticated,

    #[error("User not found")]
    UserNotFound,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateEmail => "duplicate_email",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::EmailTaken => "email_taken",
            AppError::NotAuthenticated => "not_authenticated",
            AppError::UserNotFound => "user_not_found",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::MalformedDocument(_) => "malformed_document",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Whether the error comes from the storage layer rather than from
    /// account or session rules.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::MalformedDocument(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

/// Result type alias for store and service operations
pub type Result<T> = std::result::Result<T, AppError>;
