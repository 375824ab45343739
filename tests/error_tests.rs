// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use prehab_tracker::error::AppError;

#[test]
fn test_error_codes_are_stable() {
    assert_eq!(AppError::DuplicateEmail.code(), "duplicate_email");
    assert_eq!(AppError::InvalidCredentials.code(), "invalid_credentials");
    assert_eq!(AppError::EmailTaken.code(), "email_taken");
    assert_eq!(AppError::NotAuthenticated.code(), "not_authenticated");
    assert_eq!(AppError::UserNotFound.code(), "user_not_found");
    assert_eq!(
        AppError::StorageUnavailable("disk".to_string()).code(),
        "storage_unavailable"
    );
}

#[test]
fn test_messages_are_human_readable() {
    assert_eq!(AppError::DuplicateEmail.to_string(), "Email already exists");
    assert_eq!(
        AppError::InvalidCredentials.to_string(),
        "Invalid email or password"
    );
    assert_eq!(AppError::NotAuthenticated.to_string(), "No user logged in");
}

#[test]
fn test_is_storage_error() {
    assert!(AppError::StorageUnavailable("x".to_string()).is_storage_error());
    assert!(AppError::MalformedDocument("x".to_string()).is_storage_error());
    assert!(!AppError::EmailTaken.is_storage_error());
}

#[test]
fn test_io_error_maps_to_storage_unavailable() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: AppError = io.into();
    assert!(matches!(err, AppError::StorageUnavailable(_)));
}
