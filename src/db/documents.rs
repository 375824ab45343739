// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Versioned document encoding.
//!
//! Documents are written as `{"version": 1, "data": ...}`. Older app builds
//! wrote the bare value; those decode as version 0.

use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Version written by this build.
pub const DOCUMENT_VERSION: u64 = 1;

#[derive(Serialize)]
struct Envelope<'a, T: ?Sized> {
    version: u64,
    data: &'a T,
}

/// Encode a value in the current envelope.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(&Envelope {
        version: DOCUMENT_VERSION,
        data: value,
    })
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode document: {}", e)))
}

/// Decode the raw text to its JSON payload, unwrapping the envelope if present.
pub fn decode_value(raw: &str) -> Result<Value> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| AppError::MalformedDocument(e.to_string()))?;

    match split_envelope(value) {
        Ok((DOCUMENT_VERSION, data)) => Ok(data),
        Ok((version, _)) => Err(AppError::MalformedDocument(format!(
            "unsupported document version {}",
            version
        ))),
        Err(bare) => Ok(bare),
    }
}

/// Decode raw text into a typed document.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let value = decode_value(raw)?;
    serde_json::from_value(value).map_err(|e| AppError::MalformedDocument(e.to_string()))
}

/// `(version, data)` when the value is exactly an envelope, otherwise the
/// value handed back untouched.
fn split_envelope(value: Value) -> std::result::Result<(u64, Value), Value> {
    let version = match &value {
        Value::Object(map) if map.len() == 2 && map.contains_key("data") => {
            map.get("version").and_then(Value::as_u64)
        }
        _ => None,
    };

    match (version, value) {
        (Some(version), Value::Object(mut map)) => {
            Ok((version, map.remove("data").unwrap_or(Value::Null)))
        }
        (_, value) => Err(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_wraps_in_envelope() {
        let raw = encode(&vec!["a", "b"]).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, json!({ "version": 1, "data": ["a", "b"] }));
    }

    #[test]
    fn test_decode_current_version() {
        let raw = encode(&json!({ "darkMode": true })).unwrap();
        let value = decode_value(&raw).unwrap();
        assert_eq!(value, json!({ "darkMode": true }));
    }

    #[test]
    fn test_decode_legacy_bare_value() {
        let users: Vec<String> = decode(r#"["x","y"]"#).unwrap();
        assert_eq!(users, vec!["x", "y"]);
    }

    #[test]
    fn test_unknown_version_is_malformed() {
        let err = decode_value(r#"{"version":7,"data":[]}"#).unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = decode::<Vec<String>>("{not json").unwrap_err();
        assert!(matches!(err, AppError::MalformedDocument(_)));
    }
}
