//! Helpers for JSON values stored in TEXT columns.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Serializes a value for storage through the builder in a TEXT column.
pub fn to_json<T: Serialize>(value: &T) -> Value {
    Value::Text(serde_json::to_string(value).unwrap_or_else(|_| "null".to_string()))
}

/// Deserializes a JSON TEXT value read back from a [`Row`](crate::Row).
pub fn from_json<T: for<'de> Deserialize<'de>>(value: &Value) -> Option<T> {
    match value {
        Value::Text(s) if !s.is_empty() && s != "null" => serde_json::from_str(s).ok(),
        _ => None,
    }
}

/// Deserializes a JSON TEXT column inside a [`FromRow`](crate::FromRow)
/// implementation, treating a missing or null column as absent.
pub fn from_optional_json<T: for<'de> Deserialize<'de>>(
    result: rusqlite::Result<String>,
) -> Option<T> {
    match result {
        Ok(s) if !s.is_empty() && s != "null" => serde_json::from_str(&s).ok(),
        _ => None,
    }
}
