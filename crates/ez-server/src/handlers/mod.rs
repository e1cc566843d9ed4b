//! Endpoint handlers.
//!
//! Request bodies are parsed leniently (fields optional, loosely typed where
//! the endpoint reports its own "is required" message) and validated in the
//! handler, so a missing field is a 400 with a readable message rather than
//! a serde error.

pub mod functions;
pub mod listings;
pub mod swipes;
pub mod tasks;

use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// A JSON value as a non-empty string.
fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// A snake_case wire name as one of the ez-core enums.
fn parse_enum<T: DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(Value::String(value.to_string())).ok()
}
