//! Field-level parsing of JSON request bodies.
//!
//! Request bodies arrive as an arbitrary JSON object. Parsing them by hand,
//! rather than through `serde` derive, lets every failure name the exact field
//! and list index at fault (`Field 'amount' is not numerical in ingredient 2`)
//! and lets update DTOs tell an absent key from a present one.

use anyhow::anyhow;
use serde_json::{Map, Value};

use recipebook_core::AppError;

pub type JsonObject = Map<String, Value>;

/// Builds a typed DTO from a JSON object, checking presence and JSON types.
pub trait FromJsonObject: Sized {
    fn from_json_object(body: &JsonObject) -> Result<Self, AppError>;
}

pub(crate) fn invalid(message: String) -> AppError {
    AppError::bad_request(anyhow!(message))
}

pub(crate) fn required<'a>(body: &'a JsonObject, field: &str) -> Result<&'a Value, AppError> {
    body.get(field)
        .ok_or_else(|| invalid(format!("Field '{field}' is missing")))
}

pub(crate) fn string(value: &Value, field: &str) -> Result<String, AppError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("Field '{field}' is not a string")))
}

pub(crate) fn integer(value: &Value, field: &str) -> Result<i64, AppError> {
    value
        .as_i64()
        .ok_or_else(|| invalid(format!("Field '{field}' is not an integer")))
}

pub(crate) fn list<'a>(value: &'a Value, field: &str) -> Result<&'a [Value], AppError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid(format!("Field '{field}' is not a list")))
}

/// Parses a present-but-optional string key, rejecting `null` and other types.
pub(crate) fn optional_string(body: &JsonObject, field: &str) -> Result<Option<String>, AppError> {
    body.get(field).map(|value| string(value, field)).transpose()
}

/// Treats a list entry as an object, naming the list kind and index on failure.
pub(crate) fn entry<'a>(value: &'a Value, kind: &str, index: usize) -> Result<&'a JsonObject, AppError> {
    value
        .as_object()
        .ok_or_else(|| invalid(format!("Entry {index} of '{kind}' is not an object")))
}
