//! Helpers for the JSON documents handed to the writer.

use serde_json::Value;

/// Top-level field the server reads the document id from
pub const ID_FIELD: &str = "_id";

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Malformed JSON payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Payload has no top-level \"_id\" field")]
    MissingId,
}

/// Remove a top-level `_id` so it cannot disagree with the id in the URL.
///
/// Payloads without one come back with the same content, so running this
/// twice is the same as running it once.
pub fn strip_id(json: &str) -> Result<String, PayloadError> {
    let mut value: Value = serde_json::from_str(json)?;
    if let Value::Object(map) = &mut value {
        map.remove(ID_FIELD);
    }
    Ok(serde_json::to_string(&value)?)
}

/// Read the top-level `_id` of a payload.
///
/// Only string ids count; anything else is treated as absent.
pub fn extract_id(json: &str) -> Result<String, PayloadError> {
    let value: Value = serde_json::from_str(json)?;
    value
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(PayloadError::MissingId)
}

/// First id out of a `/_uuids` body, `None` when the shape is unexpected
pub fn first_uuid(body: &str) -> Result<Option<String>, PayloadError> {
    let value: Value = serde_json::from_str(body)?;
    Ok(value
        .get("uuids")
        .and_then(Value::as_array)
        .and_then(|ids| ids.first())
        .and_then(Value::as_str)
        .map(str::to_string))
}
