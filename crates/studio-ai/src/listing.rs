use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::StudioAiError;

const LIST_WRAPPER_KEYS: [&str; 2] = ["data", "models"];

/// Decodes a listing body into typed items.
///
/// Accepts a bare JSON array or an object wrapping the array under `data` or
/// `models`. Bare string items are read as `{ "id": <string> }`. Items with
/// a blank `id` or an undecodable shape are skipped; only a body with no
/// recognizable list is an error.
pub fn parse_listing_payload<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, StudioAiError> {
    let payload: Value = serde_json::from_str(raw)
        .map_err(|error| StudioAiError::InvalidResponse(format!("listing is not JSON: {error}")))?;

    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut object) => LIST_WRAPPER_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                StudioAiError::InvalidResponse(
                    "listing object has no 'data' or 'models' array".to_string(),
                )
            })?,
        other => {
            return Err(StudioAiError::InvalidResponse(format!(
                "listing must be an array or object, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let mut decoded = Vec::with_capacity(total);
    for (index, item) in items.into_iter().enumerate() {
        let item = match item {
            Value::String(id) => json!({ "id": id }),
            other => other,
        };
        let id = item
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if id.is_empty() {
            tracing::warn!(index, "skipping listing item without id");
            continue;
        }
        let id = id.to_string();
        match serde_json::from_value::<T>(item) {
            Ok(value) => decoded.push(value),
            Err(error) => {
                tracing::warn!(index, id = id.as_str(), %error, "skipping malformed listing item");
            }
        }
    }

    tracing::debug!(total, decoded = decoded.len(), "decoded upstream listing");
    Ok(decoded)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
