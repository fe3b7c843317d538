//! Human-readable messages from API error bodies.

use serde_json::Value;

/// Fields inspected for a message, in priority order.
const MESSAGE_FIELDS: [&str; 4] = ["detail", "message", "error", "errors"];

/// Extracts a message from a JSON error body.
///
/// Looks at `detail`, `message`, `error`, then `errors`. Each field may
/// hold a string or a list; list items may be strings or objects carrying
/// `message` or `msg`. List messages are joined with `", "`.
#[must_use]
pub fn extract_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    MESSAGE_FIELDS
        .iter()
        .filter_map(|field| object.get(*field))
        .find_map(message_from)
}

/// Parses a raw body and extracts a message from it.
#[must_use]
pub fn extract_message_from_bytes(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(extract_message)
}

fn message_from(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_empty(text),
        Value::Array(items) => {
            let messages: Vec<String> = items.iter().filter_map(item_message).collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join(", "))
            }
        }
        Value::Object(_) => item_message(value),
        _ => None,
    }
}

fn item_message(item: &Value) -> Option<String> {
    match item {
        Value::String(text) => non_empty(text),
        Value::Object(fields) => fields
            .get("message")
            .or_else(|| fields.get("msg"))
            .and_then(Value::as_str)
            .and_then(non_empty),
        _ => None,
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
