//! Free-form user metadata.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// String-keyed JSON values attached to a user.
pub type Metadata = Map<String, Value>;

/// Parses a JSON-encoded metadata string.
///
/// Returns `None` when the text is not JSON or not a JSON object.
#[must_use]
pub fn parse_metadata(text: &str) -> Option<Metadata> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Metadata as supplied by a form: either a mapping or a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataInput {
    /// Already-structured mapping.
    Map(Metadata),
    /// JSON-encoded mapping.
    Encoded(String),
}

impl MetadataInput {
    /// Resolves the input to a mapping, discarding anything unusable.
    #[must_use]
    pub fn resolve(&self) -> Option<Metadata> {
        match self {
            Self::Map(map) => Some(map.clone()),
            Self::Encoded(text) => parse_metadata(text),
        }
    }
}

impl From<Metadata> for MetadataInput {
    fn from(map: Metadata) -> Self {
        Self::Map(map)
    }
}

/// Deserializes optional metadata that may arrive as an object or as a
/// JSON-encoded string. Anything else is treated as absent.
pub fn deserialize_metadata_lenient<'de, D>(deserializer: D) -> Result<Option<Metadata>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => Some(map),
        Some(Value::String(text)) => parse_metadata(&text),
        _ => None,
    })
}
