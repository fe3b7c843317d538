//! User entity.

use super::super::value_objects::{
    deserialize_metadata_lenient, deserialize_picture_lenient, Directory, Metadata, Picture,
};
use crate::UserId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A directory entry as returned by the server.
///
/// `uid` is the client-facing primary key; `id` and the other read-only
/// fields are assigned by the server and never sent back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned numeric id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    /// Unique user identifier.
    pub uid: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Free-text note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Picture; unrecognized values are dropped on read.
    #[serde(
        default,
        deserialize_with = "deserialize_picture_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub picture: Option<Picture>,

    /// Directory membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<Directory>,

    /// Free-form metadata; may arrive JSON-encoded.
    #[serde(
        default,
        deserialize_with = "deserialize_metadata_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<Metadata>,

    /// Ordered tags, duplicates allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Server-rendered avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Presence information, passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<Value>,

    #[serde(
        default,
        deserialize_with = "deserialize_timestamp_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "deserialize_timestamp_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Whether the user has been moved to the trash.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_trashed: bool,
}

impl User {
    /// Creates a user carrying only a uid.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            id: None,
            uid: uid.into(),
            name: None,
            given_name: None,
            middle_name: None,
            family_name: None,
            nickname: None,
            email: None,
            phone_number: None,
            comment: None,
            picture: None,
            directory: None,
            metadata: None,
            tags: None,
            avatar_url: None,
            presence: None,
            created_at: None,
            updated_at: None,
            is_trashed: false,
        }
    }

    /// Returns the best human-readable name, falling back to the uid.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.nickname.as_deref())
            .unwrap_or(&self.uid)
    }

    /// Returns the directory name, if any.
    #[must_use]
    pub fn directory_name(&self) -> Option<&str> {
        self.directory.as_ref().map(Directory::name)
    }

    /// Returns the tags, or an empty slice.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Marks the user as trashed.
    pub fn trash(&mut self) {
        self.is_trashed = true;
    }

    /// Clears the trashed flag.
    pub fn restore(&mut self) {
        self.is_trashed = false;
    }
}

fn deserialize_timestamp_lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .map(ToString::to_string)
    else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(&text) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    Ok(NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc()))
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_user_from_server_json() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "uid": "john_doe",
            "name": "John Doe",
            "email": "john@example.com",
            "picture": {"id": 3, "thumbnail": "https://cdn/t.png"},
            "directory": {"id": 1, "name": "eng"},
            "metadata": "{\"team\":\"core\"}",
            "tags": ["admin", "admin"],
            "created_at": "2024-05-01T12:30:00Z",
            "updated_at": "2024-05-02T08:00:00.123456",
            "is_trashed": null
        }))
        .unwrap();

        assert_eq!(user.id, Some(UserId(7)));
        assert_eq!(user.directory_name(), Some("eng"));
        assert_eq!(user.tags(), ["admin".to_string(), "admin".to_string()]);
        assert_eq!(user.metadata.unwrap().get("team"), Some(&json!("core")));
        assert_eq!(user.picture.unwrap().kind(), "reference");
        assert_eq!(user.created_at.unwrap().day(), 1);
        assert_eq!(user.updated_at.unwrap().hour(), 8);
        assert!(!user.is_trashed);
    }

    #[test]
    fn test_unusable_fields_are_dropped() {
        let user: User = serde_json::from_value(json!({
            "uid": "x1",
            "picture": "opaque-value",
            "metadata": "not json",
            "created_at": "yesterday"
        }))
        .unwrap();

        assert_eq!(user.picture, None);
        assert_eq!(user.metadata, None);
        assert_eq!(user.created_at, None);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = User::new("ops-bot");
        assert_eq!(user.display_name(), "ops-bot");
        user.nickname = Some("bot".to_string());
        assert_eq!(user.display_name(), "bot");
        user.name = Some("Ops Bot".to_string());
        assert_eq!(user.display_name(), "Ops Bot");
    }

    #[test]
    fn test_trash_and_restore() {
        let mut user = User::new("a1");
        user.trash();
        assert!(user.is_trashed);
        user.restore();
        assert!(!user.is_trashed);
    }
}
