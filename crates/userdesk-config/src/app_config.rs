//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use userdesk_core::TelemetryConfig;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Session (bearer token) configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "userdesk".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint template is appended to.
    pub base_url: String,
    /// Round-trip timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Headers sent with every request.
    pub default_headers: BTreeMap<String, String>,
    /// Endpoint path templates.
    pub endpoints: EndpointConfig,
    /// Fallback error messages keyed by status code.
    pub status_messages: BTreeMap<String, String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_secs: 30,
            user_agent: format!("userdesk/{}", env!("CARGO_PKG_VERSION")),
            default_headers: BTreeMap::from([
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ]),
            endpoints: EndpointConfig::default(),
            status_messages: default_status_messages(),
        }
    }
}

impl ApiConfig {
    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Looks up the fallback message for a status code.
    ///
    /// Configured entries win; built-in entries fill the gaps left by a
    /// partial override.
    #[must_use]
    pub fn status_message(&self, status: u16) -> Option<String> {
        let key = status.to_string();
        self.status_messages
            .get(&key)
            .cloned()
            .or_else(|| default_status_messages().remove(&key))
    }
}

fn default_status_messages() -> BTreeMap<String, String> {
    [
        (400, "Bad request. Please check your input."),
        (401, "Unauthorized. Please log in again."),
        (403, "Forbidden. You don't have permission to access this resource."),
        (404, "Resource not found."),
        (500, "Internal server error. Please try again later."),
    ]
    .into_iter()
    .map(|(status, message)| (status.to_string(), message.to_string()))
    .collect()
}

/// Named API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// User collection.
    Users,
    /// Single user by uid.
    User,
    /// The authenticated user.
    Me,
    /// Access tokens of a user.
    Tokens,
    /// Move a user to the trash.
    Trash,
    /// Restore a trashed user.
    Restore,
}

impl Endpoint {
    /// All endpoints, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Users,
        Self::User,
        Self::Me,
        Self::Tokens,
        Self::Trash,
        Self::Restore,
    ];

    /// Returns the configuration key of the endpoint.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::User => "user",
            Self::Me => "me",
            Self::Tokens => "tokens",
            Self::Trash => "trash",
            Self::Restore => "restore",
        }
    }
}

/// Endpoint path templates. `{uid}` is replaced by the percent-encoded uid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub users: String,
    pub user: String,
    pub me: String,
    pub tokens: String,
    pub trash: String,
    pub restore: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            users: "/users".to_string(),
            user: "/users/{uid}".to_string(),
            me: "/users/me".to_string(),
            tokens: "/users/{uid}/tokens".to_string(),
            trash: "/users/{uid}/trash".to_string(),
            restore: "/users/{uid}/restore".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Returns the template for an endpoint.
    #[must_use]
    pub fn template(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Users => &self.users,
            Endpoint::User => &self.user,
            Endpoint::Me => &self.me,
            Endpoint::Tokens => &self.tokens,
            Endpoint::Trash => &self.trash,
            Endpoint::Restore => &self.restore,
        }
    }
}

/// Session configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Bearer token; overrides the stored session when set.
    #[serde(skip_serializing)]
    pub auth_token: Option<String>,
    /// Location of the session store file.
    pub store_path: Option<PathBuf>,
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("store_path", &self.store_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.app.name, "userdesk");
        assert_eq!(config.api.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(
            config.api.default_headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_endpoint_templates() {
        let endpoints = EndpointConfig::default();
        assert_eq!(endpoints.template(Endpoint::Users), "/users");
        assert_eq!(endpoints.template(Endpoint::Restore), "/users/{uid}/restore");
        assert_eq!(Endpoint::Tokens.key(), "tokens");
    }

    #[test]
    fn test_status_message_fallbacks() {
        let mut api = ApiConfig::default();
        api.status_messages.clear();
        api.status_messages
            .insert("404".to_string(), "No such user.".to_string());

        assert_eq!(api.status_message(404).as_deref(), Some("No such user."));
        assert_eq!(
            api.status_message(401).as_deref(),
            Some("Unauthorized. Please log in again.")
        );
        assert_eq!(api.status_message(418), None);
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = SessionConfig {
            auth_token: Some("s3cret".to_string()),
            store_path: None,
        };
        let debug = format!("{:?}", session);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("REDACTED"));
    }
}
