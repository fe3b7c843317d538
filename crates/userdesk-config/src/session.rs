//! Session token persistence.
//!
//! The bearer token lives in a small JSON file under the user's config
//! directory. It is read once at startup and handed to the transport as a
//! [`Session`]; nothing reads the file per request.

use crate::SessionConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use userdesk_core::{UserdeskError, UserdeskResult};

/// Contents of the session store file.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Bearer token saved by `session set-token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredSession")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// JSON file holding the persisted session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns `<config dir>/userdesk/session.json`, if the platform has a
    /// config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("userdesk").join("session.json"))
    }

    /// Opens the store named by the configuration, or the default location.
    pub fn from_config(config: &SessionConfig) -> UserdeskResult<Self> {
        config
            .store_path
            .clone()
            .or_else(Self::default_path)
            .map(Self::new)
            .ok_or_else(|| UserdeskError::configuration("No location for the session store"))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored session. A missing file is an empty session.
    pub fn load(&self) -> UserdeskResult<StoredSession> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(StoredSession::default()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                UserdeskError::configuration(format!(
                    "Corrupt session store {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session store at {}", self.path.display());
                Ok(StoredSession::default())
            }
            Err(e) => Err(self.io_error(&e)),
        }
    }

    /// Persists a bearer token, replacing any previous one.
    pub fn save_token(&self, token: &str) -> UserdeskResult<()> {
        let mut session = self.load()?;
        session.auth_token = Some(token.to_string());
        self.write(&session)?;
        info!("Saved session token to {}", self.path.display());
        Ok(())
    }

    /// Removes the stored token.
    pub fn clear(&self) -> UserdeskResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cleared session store {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(&e)),
        }
    }

    fn write(&self, session: &StoredSession) -> UserdeskResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(&e))?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(&e))
    }

    fn io_error(&self, err: &std::io::Error) -> UserdeskError {
        UserdeskError::configuration(format!("Session store {}: {}", self.path.display(), err))
    }
}

/// Bearer-token context handed to the transport at construction.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<SecretString>,
}

impl Session {
    /// A session without credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session carrying the given bearer token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::from(token.into())),
        }
    }

    /// Resolves the session: a configured token wins over the stored one.
    pub fn resolve(config: &SessionConfig, store: Option<&SessionStore>) -> UserdeskResult<Self> {
        if let Some(token) = config.auth_token.as_deref().filter(|t| !t.trim().is_empty()) {
            debug!("Using session token from configuration");
            return Ok(Self::with_token(token));
        }

        let stored = match store {
            Some(store) => store.load()?.auth_token,
            None => None,
        };

        Ok(stored
            .filter(|t| !t.trim().is_empty())
            .map_or_else(Self::anonymous, |token| Self::with_token(token)))
    }

    /// Returns the raw bearer token, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.expose_secret())
    }

    /// Returns true if a token is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
