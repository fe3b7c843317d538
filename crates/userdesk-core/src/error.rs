//! Unified error types for all layers of the application.

use std::time::Duration;
use thiserror::Error;

/// Client-side form validation failure.
///
/// Validation stops at the first failing rule, so a form always reports
/// exactly one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// The uid is absent or blank.
    #[error("User ID is required.")]
    MissingUid,

    /// The uid contains no character other than `0`-`9`.
    #[error("User ID must contain at least one non-digit character.")]
    UidAllDigits,

    /// The uid contains a whitespace character.
    #[error("User ID must not contain whitespace.")]
    UidHasWhitespace,

    /// The email is present but has no `@`.
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

impl FormError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingUid => "MISSING_UID",
            Self::UidAllDigits => "UID_ALL_DIGITS",
            Self::UidHasWhitespace => "UID_HAS_WHITESPACE",
            Self::InvalidEmail => "INVALID_EMAIL",
        }
    }

    /// Returns the form field the error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingUid | Self::UidAllDigits | Self::UidHasWhitespace => "uid",
            Self::InvalidEmail => "email",
        }
    }
}

/// Rejection of an uploaded picture file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The file exceeds the upload size limit.
    #[error("Image is too large ({size} bytes); the limit is {limit} bytes.")]
    TooLarge { size: u64, limit: u64 },

    /// The file does not declare an image media type.
    #[error("File is not an image (media type {0}).")]
    NotAnImage(String),

    /// The file could not be read.
    #[error("Could not read image file: {0}")]
    Unreadable(String),
}

/// Unified error type for Userdesk.
#[derive(Error, Debug)]
pub enum UserdeskError {
    // ============ Client-side Errors ============
    /// Form validation failed; no request was sent.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Picture upload rejected; the form was left untouched.
    #[error(transparent)]
    Image(#[from] ImageError),

    // ============ Transport Errors ============
    /// The request did not complete before the timeout fired.
    #[error("Request timed out after {} seconds.", .0.as_secs())]
    Timeout(Duration),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The response body was not JSON of the expected shape.
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// The server could not be reached.
    #[error("Unable to reach the server: {0}")]
    Network(String),

    // ============ Infrastructure Errors ============
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Anything else caught at the transport boundary.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl UserdeskError {
    /// Returns the HTTP status carried by this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Form(err) => err.code(),
            Self::Image(ImageError::TooLarge { .. }) => "IMAGE_TOO_LARGE",
            Self::Image(ImageError::NotAnImage(_)) => "NOT_AN_IMAGE",
            Self::Image(ImageError::Unreadable(_)) => "IMAGE_UNREADABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Http { .. } => "HTTP_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Checks if this error was raised before any request was sent.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(self, Self::Form(_) | Self::Image(_))
    }

    /// Checks if the server reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Creates an HTTP error.
    #[must_use]
    pub fn http<T: Into<String>>(status: u16, message: T) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode<T: Into<String>>(message: T) -> Self {
        Self::Decode(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an unknown error.
    #[must_use]
    pub fn unknown<T: Into<String>>(message: T) -> Self {
        Self::Unknown(message.into())
    }
}

impl From<serde_json::Error> for UserdeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_messages() {
        assert_eq!(FormError::MissingUid.to_string(), "User ID is required.");
        assert_eq!(
            UserdeskError::from(FormError::InvalidEmail).to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_form_error_fields() {
        assert_eq!(FormError::MissingUid.field(), "uid");
        assert_eq!(FormError::UidAllDigits.field(), "uid");
        assert_eq!(FormError::UidHasWhitespace.field(), "uid");
        assert_eq!(FormError::InvalidEmail.field(), "email");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(UserdeskError::from(FormError::UidAllDigits).error_code(), "UID_ALL_DIGITS");
        assert_eq!(UserdeskError::Timeout(Duration::from_secs(30)).error_code(), "TIMEOUT");
        assert_eq!(UserdeskError::http(404, "gone").error_code(), "HTTP_ERROR");
        assert_eq!(UserdeskError::decode("bad").error_code(), "DECODE_ERROR");
        assert_eq!(
            UserdeskError::from(ImageError::NotAnImage("text/plain".to_string())).error_code(),
            "NOT_AN_IMAGE"
        );
    }

    #[test]
    fn test_http_error_displays_message_only() {
        let err = UserdeskError::http(404, "Resource not found.");
        assert_eq!(err.to_string(), "Resource not found.");
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_timeout_is_not_http() {
        let err = UserdeskError::Timeout(Duration::from_secs(30));
        assert_eq!(err.status_code(), None);
        assert_eq!(err.to_string(), "Request timed out after 30 seconds.");
    }

    #[test]
    fn test_client_side_errors() {
        assert!(UserdeskError::from(FormError::MissingUid).is_client_side());
        assert!(UserdeskError::from(ImageError::TooLarge { size: 10, limit: 5 }).is_client_side());
        assert!(!UserdeskError::http(500, "boom").is_client_side());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(matches!(UserdeskError::from(err), UserdeskError::Decode(_)));
    }
}
