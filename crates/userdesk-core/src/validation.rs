//! Validation rules for user input.
//!
//! The rules are deliberately literal: a uid passes the digit rule as soon as
//! it contains any character outside `0`-`9`, and an email only needs an
//! `@`. Callers must not strengthen them.

use crate::FormError;

/// Validates a uid against the creation rules, in order.
///
/// 1. non-empty after trimming, else [`FormError::MissingUid`]
/// 2. contains a non-digit character, else [`FormError::UidAllDigits`]
/// 3. contains no whitespace, else [`FormError::UidHasWhitespace`]
pub fn validate_uid(uid: Option<&str>) -> Result<(), FormError> {
    let uid = uid.unwrap_or_default();

    if uid.trim().is_empty() {
        return Err(FormError::MissingUid);
    }
    if rules::all_digits(uid) {
        return Err(FormError::UidAllDigits);
    }
    if uid.chars().any(char::is_whitespace) {
        return Err(FormError::UidHasWhitespace);
    }
    Ok(())
}

/// Validates an optional email: when present and non-blank it must contain `@`.
pub fn validate_email(email: Option<&str>) -> Result<(), FormError> {
    match email.map(str::trim) {
        Some(email) if !email.is_empty() && !email.contains('@') => Err(FormError::InvalidEmail),
        _ => Ok(()),
    }
}

/// Common string helpers shared by validation and normalization.
pub mod rules {
    /// Trims a value and returns it only if something is left.
    #[must_use]
    pub fn non_blank(value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string)
    }

    /// Returns true if the string has no characters other than `0`-`9`.
    #[must_use]
    pub fn all_digits(value: &str) -> bool {
        value.chars().all(|c| c.is_ascii_digit())
    }
}
