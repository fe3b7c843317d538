//! Result type aliases for Userdesk.

use crate::UserdeskError;

/// A specialized `Result` type for Userdesk operations.
pub type UserdeskResult<T> = Result<T, UserdeskError>;
