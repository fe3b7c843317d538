//! # Userdesk Client
//!
//! HTTP transport for the user directory API.
//!
//! [`HttpTransport`] merges default headers with the session's bearer token,
//! applies a single timeout to each round trip, turns error bodies into
//! readable messages and reports every exchange to a [`RequestObserver`].

mod error_body;
mod observer;
mod path;
mod request;
mod transport;

pub use error_body::{extract_message, extract_message_from_bytes};
pub use observer::*;
pub use path::*;
pub use request::*;
pub use transport::*;

pub use reqwest::Method;
