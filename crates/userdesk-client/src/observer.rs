//! Request/response observation.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Value shown in place of credentials.
pub const REDACTED: &str = "[REDACTED]";

/// An outgoing request as seen by an observer.
#[derive(Debug)]
pub struct RequestRecord<'a> {
    pub method: &'a Method,
    pub url: &'a Url,
    /// Headers with credentials redacted.
    pub headers: &'a HeaderMap,
    pub body: Option<&'a Value>,
}

/// A completed response as seen by an observer.
#[derive(Debug)]
pub struct ResponseRecord<'a> {
    pub method: &'a Method,
    pub url: &'a Url,
    pub status: u16,
    pub headers: &'a HeaderMap,
    pub body: &'a str,
    pub elapsed: Duration,
}

/// Receives every request and response the transport handles.
///
/// Observers only see borrowed records and cannot alter the exchange.
pub trait RequestObserver: Send + Sync {
    /// Called before the request is sent.
    fn on_request(&self, record: &RequestRecord<'_>);

    /// Called once the full response body has been read.
    fn on_response(&self, record: &ResponseRecord<'_>);
}

/// Logs exchanges at `debug` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, record: &RequestRecord<'_>) {
        debug!(
            method = %record.method,
            url = %record.url,
            headers = ?record.headers,
            body = ?record.body,
            "API request"
        );
    }

    fn on_response(&self, record: &ResponseRecord<'_>) {
        debug!(
            method = %record.method,
            url = %record.url,
            status = record.status,
            elapsed_ms = u64::try_from(record.elapsed.as_millis()).unwrap_or(u64::MAX),
            body = record.body,
            "API response"
        );
    }
}

/// Returns a copy of the headers with the Authorization value hidden.
#[must_use]
pub fn redact_headers(headers: &HeaderMap) -> HeaderMap {
    let mut redacted = headers.clone();
    if redacted.contains_key(AUTHORIZATION) {
        redacted.insert(AUTHORIZATION, HeaderValue::from_static(REDACTED));
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let redacted = redact_headers(&headers);
        assert_eq!(redacted.get(AUTHORIZATION).unwrap(), REDACTED);
        assert_eq!(redacted.get("accept").unwrap(), "application/json");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
    }

    #[test]
    fn test_redact_without_credentials() {
        let headers = HeaderMap::new();
        assert!(redact_headers(&headers).is_empty());
    }
}
