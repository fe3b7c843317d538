//! HTTP transport for the user directory API.

use crate::error_body::extract_message_from_bytes;
use crate::observer::{redact_headers, RequestObserver, RequestRecord, ResponseRecord, TracingObserver};
use crate::{ApiPath, ApiRequest};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;
use userdesk_config::{ApiConfig, Session};
use userdesk_core::{UserdeskError, UserdeskResult};

const JSON: &str = "application/json";

/// JSON-over-HTTP transport.
///
/// Holds the base URL, default headers, timeout and session. Every call
/// runs under a single timeout covering send and body read.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    api: Arc<ApiConfig>,
    session: Session,
    observer: Arc<dyn RequestObserver>,
}

impl HttpTransport {
    /// Creates a new transport from API configuration and a session.
    pub fn new(api: &ApiConfig, session: Session) -> UserdeskResult<Self> {
        let client = Client::builder()
            .user_agent(api.user_agent.clone())
            .build()
            .map_err(|e| UserdeskError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_client(client, api, session)
    }

    /// Creates a new transport around an existing client.
    pub fn with_client(client: Client, api: &ApiConfig, session: Session) -> UserdeskResult<Self> {
        let base_url = Url::parse(&api.base_url)
            .map_err(|e| UserdeskError::configuration(format!("Invalid base URL {}: {}", api.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UserdeskError::configuration(format!(
                "Base URL cannot carry a path: {}",
                api.base_url
            )));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        default_headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        for (name, value) in &api.default_headers {
            let (name, value) = parse_header(name, value)?;
            default_headers.insert(name, value);
        }

        Ok(Self {
            client,
            base_url,
            timeout: api.timeout(),
            default_headers,
            api: Arc::new(api.clone()),
            session,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replaces the request observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the API configuration the transport was built from.
    #[must_use]
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    /// Returns the session attached to every request.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the round-trip timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get<T: DeserializeOwned>(&self, path: impl Into<ApiPath>) -> UserdeskResult<T> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<T, B>(&self, path: impl Into<ApiPath>, body: &B) -> UserdeskResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<T, B>(&self, path: impl Into<ApiPath>, body: &B) -> UserdeskResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    pub async fn patch<T, B>(&self, path: impl Into<ApiPath>, body: &B) -> UserdeskResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: impl Into<ApiPath>) -> UserdeskResult<T> {
        self.send(ApiRequest::delete(path)).await
    }

    /// Sends a request and decodes the response into `T`.
    ///
    /// An empty response (204 or a blank body) decodes from JSON `null`, so
    /// `T` should be `()` or an `Option` for calls that may return nothing.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> UserdeskResult<T> {
        let value = self.execute(request).await?;
        serde_json::from_value(value).map_err(|e| UserdeskError::decode(e.to_string()))
    }

    /// Sends a request and returns the raw JSON value.
    pub async fn execute(&self, request: ApiRequest) -> UserdeskResult<Value> {
        self.round_trip(request, true).await
    }

    /// Sends a request whose response body is optional.
    ///
    /// A 2xx body that is not JSON, such as a plain acknowledgement, yields
    /// `null` instead of a `Decode` error.
    pub async fn execute_optional(&self, request: ApiRequest) -> UserdeskResult<Value> {
        self.round_trip(request, false).await
    }

    async fn round_trip(&self, request: ApiRequest, expect_body: bool) -> UserdeskResult<Value> {
        let url = self.url(&request.path, &request.query)?;
        let headers = self.headers(&request.headers)?;

        let redacted = redact_headers(&headers);
        self.observer.on_request(&RequestRecord {
            method: &request.method,
            url: &url,
            headers: &redacted,
            body: request.body.as_ref(),
        });

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let started = Instant::now();
        let round_trip = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let bytes = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, headers, bytes))
        };

        let (status, response_headers, bytes) = match tokio::time::timeout(self.timeout, round_trip).await {
            Ok(Ok(parts)) => parts,
            Ok(Err(e)) => return Err(self.map_reqwest_error(&e)),
            Err(_) => {
                warn!("{} {} timed out after {:?}", request.method, url, self.timeout);
                return Err(UserdeskError::Timeout(self.timeout));
            }
        };

        self.observer.on_response(&ResponseRecord {
            method: &request.method,
            url: &url,
            status: status.as_u16(),
            headers: &response_headers,
            body: &String::from_utf8_lossy(&bytes),
            elapsed: started.elapsed(),
        });

        if !status.is_success() {
            return Err(self.map_http_error(status, &bytes));
        }

        if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("{} {} returned no content", request.method, url);
            return Ok(Value::Null);
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) if expect_body => Err(UserdeskError::decode(e.to_string())),
            Err(e) => {
                debug!("{} {} returned a non-JSON body, ignoring it: {}", request.method, url, e);
                Ok(Value::Null)
            }
        }
    }

    /// Resolves a path against the base URL, encoding each segment.
    ///
    /// A `.` or `..` segment is rejected: it would be dropped from the URL
    /// and the request would reach a different resource.
    pub fn url(&self, path: &ApiPath, query: &[(String, String)]) -> UserdeskResult<Url> {
        if let Some(segment) = path.dot_segment() {
            return Err(UserdeskError::configuration(format!(
                "'{}' cannot be used as a path segment in {}",
                segment, path
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UserdeskError::configuration("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(path.segments());

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Merges default headers, the bearer token, and call-specific headers.
    fn headers(&self, extra: &[(String, String)]) -> UserdeskResult<HeaderMap> {
        let mut headers = self.default_headers.clone();

        if let Some(token) = self.session.bearer_token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| UserdeskError::configuration("Session token is not a valid header value"))?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in extra {
            let (name, value) = parse_header(name, value)?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn map_http_error(&self, status: StatusCode, body: &[u8]) -> UserdeskError {
        let code = status.as_u16();
        let message = extract_message_from_bytes(body)
            .or_else(|| self.api.status_message(code))
            .unwrap_or_else(|| format!("Request failed with status {}", code));
        debug!("HTTP {} error: {}", code, message);
        UserdeskError::http(code, message)
    }

    fn map_reqwest_error(&self, err: &reqwest::Error) -> UserdeskError {
        if err.is_timeout() {
            UserdeskError::Timeout(self.timeout)
        } else if err.is_connect() || err.is_request() {
            UserdeskError::Network(err.to_string())
        } else {
            UserdeskError::unknown(err.to_string())
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn parse_header(name: &str, value: &str) -> UserdeskResult<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| UserdeskError::configuration(format!("Invalid header name {}: {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| UserdeskError::configuration(format!("Invalid value for header {}: {}", name, e)))?;
    Ok((header_name, header_value))
}
