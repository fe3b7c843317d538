use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use userdesk_client::{
    ApiPath, ApiRequest, HttpTransport, RequestObserver, RequestRecord, ResponseRecord, REDACTED,
};
use userdesk_config::{ApiConfig, Session};
use userdesk_core::UserdeskError;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer, session: Session) -> HttpTransport {
    let api = ApiConfig {
        base_url: format!("{}/api/v1", server.uri()),
        timeout_secs: 1,
        ..ApiConfig::default()
    };
    HttpTransport::new(&api, session).unwrap()
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("authorization", "Bearer abc"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uid": "john_doe"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server, Session::with_token("abc"));
    let me: Value = transport.get("/users/me").await.unwrap();
    assert_eq!(me["uid"], "john_doe");
}

#[tokio::test]
async fn test_anonymous_session_sends_no_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let _: Value = transport.get("/users").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_post_sends_json_body_and_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/a1/tokens"))
        .and(query_param("expires_in", "60"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"scope": "all"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "t"})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let request = ApiRequest::post(ApiPath::for_user("/users/{uid}/tokens", "a1"))
        .query("expires_in", 60)
        .json(&json!({"scope": "all"}))
        .unwrap();
    let token: Value = transport.send(request).await.unwrap();
    assert_eq!(token["token"], "t");
}

#[tokio::test]
async fn test_call_specific_header_wins() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("accept", "application/vnd.users+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let request = ApiRequest::get("/users").header("Accept", "application/vnd.users+json");
    let _: Value = transport.send(request).await.unwrap();
}

#[tokio::test]
async fn test_no_content_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/a1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/users/a1/trash"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let () = transport.delete("/users/a1").await.unwrap();

    let trashed: Option<Value> = transport
        .send(ApiRequest::post("/users/a1/trash"))
        .await
        .unwrap();
    assert_eq!(trashed, None);
}

#[tokio::test]
async fn test_error_message_priority() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": "Unprocessable",
            "message": "uid already taken"
        })))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let err = transport
        .post::<Value, _>("/users", &json!({"uid": "a1"}))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(422));
    assert_eq!(err.to_string(), "uid already taken");
}

#[tokio::test]
async fn test_errors_list_is_joined() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/users/a1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{"message": "bad email"}, "bad phone"]
        })))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let err = transport
        .put::<Value, _>("/users/a1", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "bad email, bad phone");
}

#[tokio::test]
async fn test_status_table_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/teapot"))
        .respond_with(ResponseTemplate::new(418))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());

    let err = transport.get::<Value>("/users/ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Resource not found.");

    let err = transport.get::<Value>("/users/teapot").await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status 418");
}

#[tokio::test]
async fn test_timeout_is_distinct_from_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let err = transport.get::<Value>("/users").await.unwrap_err();

    assert!(matches!(err, UserdeskError::Timeout(d) if d == Duration::from_secs(1)));
    assert_eq!(err.status_code(), None);
    assert_eq!(err.to_string(), "Request timed out after 1 seconds.");
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let err = transport.get::<Value>("/users").await.unwrap_err();
    assert!(matches!(err, UserdeskError::Decode(_)));
}

#[tokio::test]
async fn test_unexpected_shape_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "nope"})))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let err = transport.get::<Vec<String>>("/users").await.unwrap_err();
    assert!(matches!(err, UserdeskError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let api = ApiConfig {
        base_url: "http://127.0.0.1:1/api/v1".to_string(),
        timeout_secs: 5,
        ..ApiConfig::default()
    };
    let transport = HttpTransport::new(&api, Session::anonymous()).unwrap();

    let err = transport.get::<Value>("/users").await.unwrap_err();
    assert!(matches!(err, UserdeskError::Network(_)), "got {:?}", err);
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RequestObserver for RecordingObserver {
    fn on_request(&self, record: &RequestRecord<'_>) {
        let auth = record
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.events
            .lock()
            .unwrap()
            .push(format!("request {} {} {}", record.method, record.url.path(), auth));
    }

    fn on_response(&self, record: &ResponseRecord<'_>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("response {} {}", record.status, record.body));
    }
}

#[tokio::test]
async fn test_observer_sees_redacted_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"uid":"me1"}"#))
        .mount(&server)
        .await;

    let observer = Arc::new(RecordingObserver::default());
    let transport = transport(&server, Session::with_token("s3cret")).with_observer(observer.clone());
    let _: Value = transport.get("/users/me").await.unwrap();

    let events = observer.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            format!("request GET /api/v1/users/me {}", REDACTED),
            r#"response 200 {"uid":"me1"}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_optional_body_tolerates_plain_text() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User deleted"))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());

    let value = transport
        .execute_optional(ApiRequest::delete("/users/a1"))
        .await
        .unwrap();
    assert_eq!(value, Value::Null);

    let err = transport
        .execute(ApiRequest::delete("/users/a1"))
        .await
        .unwrap_err();
    assert!(matches!(err, UserdeskError::Decode(_)));
}

#[tokio::test]
async fn test_optional_body_still_reports_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/a1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let transport = transport(&server, Session::anonymous());
    let err = transport
        .execute_optional(ApiRequest::delete("/users/a1"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "Resource not found.");
}
