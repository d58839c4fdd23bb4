//! Integration tests for error classification.
//!
//! These tests verify the status-to-kind mapping, JSON parse failures and
//! transport failures as seen through the public client API.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use serde_json::json;
use websupport_rest::{ErrorBody, ErrorKind, RestClient, RestError, TlsPolicy};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap()
}

async fn server_responding(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(template.clone())
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(template.clone())
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

// ============================================================================
// Status Mapping Tests
// ============================================================================

#[tokio::test]
async fn test_specific_statuses_map_to_specific_kinds() {
    let cases = [
        (401_u16, ErrorKind::Authentication),
        (403, ErrorKind::AccessDenied),
        (404, ErrorKind::NotFound),
        (500, ErrorKind::ServerError),
        (501, ErrorKind::NotImplemented),
    ];

    for (status, kind) in cases {
        let body = json!({"message": format!("failure {status}"), "code": status});
        let server = server_responding(ResponseTemplate::new(status).set_body_json(body.clone())).await;

        let mut client = RestClient::new(server.uri(), None).unwrap();
        let error = blocking(move || client.get("/v1/user/self", None)).await.unwrap_err();

        let RestError::Api(api_error) = error else {
            panic!("expected an API error for status {status}");
        };
        assert_eq!(api_error.kind, kind, "status {status}");
        assert_eq!(api_error.status, status);
        assert_eq!(api_error.body, ErrorBody::Json(body));
        assert_eq!(api_error.message, format!("failure {status}"));
    }
}

#[tokio::test]
async fn test_other_status_is_generic() {
    let server =
        server_responding(ResponseTemplate::new(418).set_body_json(json!({"message": "teapot"}))).await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.get("/v1/brew", None)).await.unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::Generic));
    assert_eq!(error.status(), Some(418));
    assert_eq!(error.message(), "teapot");
}

#[tokio::test]
async fn test_post_error_statuses_still_raise() {
    let server = server_responding(ResponseTemplate::new(403).set_body_json(json!({"message": "denied"}))).await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.post("/v1/user/self/zone", Some(json!({"name": "a.sk"}))))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::AccessDenied));
    assert_eq!(error.status(), Some(403));
}

#[tokio::test]
async fn test_delete_validation_status_is_error() {
    let server = server_responding(ResponseTemplate::new(422).set_body_json(json!({"errors": ["locked"]}))).await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.delete("/v1/user/self/zone/1", None))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::Generic));
    assert_eq!(error.status(), Some(422));
    assert_eq!(
        error.body().and_then(ErrorBody::as_json),
        Some(&json!({"errors": ["locked"]}))
    );
    // No `message` field: the reason phrase is used.
    assert_eq!(error.message(), "Unprocessable Entity");
}

// ============================================================================
// JSON Parse Failure Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_json_on_success_status() {
    let server = server_responding(ResponseTemplate::new(200).set_body_string("OK")).await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.get("/v1/user/self", None)).await.unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::JsonParse));
    assert_eq!(error.status(), Some(200));
    assert_eq!(error.message(), "Error while parsing json: OK");
    assert_eq!(error.body().and_then(ErrorBody::as_raw), Some("OK"));
}

#[tokio::test]
async fn test_invalid_json_takes_precedence_over_error_status() {
    let html = format!("<html><body>{}</body></html>", "Bad gateway ".repeat(40));
    let server = server_responding(ResponseTemplate::new(502).set_body_string(html.clone())).await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.get("/v1/user/self", None)).await.unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::JsonParse));
    assert_eq!(error.status(), Some(200));

    let snippet = error
        .message()
        .strip_prefix("Error while parsing json: ")
        .unwrap();
    assert_eq!(snippet.chars().count(), 250);
    assert!(html.starts_with(snippet));
    assert_eq!(error.body().and_then(ErrorBody::as_raw), Some(html.as_str()));
}

#[tokio::test]
async fn test_empty_body_is_json_parse_error() {
    let server = server_responding(ResponseTemplate::new(404)).await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.delete("/v1/user/self/zone/9", None))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::JsonParse));
    assert_eq!(error.status(), Some(200));
}

#[tokio::test]
async fn test_null_body_is_json_parse_error() {
    let server = server_responding(ResponseTemplate::new(200).set_body_string("null")).await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.get("/v1/user/self", None)).await.unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::JsonParse));
    assert_eq!(error.status(), Some(200));
    assert_eq!(error.message(), "Error while parsing json: null");
    assert_eq!(error.body().and_then(ErrorBody::as_raw), Some("null"));
}

#[tokio::test]
async fn test_undecodable_gzip_body_is_json_parse_error() {
    let server = server_responding(
        ResponseTemplate::new(200)
            .insert_header("content-encoding", "gzip")
            .set_body_string("this is not gzip"),
    )
    .await;

    let mut client = RestClient::new(server.uri(), None).unwrap();
    let error = blocking(move || client.get("/v1/user/self", None)).await.unwrap_err();

    assert_eq!(error.kind(), Some(ErrorKind::JsonParse));
    assert_eq!(error.status(), Some(200));
    assert_eq!(error.message(), "Error while parsing json: ");
    assert_eq!(error.body().and_then(ErrorBody::as_raw), Some(""));
}

// ============================================================================
// Transport Failure Tests
// ============================================================================

/// Accepts one connection and answers in plain HTTP, whatever the client sends.
fn plain_http_listener() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0_u8; 1024];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\n\r\n{}");
        }
    });
    format!("https://{addr}")
}

#[test]
fn test_connection_refused_is_transport_error() {
    // Port 1 (tcpmux) is not expected to be listening on a test host.
    let mut client = RestClient::new("http://127.0.0.1:1", None).unwrap();
    let error = client.get("/v1/user/self", None).unwrap_err();

    assert!(matches!(error, RestError::Transport { .. }));
    assert_eq!(error.kind(), None);
    assert_eq!(error.status(), None);
    assert!(error.body().is_none());
    assert!(!error.message().is_empty());
    assert_eq!(error.message().matches("refused").count(), 1, "{}", error.message());
}

#[test]
fn test_https_endpoint_without_valid_tls_is_transport_error() {
    let base_url = plain_http_listener();
    let mut client = RestClient::new(base_url, None).unwrap();
    assert_eq!(client.tls_policy(), TlsPolicy::Verify { ca_file: None });

    let error = client.get("/v1/user/self", None).unwrap_err();

    assert!(matches!(error, RestError::Transport { .. }), "{error:?}");
    assert_eq!(error.status(), None);
    assert!(error.body().is_none());
}

#[test]
fn test_invalid_ca_bundle_contents_is_transport_error() {
    let bundle = std::env::temp_dir().join(format!("websupport-rest-{}-bundle.pem", std::process::id()));
    std::fs::write(&bundle, "not a certificate").unwrap();

    let base_url = plain_http_listener();
    let mut client = RestClient::new(base_url, None).unwrap();
    client.set_ca_file(bundle.clone());

    let error = client.get("/v1/user/self", None).unwrap_err();
    let _ = std::fs::remove_file(&bundle);

    assert!(matches!(error, RestError::Transport { .. }), "{error:?}");
    assert_eq!(error.status(), None);
}

#[test]
fn test_unreadable_ca_bundle_is_transport_error() {
    let mut client = RestClient::new("https://127.0.0.1:1", None).unwrap();
    client.set_ca_file("/nonexistent/websupport-rest/bundle.pem");

    let error = client.get("/v1/user/self", None).unwrap_err();

    assert!(matches!(error, RestError::Transport { .. }));
    assert!(error.message().contains("bundle.pem"));
}
