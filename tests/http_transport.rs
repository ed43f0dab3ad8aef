mod common;

use std::sync::Arc;
use std::time::Duration;

use common::mock_server::{MockResponse, MockServer};
use gamesync::auth::SecureString;
use gamesync::interactor::{CurrentUserRequest, RegisterRequest};
use gamesync::transport::{ApiClient, ReqwestTransport, TimeoutConfig, TransportError};

fn client(base_url: &str, timeouts: TimeoutConfig) -> ApiClient {
    ApiClient::new(Arc::new(ReqwestTransport::new(base_url, timeouts).unwrap()))
}

#[tokio::test]
async fn test_unauthenticated_post_has_json_body_and_no_bearer() {
    let server = MockServer::start().await;
    server
        .enqueue(MockResponse::json(
            r#"{"user": {"id": "u1", "name": "ada"}, "token": "tok-ada"}"#,
        ))
        .await;

    let api = client(&server.base_url(), TimeoutConfig::default());
    let request = RegisterRequest {
        name: "ada".to_string(),
    };
    let response = api.send(&request, None).await.unwrap();

    assert_eq!(response.user.name, "ada");
    assert_eq!(response.token.expose(), "tok-ada");

    let captured = server.captured_requests().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].method, "POST");
    assert_eq!(captured[0].path, "/users");
    assert_eq!(captured[0].header("content-type"), Some("application/json"));
    assert!(captured[0].header("authorization").is_none());
    assert_eq!(captured[0].json(), serde_json::json!({ "name": "ada" }));
}

#[tokio::test]
async fn test_credential_is_sent_as_bearer() {
    let server = MockServer::start().await;
    server
        .enqueue(MockResponse::json(r#"{"id": "u1", "name": "ada"}"#))
        .await;

    let api = client(&format!("{}/", server.base_url()), TimeoutConfig::default());
    let user = api
        .send(&CurrentUserRequest, Some(SecureString::new("tok-ada")))
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    let captured = server.captured_requests().await;
    assert_eq!(captured[0].method, "GET");
    assert_eq!(captured[0].path, "/users/me");
    assert_eq!(captured[0].header("authorization"), Some("Bearer tok-ada"));
    assert!(captured[0].body.is_empty());
}

#[tokio::test]
async fn test_error_status_carries_server_message() {
    let server = MockServer::start().await;
    server
        .enqueue(MockResponse::error(409, "name already taken"))
        .await;

    let api = client(&server.base_url(), TimeoutConfig::default());
    let err = api
        .send(
            &RegisterRequest {
                name: "ada".to_string(),
            },
            None,
        )
        .await
        .unwrap_err();

    match err {
        TransportError::Status { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "name already taken");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    server
        .enqueue(MockResponse::json(r#"{"id": "u1", "name": "ada"}"#).with_delay(500))
        .await;

    let timeouts = TimeoutConfig {
        connect: Duration::from_secs(1),
        request: Duration::from_millis(100),
    };
    let err = client(&server.base_url(), timeouts)
        .send(&CurrentUserRequest, Some(SecureString::new("t")))
        .await
        .unwrap_err();

    assert_eq!(err.error_type(), "timeout");
}

#[tokio::test]
async fn test_unreachable_server_is_a_connection_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"), TimeoutConfig::default())
        .send(&CurrentUserRequest, None)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Connection { .. }));
    assert_eq!(err.user_message(), "Cannot reach the server");
}
