//! HTTP-level request validation against a live server

use codec::EnvelopeCodec;
use function_e2e_tests::{greeter_request, TestServer};
use function_server::Greeter;
use functions::FunctionRegistry;
use reqwest::StatusCode;
use statefun_config::{ServerConfig, CONTENT_TYPE};

async fn server() -> TestServer {
    let mut registry = FunctionRegistry::new();
    registry.register(Greeter::function_type(), Greeter::default());
    TestServer::start(registry).await.unwrap()
}

fn encoded_request() -> Vec<u8> {
    EnvelopeCodec::default().encode_request(&greeter_request().unwrap()).unwrap()
}

#[tokio::test]
async fn test_get_is_not_allowed() {
    let server = server().await;

    let response = server.client().get(server.url()).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_wrong_content_type() {
    let server = server().await;

    let response = server
        .client()
        .post(server.url())
        .header(reqwest::header::CONTENT_TYPE, "text/plain")
        .body(encoded_request())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_empty_body() {
    let server = server().await;

    let response = server.post_bytes(Vec::new()).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body() {
    let server = server().await;

    let response = server.post_bytes(b"bad content".to_vec()).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body() {
    let mut registry = FunctionRegistry::new();
    registry.register(Greeter::function_type(), Greeter::default());
    let config = ServerConfig {
        max_request_bytes: 16,
        ..ServerConfig::default()
    };
    let server = TestServer::start_with_config(registry, config).await.unwrap();

    let response = server.post_bytes(encoded_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_success_carries_octet_stream() {
    let server = server().await;

    let response = server.post_bytes(encoded_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[reqwest::header::CONTENT_TYPE], CONTENT_TYPE);
}
