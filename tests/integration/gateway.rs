//! Ollama gateway tests against a mock server
//!
//! Covers the wire format and the classification of each failure signature.

use std::time::Duration;

use fridge_chef::{
    gateway::{ConversationRequest, Message, ModelGateway, SamplingOptions},
    ErrorKind, FridgeChef, OllamaGateway,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{constants, image_fixture, test_config, test_config_with_timeout};
use crate::mocks::MockOllamaServer;

fn gateway_for(url: &str) -> OllamaGateway {
    OllamaGateway::new(reqwest::Client::new(), &test_config(url))
}

fn question(text: &str) -> ConversationRequest {
    ConversationRequest::new(
        constants::TEST_MODEL,
        vec![Message::system("be brief"), Message::user(text)],
        SamplingOptions::with_temperature(0.2),
    )
    .unwrap()
}

#[tokio::test]
async fn test_invoke_returns_message_content() {
    let server = MockOllamaServer::start().await;
    server.mock_chat_reply("Boil for 10 minutes.").await;

    let response = gateway_for(&server.uri())
        .invoke(&question("How long?"))
        .await
        .unwrap();

    assert_eq!(response.content, "Boil for 10 minutes.");
}

#[tokio::test]
async fn test_request_body_matches_ollama_chat_format() {
    let server = MockOllamaServer::start().await;
    server.mock_chat_reply("ok").await;
    let image = image_fixture();

    let request = ConversationRequest::new(
        constants::TEST_MODEL,
        vec![Message::user("What is in the fridge?").with_image(image.path())],
        SamplingOptions::with_temperature(0.1),
    )
    .unwrap();
    gateway_for(&server.uri()).invoke(&request).await.unwrap();

    let bodies = server.chat_bodies().await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["model"], constants::TEST_MODEL);
    assert_eq!(body["stream"], false);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "What is in the fridge?");
    assert_eq!(
        body["messages"][0]["images"],
        json!([constants::FAKE_IMAGE_BASE64])
    );
    let temperature = body["options"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.1).abs() < 1e-6);
}

#[tokio::test]
async fn test_text_only_messages_omit_images() {
    let server = MockOllamaServer::start().await;
    server.mock_chat_reply("ok").await;

    gateway_for(&server.uri())
        .invoke(&question("hi"))
        .await
        .unwrap();

    let body = &server.chat_bodies().await[0];
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(body["messages"][0].get("images").is_none());
    assert!(body["messages"][1].get("images").is_none());
}

#[tokio::test]
async fn test_missing_model_is_model_not_found() {
    let server = MockOllamaServer::start().await;
    server.mock_model_not_found(constants::TEST_MODEL).await;

    let err = gateway_for(&server.uri())
        .invoke(&question("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ModelNotFound);
    assert!(err.to_string().contains("try pulling it first"));
}

#[tokio::test]
async fn test_unparseable_body_is_malformed_response() {
    let server = MockOllamaServer::start().await;
    server.mock_garbage_body().await;

    let err = gateway_for(&server.uri())
        .invoke(&question("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_unrecognized_status_is_unknown() {
    let server = MockOllamaServer::start().await;
    server.mock_internal_error().await;

    let err = gateway_for(&server.uri())
        .invoke(&question("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert!(err.to_string().contains("out of memory"));
}

#[tokio::test]
async fn test_refused_connection_is_endpoint_unreachable() {
    let err = gateway_for(constants::UNREACHABLE_URL)
        .invoke(&question("hi"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EndpointUnreachable);
}

#[tokio::test]
async fn test_configured_timeout_is_classified() {
    let server = MockOllamaServer::start().await;
    server
        .mock_slow_reply("too late", Duration::from_secs(2))
        .await;

    let config = test_config_with_timeout(&server.uri(), Duration::from_millis(200));
    let chef = FridgeChef::new(&config).unwrap();
    let err = chef
        .generator
        .try_generate(&["egg"].into_iter().collect())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
}
