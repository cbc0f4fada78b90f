//! Mock Ollama server for testing
//!
//! Provides wiremock-based mocks for `POST /api/chat`.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::mocks::ollama::MockOllamaServer;
//!
//! #[tokio::test]
//! async fn test_with_ollama_mock() {
//!     let mock_server = MockOllamaServer::start().await;
//!     mock_server.mock_chat_reply("onion, potato").await;
//!     // Use mock_server.uri() as OLLAMA_URL
//! }
//! ```

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Ollama server wrapper
pub struct MockOllamaServer {
    server: MockServer,
}

impl MockOllamaServer {
    /// Start a new mock Ollama server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Get all received requests (for assertion in tests)
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Bodies of all received chat requests, parsed as JSON
    pub async fn chat_bodies(&self) -> Vec<Value> {
        self.received_requests()
            .await
            .into_iter()
            .filter(|r| r.url.path() == "/api/chat")
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Mock a successful non-streaming chat reply
    pub async fn mock_chat_reply(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({ "stream": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(content)))
            .mount(&self.server)
            .await;
    }

    /// Mock a reply only for requests whose body contains `fragment`
    pub async fn mock_chat_reply_matching(&self, fragment: Value, content: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(fragment))
            .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(content)))
            .mount(&self.server)
            .await;
    }

    /// Mock the 404 Ollama returns for a model that is not pulled
    pub async fn mock_model_not_found(&self, model: &str) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": format!("model '{}' not found, try pulling it first", model)
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 response whose body is not JSON
    pub async fn mock_garbage_body(&self) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
            .mount(&self.server)
            .await;
    }

    /// Mock a 500 with a plain-text body
    pub async fn mock_internal_error(&self) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("out of memory"))
            .mount(&self.server)
            .await;
    }

    /// Mock a reply that arrives after `delay`
    pub async fn mock_slow_reply(&self, content: &str, delay: std::time::Duration) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_response(content))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }
}

/// Non-streaming `/api/chat` response body
pub fn chat_response(content: &str) -> Value {
    json!({
        "model": "gemma3:4b",
        "created_at": "2025-01-01T00:00:00Z",
        "message": { "role": "assistant", "content": content },
        "done": true
    })
}
