//! Ollama chat client
//!
//! Sends conversations to the Ollama `/api/chat` endpoint. Image attachments
//! are read from disk and base64-encoded inside each call, so no file handle
//! outlives a single invocation.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    gateway::{
        classify::ErrorClassifier,
        types::{ConversationRequest, ModelResponse, Role, SamplingOptions},
        ModelGateway,
    },
};

/// Request body for `POST /api/chat`
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Gateway backed by an Ollama server
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
    classifier: ErrorClassifier,
}

impl OllamaGateway {
    /// Create a new Ollama gateway
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.ollama_url.clone(),
            classifier: ErrorClassifier::default(),
        }
    }

    /// Replace the failure classification table
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    fn fail(&self, description: String) -> AppError {
        let kind = self.classifier.classify(&description);
        error!(kind = %kind, error = %description, "Model request failed");
        AppError::gateway(kind, description)
    }

    async fn encode_images(images: &[PathBuf]) -> AppResult<Vec<String>> {
        let mut encoded = Vec::with_capacity(images.len());
        for path in images {
            let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AppError::ResourceNotFound(path.to_path_buf()),
                _ => AppError::Io(e),
            })?;
            debug!(path = %path.display(), bytes = bytes.len(), "Encoded image attachment");
            encoded.push(STANDARD.encode(bytes));
        }
        Ok(encoded)
    }
}

/// Flatten a transport error and its causes into one searchable line
fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }

    if err.is_timeout() {
        format!("timeout: {}", description)
    } else if err.is_connect() {
        format!("connection error: {}", description)
    } else if err.is_decode() {
        format!("decode error: {}", description)
    } else {
        description
    }
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    fn name(&self) -> &'static str {
        "ollama"
    }

    #[instrument(skip(self, request), fields(model = %request.model(), messages = request.messages().len()))]
    async fn invoke(&self, request: &ConversationRequest) -> AppResult<ModelResponse> {
        let url = format!("{}/api/chat", self.base_url);

        let mut messages = Vec::with_capacity(request.messages().len());
        for message in request.messages() {
            messages.push(ChatMessage {
                role: message.role,
                content: &message.content,
                images: Self::encode_images(&message.images).await?,
            });
        }

        let body = ChatRequest {
            model: request.model(),
            messages,
            stream: false,
            options: request.options(),
        };

        debug!(url = %url, temperature = body.options.temperature, "Sending chat request to Ollama");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.fail(describe_transport_error(&e)))?;

        let status = response.status();
        debug!(status = %status, "Ollama chat response status");

        let text = response
            .text()
            .await
            .map_err(|e| self.fail(describe_transport_error(&e)))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(self.fail(format!("{}: {}", status, detail)));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| self.fail(format!("decode error: {}", e)))?;

        debug!(chars = parsed.message.content.len(), "Received chat response");
        Ok(ModelResponse::new(parsed.message.content))
    }
}
