//! Model gateway
//!
//! The single chokepoint for every call to the remote model. Implementations
//! translate transport and protocol failures into an `ErrorKind` and never
//! retry; retry policy belongs to callers.

pub mod classify;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod ollama;
pub mod types;

use async_trait::async_trait;

use crate::error::AppResult;

pub use classify::{ClassificationRule, ErrorClassifier};
#[cfg(any(test, feature = "test-utils"))]
pub use mock::ScriptedGateway;
pub use ollama::OllamaGateway;
pub use types::{ConversationRequest, Message, ModelResponse, Role, SamplingOptions};

/// Trait defining the interface to a chat-completion model
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Gateway name for logging
    fn name(&self) -> &'static str;

    /// Send one conversation and wait for the complete response text
    async fn invoke(&self, request: &ConversationRequest) -> AppResult<ModelResponse>;
}
