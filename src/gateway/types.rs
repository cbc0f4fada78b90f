//! Conversation types sent through the model gateway
//!
//! A `ConversationRequest` is validated once at construction and is read-only
//! afterwards: it always carries at least one message, and system messages
//! come before everything else.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Role of a message participant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions or context for the model
    System,
    /// Input from the human
    User,
}

/// A chat message with role, text, and optional local image attachments
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// The role of the message author
    pub role: Role,
    /// Text content
    pub content: String,
    /// Local image files attached to the message
    pub images: Vec<PathBuf>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            images: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// Attach a local image to this message
    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.images.push(image.into());
        self
    }
}

/// Sampling parameters; only temperature is honored
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
}

impl SamplingOptions {
    /// Temperature is clamped into `[0, 1]`
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: temperature.clamp(0.0, 1.0),
        }
    }
}

/// An immutable conversation handed to a `ModelGateway`
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationRequest {
    model: String,
    messages: Vec<Message>,
    options: SamplingOptions,
}

impl ConversationRequest {
    /// Validate and build a request
    ///
    /// Fails when `messages` is empty or a system message appears after a
    /// non-system one.
    pub fn new(
        model: impl Into<String>,
        messages: Vec<Message>,
        options: SamplingOptions,
    ) -> AppResult<Self> {
        if messages.is_empty() {
            return Err(AppError::InvalidRequest(
                "conversation must contain at least one message".to_string(),
            ));
        }

        let first_non_system = messages
            .iter()
            .position(|m| m.role != Role::System)
            .unwrap_or(messages.len());
        if messages[first_non_system..]
            .iter()
            .any(|m| m.role == Role::System)
        {
            return Err(AppError::InvalidRequest(
                "system messages must appear before any other message".to_string(),
            ));
        }

        Ok(Self {
            model: model.into(),
            messages,
            options,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn options(&self) -> SamplingOptions {
        self.options
    }
}

/// Text returned by the model for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelResponse {
    /// Raw response text, possibly empty
    pub content: String,
}

impl ModelResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
