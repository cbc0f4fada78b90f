//! Scripted gateway for tests
//!
//! Replies are consumed in order; every request is recorded so tests can
//! assert on call counts and message layout.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, AppResult, ErrorKind};
use crate::gateway::{ConversationRequest, ModelGateway, ModelResponse};

enum Reply {
    Text(String),
    Failure(ErrorKind, String),
}

/// Test double that returns pre-scripted replies
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ConversationRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.lock_replies().push_back(Reply::Text(text.into()));
        self
    }

    /// Queue a failed reply
    pub fn fail(self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.lock_replies()
            .push_back(Reply::Failure(kind, message.into()));
        self
    }

    /// Number of `invoke` calls received so far
    pub fn call_count(&self) -> usize {
        self.lock_requests().len()
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<ConversationRequest> {
        self.lock_requests().clone()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply>> {
        self.replies.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<ConversationRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn invoke(&self, request: &ConversationRequest) -> AppResult<ModelResponse> {
        self.lock_requests().push(request.clone());
        match self.lock_replies().pop_front() {
            Some(Reply::Text(text)) => Ok(ModelResponse::new(text)),
            Some(Reply::Failure(kind, message)) => Err(AppError::gateway(kind, message)),
            None => Err(AppError::gateway(
                ErrorKind::Unknown,
                "scripted gateway has no reply queued",
            )),
        }
    }
}
