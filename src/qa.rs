//! Grounded question answering over a generated recipe
//!
//! A `Session` pins the recipe text once at creation; every question is sent
//! with that recipe injected as system context. The session never treats an
//! empty question specially; ending the conversation is the caller's call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
    config::ModelSettings,
    error::{AppResult, ErrorKind},
    gateway::{ConversationRequest, Message, ModelGateway, SamplingOptions},
    recipe::Recipe,
};

/// Persona for every answer
pub const PERSONA_PROMPT: &str = "You are an expert cooking assistant QA bot. \
Answer the user's questions about cooking and recipes accurately and concisely in 1-2 sentences.";

/// One question/answer exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    /// Set when `answer` is an error message rather than a model reply
    pub failure: Option<ErrorKind>,
}

/// Conversation state for one Q&A run
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    context: Option<Recipe>,
    turns: Vec<Turn>,
}

impl Session {
    /// Start a session grounded in `recipe`
    pub fn new(recipe: Recipe) -> Self {
        Self::with_context(Some(recipe))
    }

    /// Start a session with no recipe context
    pub fn ungrounded() -> Self {
        Self::with_context(None)
    }

    fn with_context(context: Option<Recipe>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            context,
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn context(&self) -> Option<&Recipe> {
        self.context.as_ref()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    fn record(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

/// Answers follow-up questions about the session's recipe
pub struct QaAssistant {
    gateway: Arc<dyn ModelGateway>,
    settings: ModelSettings,
}

impl QaAssistant {
    pub fn new(gateway: Arc<dyn ModelGateway>, settings: ModelSettings) -> Self {
        Self { gateway, settings }
    }

    /// Answer a question; failures come back as an error sentence
    ///
    /// Every call appends a turn to `session`, including failed ones.
    pub async fn ask(&self, session: &mut Session, question: &str) -> String {
        let (answer, failure) = match self.try_ask(session, question).await {
            Ok(answer) => (answer, None),
            Err(err) => {
                warn!(kind = %err.kind(), error = %err, "Answer generation failed");
                (
                    format!("An error occurred while generating the answer: {}", err),
                    Some(err.kind()),
                )
            }
        };

        session.record(Turn {
            question: question.to_string(),
            answer: answer.clone(),
            failure,
        });
        answer
    }

    /// Answer a question as a typed result without recording a turn
    #[instrument(skip(self, session, question), fields(session_id = %session.id(), turn = session.turn_count() + 1))]
    pub async fn try_ask(&self, session: &Session, question: &str) -> AppResult<String> {
        let request = self.build_request(session, question)?;
        let response = self.gateway.invoke(&request).await?;
        debug!(chars = response.content.len(), "Received answer");
        Ok(response.content.trim().to_string())
    }

    fn build_request(&self, session: &Session, question: &str) -> AppResult<ConversationRequest> {
        let mut messages = vec![Message::system(PERSONA_PROMPT)];
        if let Some(recipe) = session.context().filter(|r| !r.text().is_empty()) {
            messages.push(Message::system(format!("Context:\n{}", recipe.text())));
        }
        messages.push(Message::user(question));

        ConversationRequest::new(
            self.settings.model.as_str(),
            messages,
            SamplingOptions::with_temperature(self.settings.answer_temperature),
        )
    }
}
