//! Chat relay
//!
//! The ChatRelay handles one question per call:
//! 1. Analyzes the question and checks the educational gate
//! 2. Builds a system prompt from the persona and the analysis guidance
//! 3. Appends the caller-supplied context and the question
//! 4. Forwards everything to the provider and returns its reply verbatim
//!
//! The relay keeps no per-session state. Context arrives with each request.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{prompts, prompts_builtin, RelayConfig};
use crate::conversation::{recent_context, Message};
use crate::enrichment::{self, is_educational_query};
use crate::providers::{ChatProvider, ProviderError};

/// Request to the relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's question
    #[serde(default)]
    pub message: String,

    /// Prior turns, oldest first
    #[serde(default)]
    pub history: Vec<Message>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }
}

/// Successful relay reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Provider text, usually Markdown
    pub response: String,
}

/// Errors from the relay
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("No message provided")]
    EmptyMessage,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

pub struct ChatRelay {
    provider: Result<Arc<dyn ChatProvider>, String>,
    system_prompt: String,
    settings: RelayConfig,
}

impl ChatRelay {
    pub fn new(provider: Arc<dyn ChatProvider>, settings: RelayConfig) -> Self {
        Self {
            provider: Ok(provider),
            system_prompt: prompts_builtin::EDUBOT.to_string(),
            settings,
        }
    }

    /// A relay whose provider could not be built. Every question that
    /// passes validation fails with `NotConfigured`.
    pub fn unconfigured(reason: impl Into<String>, settings: RelayConfig) -> Self {
        Self {
            provider: Err(reason.into()),
            system_prompt: prompts_builtin::EDUBOT.to_string(),
            settings,
        }
    }

    /// Replace the built-in persona
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_ok()
    }

    /// Process a question and return the reply text
    pub async fn handle(&self, request: ChatRequest) -> Result<String, RelayError> {
        let question = request.message.trim();
        if question.is_empty() {
            return Err(RelayError::EmptyMessage);
        }
        tracing::debug!("Received user input: {}", question);

        let analysis = enrichment::analyze(question);
        tracing::debug!(
            question_type = ?analysis.question_type,
            complexity = ?analysis.complexity,
            concepts = ?analysis.key_concepts,
            "Analyzed question"
        );

        if self.settings.education_gate && !is_educational_query(question) {
            tracing::info!("Question failed the educational gate");
            return Ok(prompts_builtin::OFF_TOPIC.to_string());
        }

        let provider = self
            .provider
            .as_ref()
            .map_err(|reason| RelayError::NotConfigured(reason.clone()))?;

        let guidance = enrichment::guidance(question, &analysis);
        let mut messages = vec![Message::system(prompts::fill(&self.system_prompt, &guidance))];
        messages.extend(recent_context(&request.history, self.settings.history_window));
        messages.push(Message::user(question));

        let reply = provider.chat(&messages).await?;

        tracing::debug!(
            "Received response from {}: {}",
            provider.name(),
            reply.content.chars().take(100).collect::<String>()
        );

        Ok(reply.content)
    }
}
