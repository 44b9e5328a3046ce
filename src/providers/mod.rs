//! AI provider integrations

mod gemini;
mod ollama;
mod openai_compat;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;
use crate::conversation::Message;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use ollama::OllamaProvider;
pub use openai_compat::{OpenAICompatConfig, OpenAICompatProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A chat-completion backend.
///
/// `messages` starts with the system turn, followed by prior context and
/// the new user turn.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    async fn chat(&self, messages: &[Message]) -> Result<Message, ProviderError>;
}

pub enum Provider {
    Gemini(GeminiProvider),
    OpenAI(OpenAICompatProvider),
    Ollama(OllamaProvider),
}

impl Provider {
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::from_name(&config.provider, config)
    }

    pub fn from_name(name: &str, config: &Config) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let generation = config.generation.clone();

        match name.to_lowercase().as_str() {
            "gemini" => {
                let api_key = config
                    .gemini_api_key
                    .clone()
                    .ok_or_else(|| ProviderError::NotConfigured("GEMINI_API_KEY is not set".into()))?;
                let mut gemini = GeminiConfig::new(api_key);
                if let Some(url) = &config.gemini_base_url {
                    gemini.base_url = url.clone();
                }
                if let Some(model) = &config.model {
                    gemini.model = model.clone();
                }
                gemini.generation = generation;
                gemini.timeout = timeout;
                Ok(Provider::Gemini(GeminiProvider::new(gemini)?))
            }
            "openai" => {
                let mut openai = openai_preset(config)?;
                if let Some(model) = &config.model {
                    openai.default_model = model.clone();
                }
                openai.generation = generation;
                openai.timeout = timeout;
                Ok(Provider::OpenAI(OpenAICompatProvider::new(openai)?))
            }
            "ollama" => {
                let url = config
                    .ollama_url
                    .clone()
                    .unwrap_or_else(|| "http://localhost:11434".into());
                let model = config.model.clone().unwrap_or_else(|| "llama3.2".into());
                Ok(Provider::Ollama(OllamaProvider::new(
                    url, model, generation, timeout,
                )?))
            }
            _ => Err(ProviderError::UnknownProvider(name.to_string())),
        }
    }
}

/// Pick the OpenAI-compatible preset matching the configured endpoint.
///
/// A custom endpoint without a key is treated as a local server.
fn openai_preset(config: &Config) -> Result<OpenAICompatConfig, ProviderError> {
    let api_key = config.openai_api_key.clone();

    match (&config.openai_base_url, api_key) {
        (None, Some(key)) => Ok(OpenAICompatConfig::openai(key)),
        (None, None) => Err(ProviderError::NotConfigured(
            "OPENAI_API_KEY is not set".into(),
        )),
        (Some(url), Some(key)) if url.contains("api.groq.com") => Ok(OpenAICompatConfig {
            base_url: url.clone(),
            ..OpenAICompatConfig::groq(key)
        }),
        (Some(url), api_key) => Ok(OpenAICompatConfig {
            api_key,
            ..OpenAICompatConfig::local(url.clone(), "gpt-4o-mini")
        }),
    }
}

#[async_trait]
impl ChatProvider for Provider {
    fn name(&self) -> &str {
        match self {
            Provider::Gemini(_) => "gemini",
            Provider::OpenAI(_) => "openai",
            Provider::Ollama(_) => "ollama",
        }
    }

    async fn chat(&self, messages: &[Message]) -> Result<Message, ProviderError> {
        match self {
            Provider::Gemini(p) => p.chat(messages).await,
            Provider::OpenAI(p) => p.chat(messages).await,
            Provider::Ollama(p) => p.chat(messages).await,
        }
    }
}
