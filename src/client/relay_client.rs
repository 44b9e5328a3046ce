//! Transport from the conversation manager to the relay

use async_trait::async_trait;
use reqwest::Client;

use crate::core::{ChatRequest, ChatResponse};
use crate::routes::ErrorBody;

use super::PendingRequest;

#[derive(Debug, thiserror::Error)]
pub enum RelayClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Relay returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Malformed relay response: {0}")]
    Malformed(String),
}

/// Sends one question to the relay and returns the reply text
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn send(&self, request: &PendingRequest) -> Result<String, RelayClientError>;
}

/// `POST /chat` over HTTP
pub struct HttpRelayClient {
    client: Client,
    base_url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RelayClientError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: &PendingRequest) -> Result<String, RelayClientError> {
        let body = ChatRequest {
            message: request.message.clone(),
            history: request.history.clone(),
        };

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(RelayClientError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| RelayClientError::Malformed(e.to_string()))?;
        Ok(parsed.response)
    }
}
