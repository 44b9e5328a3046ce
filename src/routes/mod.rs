//! API routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::core::{ChatRequest, ChatResponse, RelayError};
use crate::AppState;

/// Shown for any provider-side failure
pub const GENERIC_FAILURE: &str = "The assistant could not answer right now. Please try again.";

const NOT_CONFIGURED: &str = "The assistant is not configured. Please contact the administrator.";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    provider: String,
    provider_configured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned to HTTP clients. Internal detail is logged, never sent.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::EmptyMessage => {
                tracing::warn!("No message provided in request");
                Self::new(StatusCode::BAD_REQUEST, RelayError::EmptyMessage.to_string())
            }
            RelayError::NotConfigured(reason) => {
                tracing::error!("Chat provider unavailable: {}", reason);
                Self::new(StatusCode::SERVICE_UNAVAILABLE, NOT_CONFIGURED)
            }
            RelayError::Provider(e) => {
                tracing::error!("Provider call failed: {}", e);
                Self::new(StatusCode::BAD_GATEWAY, GENERIC_FAILURE)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected chat body: {}", rejection.body_text());
        Self::new(StatusCode::BAD_REQUEST, "Invalid JSON body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.config.provider.clone(),
        provider_configured: state.relay.is_configured(),
    })
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = body?;
    let response = state.relay.handle(request).await?;
    Ok(Json(ChatResponse { response }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RelayConfig};
    use crate::conversation::Message;
    use crate::core::ChatRelay;
    use crate::providers::{ChatProvider, ProviderError};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FixedProvider(Result<&'static str, &'static str>);

    #[async_trait]
    impl ChatProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn chat(&self, _messages: &[Message]) -> Result<Message, ProviderError> {
            match self.0 {
                Ok(text) => Ok(Message::assistant(text)),
                Err(detail) => Err(ProviderError::InvalidResponse(detail.into())),
            }
        }
    }

    fn app(relay: ChatRelay) -> Router {
        router().with_state(AppState {
            config: Config::default(),
            relay: Arc::new(relay),
        })
    }

    fn app_with(provider: FixedProvider) -> Router {
        app(ChatRelay::new(Arc::new(provider), RelayConfig::default()))
    }

    async fn post_chat(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::post("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_chat_success() {
        let app = app_with(FixedProvider(Ok("Photosynthesis is...")));
        let (status, body) = post_chat(app, r#"{"message":"What is photosynthesis?"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"response": "Photosynthesis is..."}));
    }

    #[tokio::test]
    async fn test_chat_accepts_history() {
        let app = app_with(FixedProvider(Ok("Yes.")));
        let (status, _) = post_chat(
            app,
            r#"{"message":"Explain more","history":[{"role":"user","content":"What is a cell?"},{"role":"assistant","content":"A unit of life."}]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_provider_failure_is_generic() {
        let app = app_with(FixedProvider(Err("API error: key sk-secret revoked")));
        let (status, body) = post_chat(app, r#"{"message":"What is gravity?"}"#).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], GENERIC_FAILURE);
        assert!(!body.to_string().contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_missing_message() {
        let app = app_with(FixedProvider(Ok("unused")));
        let (status, body) = post_chat(app, r#"{}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No message provided");
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let app = app_with(FixedProvider(Ok("unused")));
        let (status, body) = post_chat(app, "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unconfigured_provider() {
        let app = app(ChatRelay::unconfigured("no key", RelayConfig::default()));
        let (status, body) = post_chat(app, r#"{"message":"What is gravity?"}"#).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(FixedProvider(Ok("unused")));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "gemini");
        assert_eq!(body["provider_configured"], true);
    }
}
