//! EduBot - educational AI chat relay and conversation client
//!
//! The relay side (`core`, `routes`, `providers`, `enrichment`) forwards one
//! question per request to an LLM provider. The client side (`client`) owns
//! the conversation state of a single chat session and renders it.

pub mod client;
pub mod config;
pub mod conversation;
pub mod core;
pub mod enrichment;
pub mod providers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::core::ChatRelay;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub relay: Arc<ChatRelay>,
}

/// Build the HTTP application with its middleware stack
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
