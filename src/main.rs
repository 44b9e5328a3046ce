//! EduBot relay server
//!
//! Serves `POST /chat` and `GET /health`.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edubot::config::{Config, PromptTemplate};
use edubot::core::ChatRelay;
use edubot::providers::Provider;
use edubot::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edubot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().await?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // A missing key is not fatal: the relay answers 503 until it is configured.
    let mut relay = match Provider::from_config(&config) {
        Ok(provider) => {
            tracing::info!("🧠 Using {} provider", config.provider);
            ChatRelay::new(Arc::new(provider), config.relay.clone())
        }
        Err(e) => {
            tracing::error!("Chat provider unavailable: {}", e);
            ChatRelay::unconfigured(e.to_string(), config.relay.clone())
        }
    };

    if let Some(path) = &config.relay.prompt_file {
        let template = PromptTemplate::load_from_file(path).await?;
        tracing::info!("🎓 Loaded persona '{}'", template.persona.name);
        relay = relay.with_system_prompt(template.system_prompt.content);
    }

    let state = AppState {
        config,
        relay: Arc::new(relay),
    };

    let app = edubot::app(state);

    tracing::info!("🔥 EduBot relay running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
