//! Application configuration
//!
//! Environment variables win over the optional TOML file named by
//! `EDUBOT_CONFIG`. Paths inside that file are relative to the file itself.

pub mod file;
pub mod prompts;

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use file::{ConfigError, GenerationConfig, RelayConfig, RelayFile};
pub use prompts::{builtin as prompts_builtin, PromptTemplate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub provider: String,
    pub model: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub ollama_url: Option<String>,
    pub timeout_secs: u64,
    pub generation: GenerationConfig,
    pub relay: RelayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            provider: "gemini".into(),
            model: None,
            gemini_api_key: None,
            gemini_base_url: None,
            openai_api_key: None,
            openai_base_url: None,
            ollama_url: None,
            timeout_secs: 120,
            generation: GenerationConfig::default(),
            relay: RelayConfig::default(),
        }
    }
}

impl Config {
    pub async fn from_env() -> anyhow::Result<Self> {
        let file = match env::var("EDUBOT_CONFIG") {
            Ok(path) => {
                let path = PathBuf::from(path);
                tracing::info!("Loading relay config from {}", path.display());
                Some(RelayFile::from_file(&path).await?)
            }
            Err(_) => None,
        };

        Ok(Self::from_sources(|key| env::var(key).ok(), file))
    }

    /// Merge an environment lookup with an optional config file.
    pub fn from_sources<F>(lookup: F, file: Option<RelayFile>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let file = file.unwrap_or_default();
        let llm = file.llm;

        let provider = lookup("EDUBOT_PROVIDER")
            .or(llm.provider)
            .unwrap_or(defaults.provider)
            .to_lowercase();

        // A file-named key variable is consulted for whichever provider is active.
        let file_key = llm.api_key_env.as_deref().and_then(&lookup);
        let keyed = |var: &str, name: &str| {
            lookup(var).or_else(|| (provider == name).then(|| file_key.clone()).flatten())
        };
        let gemini_api_key = keyed("GEMINI_API_KEY", "gemini");
        let openai_api_key = keyed("OPENAI_API_KEY", "openai");

        let endpoint_for = |name: &str| (provider == name).then(|| llm.endpoint.clone()).flatten();

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            model: lookup("EDUBOT_MODEL").or(llm.model),
            gemini_api_key,
            gemini_base_url: lookup("GEMINI_BASE_URL").or_else(|| endpoint_for("gemini")),
            openai_api_key,
            openai_base_url: lookup("OPENAI_BASE_URL").or_else(|| endpoint_for("openai")),
            ollama_url: lookup("OLLAMA_URL").or_else(|| endpoint_for("ollama")),
            timeout_secs: llm.timeout_secs.unwrap_or(defaults.timeout_secs),
            generation: file.generation,
            relay: file.relay,
            provider,
        }
    }
}
