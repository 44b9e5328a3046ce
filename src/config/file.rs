//! Relay configuration loaded from a TOML file
//!
//! The file is optional. It tunes:
//! - Which LLM provider and model are used
//! - Generation parameters sent to the provider
//! - Relay behaviour (educational gate, context window, persona file)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Root relay configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayFile {
    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Generation parameters
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Relay behaviour
    #[serde(default)]
    pub relay: RelayConfig,
}

impl RelayFile {
    /// Load configuration from a TOML file.
    ///
    /// A relative `prompt_file` is resolved against the file's directory.
    pub async fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).await?;
        let mut config = Self::parse(&content)?;
        if let Some(dir) = path.parent() {
            config.relay.resolve_paths(dir);
        }
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: RelayFile = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.generation;
        if !(0.0..=2.0).contains(&g.temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature must be within 0.0..=2.0, got {}",
                g.temperature
            )));
        }
        if !(0.0..=1.0).contains(&g.top_p) {
            return Err(ConfigError::Validation(format!(
                "top_p must be within 0.0..=1.0, got {}",
                g.top_p
            )));
        }
        if g.max_output_tokens == 0 {
            return Err(ConfigError::Validation(
                "max_output_tokens must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name: "gemini", "openai", "ollama"
    #[serde(default)]
    pub provider: Option<String>,

    /// Model to use
    #[serde(default)]
    pub model: Option<String>,

    /// API key environment variable name (for cloud providers)
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Custom API endpoint
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Provider request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Sampling parameters forwarded to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    1024
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Relay behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Redirect non-educational questions without calling the provider
    #[serde(default = "default_true")]
    pub education_gate: bool,

    /// Number of prior turns forwarded to the provider
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Persona TOML file overriding the built-in system prompt
    #[serde(default)]
    pub prompt_file: Option<PathBuf>,
}

impl RelayConfig {
    fn resolve_paths(&mut self, base: &Path) {
        if let Some(file) = self.prompt_file.as_mut() {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_window() -> usize {
    10
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            education_gate: true,
            history_window: default_history_window(),
            prompt_file: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = r#"
[llm]
provider = "openai"
model = "gpt-4o-mini"
endpoint = "https://api.groq.com/openai/v1"
api_key_env = "GROQ_API_KEY"
timeout_secs = 30

[generation]
temperature = 0.2
max_output_tokens = 512

[relay]
education_gate = false
history_window = 4
prompt_file = "prompts/tutor.toml"
"#;

    #[test]
    fn test_parse_config() {
        let config = RelayFile::parse(SAMPLE_CONFIG).unwrap();

        assert_eq!(config.llm.provider.as_deref(), Some("openai"));
        assert_eq!(config.llm.api_key_env.as_deref(), Some("GROQ_API_KEY"));
        assert_eq!(config.llm.timeout_secs, Some(30));

        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.top_k, 40); // Default
        assert_eq!(config.generation.max_output_tokens, 512);

        assert!(!config.relay.education_gate);
        assert_eq!(config.relay.history_window, 4);
        assert_eq!(
            config.relay.prompt_file,
            Some(PathBuf::from("prompts/tutor.toml"))
        );
    }

    #[test]
    fn test_empty_config() {
        let config = RelayFile::parse("").unwrap();
        assert!(config.llm.provider.is_none());
        assert_eq!(config.generation, GenerationConfig::default());
        assert!(config.relay.education_gate);
        assert_eq!(config.relay.history_window, 10);
    }

    #[tokio::test]
    async fn test_prompt_file_relative_to_config_file() {
        let dir = std::env::temp_dir().join(format!("edubot-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("relay.toml");
        fs::write(&path, "[relay]\nprompt_file = \"personas/tutor.toml\"\n")
            .await
            .unwrap();

        let config = RelayFile::from_file(&path).await.unwrap();
        fs::remove_dir_all(&dir).await.unwrap();

        assert_eq!(
            config.relay.prompt_file,
            Some(dir.join("personas/tutor.toml"))
        );
    }

    #[test]
    fn test_absolute_prompt_file_kept() {
        let mut relay = RelayConfig {
            prompt_file: Some(PathBuf::from("/etc/edubot/tutor.toml")),
            ..RelayConfig::default()
        };
        relay.resolve_paths(Path::new("/srv/edubot"));
        assert_eq!(relay.prompt_file, Some(PathBuf::from("/etc/edubot/tutor.toml")));
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let err = RelayFile::from_file(Path::new("/nonexistent/relay.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let err = RelayFile::parse("[generation]\ntemperature = 3.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
