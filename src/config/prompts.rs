//! Persona templates and the built-in tutor prompt
//!
//! A persona file replaces the built-in system prompt. The `{guidance}`
//! placeholder is substituted with the per-question enrichment guidance.
//!
//! # Example Prompt File
//!
//! ```toml
//! [persona]
//! name = "Chemistry Tutor"
//!
//! [system_prompt]
//! content = """
//! You are a chemistry tutor.
//!
//! {guidance}
//! """
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Placeholder replaced by enrichment guidance
pub const GUIDANCE_PLACEHOLDER: &str = "{guidance}";

/// A persona/prompt template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplate {
    /// Persona metadata
    pub persona: PersonaInfo,

    /// The system prompt
    pub system_prompt: SystemPrompt,
}

/// Persona metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaInfo {
    /// Display name of the persona, used in logs
    pub name: String,
}

/// System prompt content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPrompt {
    /// The full system prompt content
    pub content: String,
}

impl PromptTemplate {
    /// Load a template from a file path
    pub async fn load_from_file(path: &Path) -> Result<Self, PromptError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| PromptError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, PromptError> {
        let template: PromptTemplate =
            toml::from_str(content).map_err(|e| PromptError::ParseError(e.to_string()))?;

        if template.system_prompt.content.trim().is_empty() {
            return Err(PromptError::Empty(template.persona.name));
        }
        Ok(template)
    }
}

/// Fill a system prompt with guidance.
///
/// Prompts without the placeholder get the guidance appended.
pub fn fill(prompt: &str, guidance: &str) -> String {
    if prompt.contains(GUIDANCE_PLACEHOLDER) {
        prompt.replace(GUIDANCE_PLACEHOLDER, guidance)
    } else {
        format!("{}\n\n{}", prompt.trim_end(), guidance)
    }
}

/// Errors from prompt loading
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Persona '{0}' has an empty system prompt")]
    Empty(String),
}

/// Built-in prompts that don't require files
pub mod builtin {
    /// Default tutor persona. `{guidance}` is filled per question.
    pub const EDUBOT: &str = r#"You are EduBot, an educational assistant focused on helping students learn while also being able to engage in natural conversation.

{guidance}

Your primary focus is educational content, but you should also:
1. Be able to respond to questions about the conversation history
2. Answer when users ask about their previous messages or prompts
3. Remember and reference previous questions and answers when relevant

When explaining educational concepts:
- Break down complex ideas into simpler parts
- Use analogies when helpful
- Include examples to illustrate points
- Highlight key concepts or vocabulary
- Mention real-world applications when relevant
- Adjust your explanation level based on the question complexity

If someone asks to see their previous message or what they asked before, show them their previous prompt.
Maintain a conversational, friendly tone while being informative and helpful.

If you're not sure about a fact, acknowledge the uncertainty rather than providing potentially incorrect information."#;

    /// Reply for questions that fail the educational gate
    pub const OFF_TOPIC: &str = "I'm an educational assistant and can help you with academic topics like math, science, history, and literature. Could you please ask me something related to education or learning?";
}
