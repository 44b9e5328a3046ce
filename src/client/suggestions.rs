//! Quick topics and welcome suggestions

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: &'static str,
    pub prompt: &'static str,
}

/// Chips shown on the welcome screen
pub const WELCOME_CHIPS: &[Suggestion] = &[
    Suggestion {
        label: "Explain quantum physics",
        prompt: "Explain quantum physics in simple terms",
    },
    Suggestion {
        label: "Calculus help",
        prompt: "Help me solve calculus problems",
    },
    Suggestion {
        label: "World War II",
        prompt: "Teach me about World War II",
    },
    Suggestion {
        label: "Programming basics",
        prompt: "Programming fundamentals",
    },
];

/// Sidebar topics and the question each one suggests
pub const QUICK_TOPICS: &[(&str, &str)] = &[
    ("mathematics", "Explain calculus concepts and help me solve integration problems"),
    ("science", "Teach me about photosynthesis and cellular respiration"),
    ("programming", "Explain object-oriented programming principles"),
    ("history", "Explain the history of the Renaissance period and its impact"),
    ("literature", "Explain the themes of Shakespeare's Hamlet as a work of literature"),
    ("physics", "Explain Einstein's theory of relativity"),
];

/// Suggested question for a topic
pub fn topic_prompt(topic: &str) -> String {
    let key = topic.trim().to_lowercase();
    QUICK_TOPICS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, prompt)| prompt.to_string())
        .unwrap_or_else(|| format!("Tell me about {}", topic.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::is_educational_query;

    #[test]
    fn test_known_topic() {
        assert_eq!(
            topic_prompt("Physics"),
            "Explain Einstein's theory of relativity"
        );
    }

    #[test]
    fn test_suggestions_pass_the_education_gate() {
        let prompts = QUICK_TOPICS
            .iter()
            .map(|(_, prompt)| *prompt)
            .chain(WELCOME_CHIPS.iter().map(|chip| chip.prompt));
        for prompt in prompts {
            assert!(is_educational_query(prompt), "gated: {}", prompt);
        }
    }

    #[test]
    fn test_unknown_topic_falls_back() {
        assert_eq!(topic_prompt(" astronomy "), "Tell me about astronomy");
    }
}
