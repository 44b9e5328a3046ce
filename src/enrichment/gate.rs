//! Educational topic gate

use regex::RegexSet;
use std::sync::LazyLock;

use super::lexicon::EDUCATIONAL_DOMAINS;

/// Questions about the conversation itself
static CHAT_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(previous|last|earlier) (message|prompt|question)",
        r"what (did|was) (i|you) (say|ask|told|tell)",
        r"(show|display|get|fetch) (my|the) (history|conversation)",
        r"what (is|was) my",
        r"can you (remember|recall)",
        r"who (am i|are you)",
    ])
    .expect("chat patterns are valid")
});

static QUESTION_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"what (is|are|was|were) .+\?",
        r"how (do|does|can|could) .+\?",
        r"why (is|are|does|do) .+\?",
        r"explain .+",
        r"define .+",
        r"describe .+",
        r"teach me .+",
        r"learn about .+",
        r"understand .+",
        r"(help|assist) .+ (with|in) .+",
    ])
    .expect("question patterns are valid")
});

/// Whether a query is on-topic for the tutor.
pub fn is_educational_query(query: &str) -> bool {
    let lower = query.to_lowercase();

    CHAT_PATTERNS.is_match(&lower)
        || EDUCATIONAL_DOMAINS.iter().any(|d| lower.contains(d))
        || QUESTION_PATTERNS.is_match(&lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_patterns() {
        assert!(is_educational_query("What is photosynthesis?"));
        assert!(is_educational_query("How does a transistor work?"));
        assert!(is_educational_query("Explain quantum physics in simple terms"));
        assert!(is_educational_query("Can you help me with my essay in English?"));
    }

    #[test]
    fn test_domain_keywords() {
        assert!(is_educational_query("calculus homework"));
        assert!(is_educational_query("Some Political Science reading"));
    }

    #[test]
    fn test_chat_history_questions() {
        assert!(is_educational_query("What was my last question"));
        assert!(is_educational_query("who are you"));
    }

    #[test]
    fn test_off_topic() {
        assert!(!is_educational_query("order me a pizza"));
        assert!(!is_educational_query("lol"));
    }
}
