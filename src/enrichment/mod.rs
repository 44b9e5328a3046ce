//! Lightweight linguistic analysis of incoming questions
//!
//! The analysis never leaves the relay. It only shapes the guidance block
//! placed in the system prompt:
//! 1. Tokenize and drop stop words
//! 2. Stem the remaining tokens
//! 3. Pick out content words as key concepts
//! 4. Classify the question and estimate its complexity

mod gate;
pub mod lexicon;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

pub use gate::is_educational_query;

/// Key concepts listed in the guidance block
const MAX_GUIDANCE_CONCEPTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    General,
    Definition,
    Procedural,
    Conceptual,
    Comparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Result of analyzing a single question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Stemmed content tokens
    pub tokens: Vec<String>,
    /// Content words in order of first appearance
    pub key_concepts: Vec<String>,
    pub question_type: QuestionType,
    pub complexity: Complexity,
    pub sentence_count: usize,
    /// Number of non-stop-word tokens
    pub word_count: usize,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            key_concepts: Vec::new(),
            question_type: QuestionType::General,
            complexity: Complexity::Medium,
            sentence_count: 0,
            word_count: 0,
        }
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty())
}

fn sentences(text: &str) -> Vec<&str> {
    text.split(|c| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Analyze a question.
pub fn analyze(text: &str) -> Analysis {
    let lower = text.to_lowercase();
    let meaningful: Vec<&str> = words(&lower)
        .filter(|w| !lexicon::is_stop_word(w))
        .collect();

    if words(&lower).next().is_none() {
        return Analysis::default();
    }

    let stemmer = Stemmer::create(Algorithm::English);
    let tokens = meaningful
        .iter()
        .map(|w| stemmer.stem(w).into_owned())
        .collect();

    let mut key_concepts: Vec<String> = Vec::new();
    for word in &meaningful {
        let is_concept = word.chars().count() >= 3
            && !word.chars().all(|c| c.is_ascii_digit())
            && !lexicon::is_request_word(word);
        if is_concept && !key_concepts.iter().any(|k| k == word) {
            key_concepts.push(word.to_string());
        }
    }

    let question_type = classify(&lower);

    let sentence_list = sentences(text);
    let sentence_count = sentence_list.len().max(1);
    let total_words: usize = sentence_list.iter().map(|s| words(s).count()).sum();
    let avg_sentence_length = total_words as f64 / sentence_count as f64;

    let complexity = if avg_sentence_length > 15.0 || key_concepts.len() > 5 {
        Complexity::High
    } else if avg_sentence_length < 8.0 && key_concepts.len() < 3 {
        Complexity::Low
    } else {
        Complexity::Medium
    };

    Analysis {
        tokens,
        key_concepts,
        question_type,
        complexity,
        sentence_count,
        word_count: meaningful.len(),
    }
}

// Substring checks, first match wins.
fn classify(lower: &str) -> QuestionType {
    let any = |cues: &[&str]| cues.iter().any(|cue| lower.contains(cue));

    if any(&["what", "define", "explain"]) {
        QuestionType::Definition
    } else if any(&["how", "solve", "calculate"]) {
        QuestionType::Procedural
    } else if any(&["why", "because", "reason"]) {
        QuestionType::Conceptual
    } else if any(&["compare", "difference", "similar"]) {
        QuestionType::Comparison
    } else {
        QuestionType::General
    }
}

/// Build the guidance block inserted into the system prompt.
pub fn guidance(question: &str, analysis: &Analysis) -> String {
    let mut out = format!("User question: {}\n\n", question);

    let type_hint = match analysis.question_type {
        QuestionType::Definition => Some("This appears to be a definition question. Please provide a clear, comprehensive explanation with examples."),
        QuestionType::Procedural => Some("This appears to be a procedural question. Please provide step-by-step instructions or methods."),
        QuestionType::Conceptual => Some("This appears to be a conceptual question. Please explain the underlying principles and reasoning."),
        QuestionType::Comparison => Some("This appears to be a comparison question. Please highlight similarities and differences clearly."),
        QuestionType::General => None,
    };
    if let Some(hint) = type_hint {
        out.push_str(hint);
        out.push('\n');
    }

    match analysis.complexity {
        Complexity::High => out.push_str("This is a complex question. Please break down the answer into manageable parts and use clear explanations.\n"),
        Complexity::Low => out.push_str("This is a straightforward question. Please provide a concise but complete answer.\n"),
        Complexity::Medium => {}
    }

    if !analysis.key_concepts.is_empty() {
        let concepts = analysis
            .key_concepts
            .iter()
            .take(MAX_GUIDANCE_CONCEPTS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "Key concepts identified: {}. Please make sure to address these in your response.\n",
            concepts
        ));
    }

    out
}
