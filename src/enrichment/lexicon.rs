//! Word lists used by the analyzer and the educational gate

/// English stop words
pub const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
    "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn", "could", "would",
    "might", "must", "shall", "may",
];

/// Verbs and fillers that carry the request rather than its subject
pub const REQUEST_WORDS: &[&str] = &[
    "explain", "define", "describe", "tell", "teach", "help", "solve", "calculate", "compare",
    "show", "give", "know", "learn", "understand", "mean", "means", "make", "get", "use",
    "work", "works", "find", "want", "need", "like", "please", "think", "simple", "terms",
    "also", "really", "example", "examples",
];

/// Subjects the tutor is expected to cover
pub const EDUCATIONAL_DOMAINS: &[&str] = &[
    "mathematics", "algebra", "geometry", "calculus", "statistics", "probability",
    "physics", "chemistry", "biology", "anatomy", "astronomy", "earth science",
    "history", "geography", "civics", "economics", "political science",
    "literature", "grammar", "writing", "poetry", "language arts",
    "computer science", "programming", "data science", "artificial intelligence",
    "art history", "music theory", "philosophy", "psychology", "sociology",
    "foreign languages", "education", "study skills", "research methods",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

pub fn is_request_word(word: &str) -> bool {
    REQUEST_WORDS.contains(&word)
}
