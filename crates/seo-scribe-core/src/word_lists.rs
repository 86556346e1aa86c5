//! Stopword sets.
//!
//! Both sets are process-wide, built once on first use, and never mutated,
//! so they are shared freely across concurrent callers.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common function words, used by the metrics engine for the stopword
/// percentage.
pub static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
        "because", "been", "before", "being", "but", "by", "can", "could", "did", "do", "does",
        "for", "from", "had", "has", "have", "he", "her", "him", "his", "how", "i", "if", "in",
        "into", "is", "it", "its", "just", "me", "more", "my", "no", "not", "of", "on", "only",
        "or", "our", "out", "over", "she", "so", "some", "such", "than", "that", "the", "their",
        "them", "then", "there", "these", "they", "this", "those", "through", "to", "too", "up",
        "us", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "why",
        "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Words never offered as keyword suggestions, matched case-insensitively.
pub static CANDIDATE_STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ["the", "and", "but", "with", "this", "that", "for", "you"]
        .into_iter()
        .collect()
});

/// Whether a lowercase word is in [`STOPWORDS`].
pub fn is_stopword(lower: &str) -> bool {
    STOPWORDS.contains(lower)
}

/// Whether a candidate is in [`CANDIDATE_STOPWORDS`], ignoring case.
pub fn is_candidate_stopword(candidate: &str) -> bool {
    CANDIDATE_STOPWORDS.contains(candidate.to_lowercase().as_str())
}
