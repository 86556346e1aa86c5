//! Keyword insertion.
//!
//! Smart insertion places a keyword into the longest sentence of the text
//! (earliest wins ties), tucked before the sentence's final period when it
//! has one. Append mode is the simpler alternative: the keyword goes after
//! the text as a new fragment.
//!
//! A keyword already present in the text (case-insensitive substring) is a
//! no-op, reported as [`InsertOutcome::AlreadyPresent`] rather than an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text;

/// How a keyword is added to the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum InsertMode {
    /// Insert into the longest sentence.
    #[default]
    Smart,
    /// Append after the text as `". keyword"`.
    Append,
}

impl InsertMode {
    /// Returns the mode name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Append => "append",
        }
    }
}

impl std::fmt::Display for InsertMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Insertion {
    /// The updated text.
    pub text: String,
    /// Index of the sentence that now holds the keyword.
    pub sentence_index: usize,
    /// The keyword as inserted (trimmed).
    pub keyword: String,
}

/// Result of an insertion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum InsertOutcome {
    /// The keyword was added.
    Inserted(Insertion),
    /// The keyword already occurs in the text; nothing to do.
    AlreadyPresent,
}

impl InsertOutcome {
    /// Whether the request was a no-op.
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::AlreadyPresent)
    }

    /// The resulting text: the updated text, or `original` for a no-op.
    pub fn into_text(self, original: &str) -> String {
        match self {
            Self::Inserted(insertion) => insertion.text,
            Self::AlreadyPresent => original.to_string(),
        }
    }
}

/// Whether `keyword` occurs anywhere in `text`, ignoring case.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase()
        .contains(&normalize_keyword(keyword).to_lowercase())
}

/// Trim `keyword` and collapse inner whitespace runs to one space, the form
/// it takes once inserted.
pub fn normalize_keyword(keyword: &str) -> String {
    text::collapse_whitespace(keyword.trim())
}

/// Insert `keyword` into the longest sentence of `text`.
///
/// If the target sentence ends with `.`, the keyword goes right before that
/// period; otherwise it is appended after a space with no punctuation added.
/// Sentences are rejoined with single spaces and whitespace runs collapsed.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn insert_keyword(text: &str, keyword: &str) -> InsertOutcome {
    let keyword = normalize_keyword(keyword);
    if contains_keyword(text, &keyword) {
        tracing::debug!("keyword already present, skipping insertion");
        return InsertOutcome::AlreadyPresent;
    }

    let sentences = text::split_sentences(text);
    let target = longest_sentence(&sentences);

    let rebuilt: Vec<String> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i == target {
                place_in_sentence(s, &keyword)
            } else {
                (*s).to_string()
            }
        })
        .collect();

    tracing::debug!(sentence_index = target, "inserted keyword");

    InsertOutcome::Inserted(Insertion {
        text: text::collapse_whitespace(&rebuilt.join(" ")),
        sentence_index: target,
        keyword,
    })
}

/// Append `keyword` to `text` as `". keyword"` after trimming trailing
/// whitespace. Always appends; see [`insert_with_mode`] for the no-op check.
pub fn append_keyword(text: &str, keyword: &str) -> String {
    format!("{}. {}", text.trim_end(), normalize_keyword(keyword))
}

/// Add `keyword` using `mode`, reporting a no-op when it is already present.
pub fn insert_with_mode(text: &str, keyword: &str, mode: InsertMode) -> InsertOutcome {
    match mode {
        InsertMode::Smart => insert_keyword(text, keyword),
        InsertMode::Append => {
            if contains_keyword(text, keyword) {
                return InsertOutcome::AlreadyPresent;
            }
            let updated = append_keyword(text, keyword);
            let sentence_index = text::split_sentences(&updated).len() - 1;
            InsertOutcome::Inserted(Insertion {
                text: updated,
                sentence_index,
                keyword: normalize_keyword(keyword),
            })
        }
    }
}

/// Index of the longest sentence by character count; earliest wins ties.
fn longest_sentence(sentences: &[&str]) -> usize {
    let mut best = 0;
    let mut best_len = 0;
    for (i, sentence) in sentences.iter().enumerate() {
        let len = sentence.chars().count();
        if len > best_len {
            best = i;
            best_len = len;
        }
    }
    best
}

/// Only the last `.` counts as the final period, so `"Wait..."` becomes
/// `"Wait.. kw."`.
fn place_in_sentence(sentence: &str, keyword: &str) -> String {
    if sentence.is_empty() {
        return keyword.to_string();
    }
    match sentence.strip_suffix('.') {
        Some(body) => format!("{} {keyword}.", body.trim_end()),
        None => format!("{sentence} {keyword}"),
    }
}
