//! Text processing utilities.
//!
//! Provides word tokenization and sentence segmentation shared by the
//! metrics and insertion engines. Both consumers must go through
//! [`split_sentences`] so their sentence counts agree.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for word tokens: maximal runs of word characters.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Regex for runs of two or more whitespace characters.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// A single word token.
///
/// Holds the case-preserved surface form borrowed from the input and the
/// lowercase form used for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken<'a> {
    /// The token as it appears in the text.
    pub surface: &'a str,
    /// Lowercased form for case-insensitive comparisons.
    pub lower: String,
}

/// Split text into word tokens.
///
/// Punctuation-only spans never produce a token, and no token is empty.
pub fn tokenize(text: &str) -> Vec<WordToken<'_>> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| WordToken {
            surface: m.as_str(),
            lower: m.as_str().to_lowercase(),
        })
        .collect()
}

/// Split text into sentences on `.`, `!`, and `?`.
///
/// Each sentence keeps its terminator run (`"Really?!"` stays whole) and is
/// trimmed of surrounding whitespace. A trailing fragment without a
/// terminator becomes the last sentence as-is. The result is never empty:
/// text with no sentence content comes back as a single element.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !is_sentence_terminator(ch) {
            continue;
        }

        let mut end = i + ch.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !is_sentence_terminator(next) {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }

        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }

    // Remaining text
    push_trimmed(&mut sentences, &text[start..]);

    if sentences.is_empty() {
        sentences.push(text.trim());
    }

    sentences
}

/// Collapse every run of two or more whitespace characters into one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece);
    }
}
