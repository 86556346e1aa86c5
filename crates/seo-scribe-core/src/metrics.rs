//! Text metrics: readability scores, word statistics, and keyword density.
//!
//! Flesch Reading Ease: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Flesch-Kincaid Grade Level: `0.39 * (words/sentences) + 11.8 * (syllables/words) - 15.59`
//!
//! Every ratio is guarded: with no words or no sentences the value is `0.0`,
//! never NaN or infinite. [`compute_metrics`] keeps full precision; call
//! [`MetricsReport::rounded`] at the output boundary for display values.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables;
use crate::text;
use crate::word_lists;

/// Density of one keyword in the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordDensity {
    /// The keyword as supplied by the caller.
    pub keyword: String,
    /// Case-insensitive exact-token matches.
    pub count: usize,
    /// Percentage of all word tokens that match (0--100).
    pub density: f64,
}

/// Result of metrics analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricsReport {
    /// Number of word tokens.
    pub total_words: usize,
    /// Number of non-blank sentences.
    pub total_sentences: usize,
    /// Estimated syllables across all tokens.
    pub total_syllables: usize,
    /// Tokens with three or more syllables.
    pub complex_words: usize,
    /// Tokens found in the stopword set.
    pub stopwords: usize,
    /// Distinct lowercased tokens.
    pub unique_words_count: usize,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Percentage of complex words (0--100).
    pub complex_words_percent: f64,
    /// Percentage of stopwords (0--100).
    pub stopwords_percent: f64,
    /// One entry per requested keyword, in request order.
    pub keyword_density: Vec<KeywordDensity>,
    /// Flesch Reading Ease score.
    pub readability_ease: f64,
    /// Flesch-Kincaid Grade Level.
    pub grade_level: f64,
}

impl MetricsReport {
    /// Copy of this report with every float rounded to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            avg_sentence_length: round2(self.avg_sentence_length),
            complex_words_percent: round2(self.complex_words_percent),
            stopwords_percent: round2(self.stopwords_percent),
            keyword_density: self
                .keyword_density
                .iter()
                .map(|kd| KeywordDensity {
                    keyword: kd.keyword.clone(),
                    count: kd.count,
                    density: round2(kd.density),
                })
                .collect(),
            readability_ease: round2(self.readability_ease),
            grade_level: round2(self.grade_level),
            ..self.clone()
        }
    }
}

/// Compute the full metrics bundle for `text`.
///
/// # Arguments
///
/// * `text` - The text to analyze. Empty text yields an all-zero report.
/// * `keywords` - Keywords to measure density for. Matching is
///   case-insensitive against whole tokens, so a multi-word keyword never
///   matches.
#[tracing::instrument(skip(text, keywords), fields(text_len = text.len(), keywords = keywords.len()))]
pub fn compute_metrics<S: AsRef<str>>(text: &str, keywords: &[S]) -> MetricsReport {
    let tokens = text::tokenize(text);
    let total_words = tokens.len();
    let total_sentences = text::split_sentences(text)
        .iter()
        .filter(|s| !s.trim().is_empty())
        .count();

    let mut total_syllables = 0;
    let mut complex_words = 0;
    let mut stopwords = 0;
    let mut unique: HashSet<&str> = HashSet::new();

    for token in &tokens {
        let syllable_count = syllables::estimate_syllables(token.surface);
        total_syllables += syllable_count;
        if syllables::is_complex(syllable_count) {
            complex_words += 1;
        }
        if word_lists::is_stopword(&token.lower) {
            stopwords += 1;
        }
        unique.insert(token.lower.as_str());
    }

    let keyword_density = keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.as_ref();
            let needle = keyword.trim().to_lowercase();
            let count = tokens.iter().filter(|t| t.lower == needle).count();
            KeywordDensity {
                keyword: keyword.to_string(),
                count,
                density: percent(count, total_words),
            }
        })
        .collect();

    let avg_sentence_length = ratio(total_words, total_sentences);
    let (readability_ease, grade_level) = if total_words == 0 || total_sentences == 0 {
        (0.0, 0.0)
    } else {
        let syllables_per_word = ratio(total_syllables, total_words);
        let ease = 84.6f64.mul_add(
            -syllables_per_word,
            1.015f64.mul_add(-avg_sentence_length, 206.835),
        );
        let grade = 0.39f64.mul_add(avg_sentence_length, 11.8 * syllables_per_word) - 15.59;
        (ease, grade)
    };

    tracing::debug!(
        total_words,
        total_sentences,
        total_syllables,
        "computed text metrics"
    );

    MetricsReport {
        total_words,
        total_sentences,
        total_syllables,
        complex_words,
        stopwords,
        unique_words_count: unique.len(),
        avg_sentence_length,
        complex_words_percent: percent(complex_words, total_words),
        stopwords_percent: percent(stopwords, total_words),
        keyword_density,
        readability_ease,
        grade_level,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    100.0 * ratio(part, whole)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
