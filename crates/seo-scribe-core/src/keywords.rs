//! Keyword candidate filtering.
//!
//! Turns the raw output of the extraction service into a clean suggestion
//! list. The service ranks candidates; this module never re-sorts them.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::word_lists;

/// Candidates this short (in characters) or shorter are dropped.
const MIN_CANDIDATE_CHARS: usize = 2;

/// A scored keyword candidate from the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    /// Candidate keyword text.
    pub text: String,
    /// Relevance score, typically in 0--1.
    pub score: f64,
}

impl Candidate {
    /// Create a candidate.
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Thresholds applied to scored candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordPolicy {
    /// Candidates must score strictly above this.
    pub min_score: f64,
    /// Maximum number of suggestions returned.
    pub max_count: usize,
}

impl Default for KeywordPolicy {
    fn default() -> Self {
        Self {
            min_score: 0.5,
            max_count: 10,
        }
    }
}

/// Select scored candidates above `min_score`, keeping at most `max_count`.
///
/// A candidate exactly at the threshold is excluded. Repeated texts keep
/// only their first occurrence. Input order is preserved.
pub fn select_candidates(raw: &[Candidate], min_score: f64, max_count: usize) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for candidate in raw {
        if kept.len() == max_count {
            break;
        }
        if candidate.score > min_score && seen.insert(candidate.text.as_str()) {
            kept.push(candidate.clone());
        }
    }
    kept
}

/// Filter scored candidates down to a list of distinct keyword strings.
///
/// See [`select_candidates`] for the selection rules.
#[tracing::instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn filter_candidates(raw: &[Candidate], min_score: f64, max_count: usize) -> Vec<String> {
    let kept: Vec<String> = select_candidates(raw, min_score, max_count)
        .into_iter()
        .map(|c| c.text)
        .collect();
    tracing::debug!(kept = kept.len(), "filtered scored candidates");
    kept
}

/// Filter word-level lemmas into keyword suggestions.
///
/// Each lemma is lowercased; lemmas of two characters or fewer and stopwords
/// are dropped, then duplicates are removed keeping first occurrence.
#[tracing::instrument(skip_all, fields(raw_len = lemmas.len()))]
pub fn filter_lemmas<S: AsRef<str>>(lemmas: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    lemmas
        .iter()
        .map(|l| l.as_ref().to_lowercase())
        .filter(|l| l.chars().count() > MIN_CANDIDATE_CHARS)
        .filter(|l| !word_lists::is_candidate_stopword(l))
        .filter(|l| seen.insert(l.clone()))
        .collect()
}

/// Filter entity matches into keyword suggestions.
///
/// Entities keep their original casing. Each is trimmed; short ones and
/// stopwords are dropped, and exact duplicates keep first occurrence.
#[tracing::instrument(skip_all, fields(raw_len = entities.len()))]
pub fn filter_entities<S: AsRef<str>>(entities: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    entities
        .iter()
        .map(|e| e.as_ref().trim())
        .filter(|e| e.chars().count() > MIN_CANDIDATE_CHARS)
        .filter(|e| !word_lists::is_candidate_stopword(e))
        .filter(|e| seen.insert(*e))
        .map(str::to_string)
        .collect()
}
