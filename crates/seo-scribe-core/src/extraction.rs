//! Typed decode of extraction service responses.
//!
//! The service answers with a loose JSON envelope whose arrays may or may
//! not be present. [`Extraction::from_json`] classifies a body into exactly
//! one variant before anything reaches the keyword filter:
//!
//! 1. scored topics
//! 2. entity matches
//! 3. word lemmas (top-level `words`, or `sentences[].words`)
//! 4. nothing usable
//!
//! The first non-empty source wins.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CollaboratorError, CollaboratorResult};
use crate::keywords::{self, Candidate, KeywordPolicy};

/// Part-of-speech tag the service uses for punctuation.
const PUNCTUATION_TAG: &str = "PUNCT";

/// A word-level lemma reported by the extraction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordLemma {
    /// Dictionary form of the word.
    pub lemma: String,
    /// Part-of-speech tag, when the service supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl WordLemma {
    fn is_punctuation(&self) -> bool {
        self.part_of_speech.as_deref() == Some(PUNCTUATION_TAG)
    }
}

/// Classified extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Extraction {
    /// Scored topics, most relevant first.
    Topics(Vec<Candidate>),
    /// Entity surface texts.
    Entities(Vec<String>),
    /// Word lemmas.
    Lemmas(Vec<WordLemma>),
    /// No usable candidates.
    Empty,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    response: Option<RawResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResponse {
    topics: Vec<RawTopic>,
    entities: Vec<RawEntity>,
    words: Vec<WordLemma>,
    sentences: Vec<RawSentence>,
}

#[derive(Debug, Deserialize)]
struct RawTopic {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntity {
    matched_text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSentence {
    words: Vec<WordLemma>,
}

impl From<RawResponse> for Extraction {
    fn from(raw: RawResponse) -> Self {
        if !raw.topics.is_empty() {
            return Self::Topics(
                raw.topics
                    .into_iter()
                    .map(|t| Candidate::new(t.label, t.score))
                    .collect(),
            );
        }
        if !raw.entities.is_empty() {
            return Self::Entities(raw.entities.into_iter().map(|e| e.matched_text).collect());
        }
        let words = if raw.words.is_empty() {
            raw.sentences.into_iter().flat_map(|s| s.words).collect()
        } else {
            raw.words
        };
        if words.is_empty() {
            Self::Empty
        } else {
            Self::Lemmas(words)
        }
    }
}

impl Extraction {
    /// Decode a raw response body.
    ///
    /// A body without a `response` object decodes to [`Extraction::Empty`];
    /// a body that is not JSON, or whose arrays have the wrong shape, is a
    /// [`CollaboratorError::MalformedResponse`].
    #[tracing::instrument(skip(body), fields(body_len = body.len()))]
    pub fn from_json(body: &str) -> CollaboratorResult<Self> {
        let envelope: Envelope = serde_json::from_str(body)
            .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))?;
        let extraction = envelope.response.map_or(Self::Empty, Self::from);
        tracing::debug!(kind = extraction.kind(), "decoded extraction response");
        Ok(extraction)
    }

    /// Short name of the variant, for logs and reports.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Topics(_) => "topics",
            Self::Entities(_) => "entities",
            Self::Lemmas(_) => "lemmas",
            Self::Empty => "empty",
        }
    }

    /// Run the matching keyword filter and return the suggestion list.
    ///
    /// Only scored topics are subject to `policy`; entities and lemmas go
    /// through the length and stopword rules.
    pub fn suggestions(&self, policy: &KeywordPolicy) -> Vec<String> {
        match self {
            Self::Topics(candidates) => {
                keywords::filter_candidates(candidates, policy.min_score, policy.max_count)
            }
            Self::Entities(entities) => keywords::filter_entities(entities),
            Self::Lemmas(words) => {
                let lemmas: Vec<&str> = words
                    .iter()
                    .filter(|w| !w.is_punctuation())
                    .map(|w| w.lemma.as_str())
                    .collect();
                keywords::filter_lemmas(&lemmas)
            }
            Self::Empty => Vec::new(),
        }
    }
}
