//! Core library for seo-scribe.
//!
//! A deterministic text-analysis engine: readability and keyword-density
//! metrics, keyword suggestion filtering, and keyword insertion. Nothing in
//! the engine performs I/O; the configuration layer is the only part that
//! touches the filesystem.
//!
//! # Modules
//!
//! - [`metrics`] - Readability scores, word statistics, keyword density
//! - [`insertion`] - Smart keyword insertion and append mode
//! - [`keywords`] - Candidate filtering for keyword suggestions
//! - [`extraction`] - Typed decode of extraction service responses
//! - [`text`] - Tokenizer and sentence segmenter
//! - [`syllables`] - Syllable estimation
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use seo_scribe_core::{compute_metrics, insert_keyword, InsertOutcome};
//!
//! let text = "The cat sat on the mat. The quick brown fox jumps over the lazy dog.";
//! let report = compute_metrics(text, &["fox"]).rounded();
//! assert_eq!(report.total_sentences, 2);
//!
//! match insert_keyword(text, "pets") {
//!     InsertOutcome::Inserted(insertion) => println!("{}", insertion.text),
//!     InsertOutcome::AlreadyPresent => println!("nothing to do"),
//! }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod extraction;
pub mod input;
pub mod insertion;
pub mod keywords;
pub mod metrics;
pub mod syllables;
pub mod text;
pub mod word_lists;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{
    AnalysisError, AnalysisResult, CollaboratorError, CollaboratorResult, ConfigError,
    ConfigResult,
};
pub use extraction::Extraction;
pub use input::{DEFAULT_MAX_INPUT_BYTES, check_input_size, require_text};
pub use insertion::{
    InsertMode, InsertOutcome, Insertion, append_keyword, insert_keyword, insert_with_mode,
    normalize_keyword,
};
pub use keywords::{Candidate, KeywordPolicy, filter_candidates};
pub use metrics::{KeywordDensity, MetricsReport, compute_metrics};
