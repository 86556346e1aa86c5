//! Error types for seo-scribe-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input text is missing or empty after trimming.
    #[error("invalid input: text is empty")]
    InvalidInput,

    /// The input text exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised at the boundary with the keyword extraction service.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The service could not be reached, timed out, or returned a failure status.
    #[error("extraction service unavailable: {0}")]
    Unavailable(String),

    /// The service answered, but the body did not have the expected shape.
    #[error("malformed extraction response: {0}")]
    MalformedResponse(String),
}

/// Result type alias using [`CollaboratorError`].
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
