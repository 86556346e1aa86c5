//! Extraction service clients.
//!
//! Every source of keyword candidates implements [`ExtractionService`] and
//! hands back an already-classified [`Extraction`], so the keyword filter
//! only ever sees typed input. Transport problems surface as
//! [`CollaboratorError::Unavailable`]; nothing is retried.

use std::time::Duration;

use camino::Utf8Path;
use seo_scribe_core::config::ExtractionConfig;
use seo_scribe_core::{CollaboratorError, CollaboratorResult, Extraction};

/// Extractors requested from the service.
pub const EXTRACTORS: &str = "entities,topics,words";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-textrazor-key";

/// A source of keyword candidates for a text.
pub trait ExtractionService {
    /// Extract candidates for `text`.
    fn extract(&self, text: &str) -> CollaboratorResult<Extraction>;
}

/// Live HTTP client for the extraction service.
#[derive(Debug, Clone)]
pub struct HttpExtractionClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl HttpExtractionClient {
    /// Build a client from configuration.
    ///
    /// Fails with [`CollaboratorError::Unavailable`] when no API key is
    /// configured or the HTTP client cannot be constructed.
    pub fn from_config(config: &ExtractionConfig) -> CollaboratorResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            CollaboratorError::Unavailable(
                "no API key configured (set SEO_SCRIBE_EXTRACTION__API_KEY)".to_string(),
            )
        })?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CollaboratorError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }
}

impl ExtractionService for HttpExtractionClient {
    #[tracing::instrument(skip(self, text), fields(endpoint = %self.endpoint, text_len = text.len()))]
    fn extract(&self, text: &str) -> CollaboratorResult<Extraction> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .form(&[("text", text), ("extractors", EXTRACTORS)])
            .send()
            .map_err(|e| {
                tracing::warn!(error = %e, "extraction request failed");
                CollaboratorError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "extraction service returned an error status");
            return Err(CollaboratorError::Unavailable(format!(
                "service returned {status}"
            )));
        }

        let body = response
            .text()
            .map_err(|e| CollaboratorError::Unavailable(e.to_string()))?;
        Extraction::from_json(&body)
    }
}

/// A response body captured earlier, replayed instead of calling the service.
#[derive(Debug, Clone)]
pub struct SavedResponse {
    body: String,
}

impl SavedResponse {
    /// Wrap a raw response body.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Read a saved response body from disk.
    pub fn from_file(path: &Utf8Path) -> CollaboratorResult<Self> {
        std::fs::read_to_string(path.as_std_path())
            .map(Self::new)
            .map_err(|e| CollaboratorError::Unavailable(format!("failed to read {path}: {e}")))
    }
}

impl ExtractionService for SavedResponse {
    fn extract(&self, _text: &str) -> CollaboratorResult<Extraction> {
        Extraction::from_json(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_response_decodes_body() {
        let saved = SavedResponse::new(
            r#"{"response": {"topics": [{"label": "Keyword research", "score": 0.8}]}}"#,
        );
        let extraction = saved.extract("ignored").unwrap();
        assert_eq!(extraction.kind(), "topics");
    }

    #[test]
    fn saved_response_malformed_body() {
        let saved = SavedResponse::new("<html>502 Bad Gateway</html>");
        assert!(matches!(
            saved.extract("text"),
            Err(CollaboratorError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_saved_file_is_unavailable() {
        let result = SavedResponse::from_file(Utf8Path::new("/nonexistent/response.json"));
        assert!(matches!(result, Err(CollaboratorError::Unavailable(_))));
    }

    #[test]
    fn http_client_requires_api_key() {
        let result = HttpExtractionClient::from_config(&ExtractionConfig::default());
        assert!(matches!(result, Err(CollaboratorError::Unavailable(_))));
    }

    #[test]
    fn unreachable_endpoint_is_unavailable() {
        let config = ExtractionConfig {
            // nothing listens on the discard port
            endpoint: "http://127.0.0.1:9/".to_string(),
            api_key: Some("test".to_string()),
            timeout_secs: 2,
        };
        let client = HttpExtractionClient::from_config(&config).unwrap();
        assert!(matches!(
            client.extract("Some text."),
            Err(CollaboratorError::Unavailable(_))
        ));
    }
}
