//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the metrics, suggestion, and insertion operations over stdio so
//! editors and assistants can call them. Every tool delegates to
//! `seo_scribe_core`; the server only validates input and serializes
//! reports.
//!
//! Keyword suggestion takes a saved extraction response rather than calling
//! the service itself, which keeps the server free of network I/O.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use seo_scribe_core::{
    AnalysisError, Extraction, InsertMode, InsertOutcome, KeywordPolicy, append_keyword,
    check_input_size, insert_with_mode, metrics, require_text,
};

use crate::highlight::{DEFAULT_CLOSE, DEFAULT_OPEN, highlight};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `compute_metrics` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ComputeMetricsParams {
    /// The text to analyze.
    pub text: String,
    /// Keywords to measure density for.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Return full-precision values instead of two-decimal rounding.
    #[serde(default)]
    pub raw: bool,
}

/// Parameters for the `suggest_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SuggestKeywordsParams {
    /// Raw JSON body returned by the extraction service.
    pub response: String,
    /// Minimum relevance score for topics (exclusive).
    pub min_score: Option<f64>,
    /// Maximum number of suggestions.
    pub max_count: Option<usize>,
    /// When given, density of each suggestion in this text is included.
    pub text: Option<String>,
}

/// Parameters for the `insert_keyword` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct InsertKeywordParams {
    /// The text to edit.
    pub text: String,
    /// Keyword to insert.
    pub keyword: String,
    /// "smart" (longest sentence) or "append".
    #[serde(default)]
    pub mode: InsertMode,
    /// Also return a copy of the text with the keyword marked in `**`.
    #[serde(default)]
    pub highlight: bool,
}

/// Parameters for the `append_keyword` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AppendKeywordParams {
    /// The text to extend.
    pub text: String,
    /// Keyword to append.
    pub keyword: String,
}

#[derive(Debug, Serialize)]
struct SuggestResult {
    source: &'static str,
    keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword_density: Option<Vec<metrics::KeywordDensity>>,
}

#[derive(Debug, Serialize)]
struct InsertResult {
    #[serde(flatten)]
    outcome: InsertOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    highlighted: Option<String>,
}

/// MCP server exposing seo-scribe operations.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    policy: KeywordPolicy,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid_input(err: AnalysisError) -> McpError {
    McpError::invalid_params(err.to_string(), None)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a server with default keyword thresholds and input limit.
    pub fn new() -> Self {
        Self::with_settings(
            KeywordPolicy::default(),
            Some(seo_scribe_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }

    /// Create a server with explicit keyword thresholds and input limit.
    pub fn with_settings(policy: KeywordPolicy, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            policy,
            max_input_bytes,
        }
    }

    fn validate<'a>(&self, text: &'a str) -> Result<&'a str, McpError> {
        let text = require_text(text).map_err(invalid_input)?;
        check_input_size(text, self.max_input_bytes).map_err(invalid_input)?;
        Ok(text)
    }

    fn validate_keyword(keyword: &str) -> Result<(), McpError> {
        if keyword.trim().is_empty() {
            return Err(McpError::invalid_params("keyword must not be empty", None));
        }
        Ok(())
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Readability and keyword density metrics.
    #[tool(
        description = "Compute readability (Flesch reading ease, Flesch-Kincaid grade), word statistics, and keyword density for text."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compute_metrics(
        &self,
        Parameters(params): Parameters<ComputeMetricsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "compute_metrics",
            keywords = params.keywords.len(),
            "executing MCP tool"
        );

        let text = self.validate(&params.text)?;
        let report = metrics::compute_metrics(text, &params.keywords);
        let report = if params.raw { report } else { report.rounded() };
        let json = to_json(&report)?;

        tracing::info!(
            tool = "compute_metrics",
            words = report.total_words,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Filter an extraction response into keyword suggestions.
    #[tool(
        description = "Turn a raw extraction service response (topics, entities, or word lemmas) into a filtered keyword suggestion list."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn suggest_keywords(
        &self,
        Parameters(params): Parameters<SuggestKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "suggest_keywords", "executing MCP tool");

        let extraction = Extraction::from_json(&params.response)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let policy = KeywordPolicy {
            min_score: params.min_score.unwrap_or(self.policy.min_score),
            max_count: params.max_count.unwrap_or(self.policy.max_count),
        };
        let keywords = extraction.suggestions(&policy);

        let keyword_density = match params.text {
            Some(ref text) => {
                let text = self.validate(text)?;
                Some(metrics::compute_metrics(text, &keywords).rounded().keyword_density)
            }
            None => None,
        };

        let result = SuggestResult {
            source: extraction.kind(),
            keywords,
            keyword_density,
        };
        let json = to_json(&result)?;

        tracing::info!(
            tool = "suggest_keywords",
            source = result.source,
            count = result.keywords.len(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Insert a keyword into the text.
    #[tool(
        description = "Insert a keyword into the longest sentence of the text (mode \"smart\") or after it (mode \"append\"). Reports already_present when the keyword occurs in the text."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", mode = %params.mode))]
    fn insert_keyword(
        &self,
        Parameters(params): Parameters<InsertKeywordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "insert_keyword", "executing MCP tool");

        let text = self.validate(&params.text)?;
        Self::validate_keyword(&params.keyword)?;

        let outcome = insert_with_mode(text, &params.keyword, params.mode);
        let highlighted = match outcome {
            InsertOutcome::Inserted(ref insertion) if params.highlight => Some(highlight(
                &insertion.text,
                &insertion.keyword,
                DEFAULT_OPEN,
                DEFAULT_CLOSE,
            )),
            _ => None,
        };

        let noop = outcome.is_noop();
        let json = to_json(&InsertResult {
            outcome,
            highlighted,
        })?;

        tracing::info!(tool = "insert_keyword", noop, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Append a keyword after the text.
    #[tool(
        description = "Append a keyword after the text as a new fragment (\"text. keyword\"), without checking whether it is already present."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn append_keyword(
        &self,
        Parameters(params): Parameters<AppendKeywordParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "append_keyword", "executing MCP tool");

        let text = self.validate(&params.text)?;
        Self::validate_keyword(&params.keyword)?;

        let updated = append_keyword(text, &params.keyword);

        tracing::info!(tool = "append_keyword", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(updated)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Compute readability metrics, suggest keywords from extraction responses, and insert keywords into web copy.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    const SAMPLE: &str = "The cat sat on the mat. The quick brown fox jumps over the lazy dog.";

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn server_has_instructions() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);

        let instructions = info.instructions.expect("server should have instructions");
        assert!(instructions.contains(env!("CARGO_PKG_NAME")));
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn json_of(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::new();
        let params = Parameters(GetInfoParams {
            format: "json".to_string(),
        });

        let result = server.get_info(params).expect("get_info should succeed");
        let json = json_of(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn compute_metrics_tool_works() {
        let server = ProjectServer::new();
        let params = Parameters(ComputeMetricsParams {
            text: SAMPLE.to_string(),
            keywords: vec!["fox".to_string()],
            raw: false,
        });

        let result = server
            .compute_metrics(params)
            .expect("compute_metrics should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let json = json_of(&result);
        assert_eq!(json["total_sentences"], 2);
        assert_eq!(json["keyword_density"][0]["count"], 1);
        assert_eq!(json["keyword_density"][0]["density"], 6.67);
    }

    #[test]
    fn compute_metrics_rejects_blank_text() {
        let server = ProjectServer::new();
        let params = Parameters(ComputeMetricsParams {
            text: "   ".to_string(),
            keywords: Vec::new(),
            raw: false,
        });
        assert!(server.compute_metrics(params).is_err());
    }

    #[test]
    fn compute_metrics_respects_input_limit() {
        let server = ProjectServer::with_settings(KeywordPolicy::default(), Some(8));
        let params = Parameters(ComputeMetricsParams {
            text: SAMPLE.to_string(),
            keywords: Vec::new(),
            raw: true,
        });
        assert!(server.compute_metrics(params).is_err());
    }

    #[test]
    fn suggest_keywords_filters_topics() {
        let server = ProjectServer::new();
        let params = Parameters(SuggestKeywordsParams {
            response: r#"{"response": {"topics": [
                {"label": "Pets", "score": 0.9},
                {"label": "Cats", "score": 0.5},
                {"label": "Dogs", "score": 0.7}
            ]}}"#
                .to_string(),
            min_score: None,
            max_count: None,
            text: None,
        });

        let result = server
            .suggest_keywords(params)
            .expect("suggest_keywords should succeed");
        let json = json_of(&result);
        assert_eq!(json["source"], "topics");
        assert_eq!(json["keywords"], serde_json::json!(["Pets", "Dogs"]));
        assert!(json.get("keyword_density").is_none());
    }

    #[test]
    fn suggest_keywords_with_text_reports_density() {
        let server = ProjectServer::new();
        let params = Parameters(SuggestKeywordsParams {
            response: r#"{"response": {"entities": [{"matchedText": "fox"}]}}"#.to_string(),
            min_score: None,
            max_count: None,
            text: Some(SAMPLE.to_string()),
        });

        let result = server
            .suggest_keywords(params)
            .expect("suggest_keywords should succeed");
        let json = json_of(&result);
        assert_eq!(json["source"], "entities");
        assert_eq!(json["keyword_density"][0]["keyword"], "fox");
        assert_eq!(json["keyword_density"][0]["count"], 1);
    }

    #[test]
    fn suggest_keywords_rejects_malformed_response() {
        let server = ProjectServer::new();
        let params = Parameters(SuggestKeywordsParams {
            response: "not json".to_string(),
            min_score: None,
            max_count: None,
            text: None,
        });
        assert!(server.suggest_keywords(params).is_err());
    }

    #[test]
    fn insert_keyword_tool_inserts_and_highlights() {
        let server = ProjectServer::new();
        let params = Parameters(InsertKeywordParams {
            text: SAMPLE.to_string(),
            keyword: "pets".to_string(),
            mode: InsertMode::Smart,
            highlight: true,
        });

        let result = server
            .insert_keyword(params)
            .expect("insert_keyword should succeed");
        let json = json_of(&result);
        assert_eq!(json["outcome"], "inserted");
        assert_eq!(json["sentence_index"], 1);
        assert_eq!(
            json["text"],
            "The cat sat on the mat. The quick brown fox jumps over the lazy dog pets."
        );
        assert_eq!(
            json["highlighted"],
            "The cat sat on the mat. The quick brown fox jumps over the lazy dog **pets**."
        );
    }

    #[test]
    fn insert_keyword_tool_highlights_spaced_keyword() {
        let server = ProjectServer::new();
        let params = Parameters(InsertKeywordParams {
            text: SAMPLE.to_string(),
            keyword: "happy   pets".to_string(),
            mode: InsertMode::Smart,
            highlight: true,
        });

        let result = server
            .insert_keyword(params)
            .expect("insert_keyword should succeed");
        let json = json_of(&result);
        assert_eq!(json["keyword"], "happy pets");
        assert_eq!(
            json["highlighted"],
            "The cat sat on the mat. The quick brown fox jumps over the lazy dog **happy pets**."
        );
    }

    #[test]
    fn insert_keyword_tool_reports_noop() {
        let server = ProjectServer::new();
        let params = Parameters(InsertKeywordParams {
            text: SAMPLE.to_string(),
            keyword: "Lazy Dog".to_string(),
            mode: InsertMode::Smart,
            highlight: true,
        });

        let result = server
            .insert_keyword(params)
            .expect("insert_keyword should succeed");
        let json = json_of(&result);
        assert_eq!(json["outcome"], "already_present");
        assert!(json.get("highlighted").is_none());
    }

    #[test]
    fn insert_keyword_rejects_blank_keyword() {
        let server = ProjectServer::new();
        let params = Parameters(InsertKeywordParams {
            text: SAMPLE.to_string(),
            keyword: " ".to_string(),
            mode: InsertMode::Append,
            highlight: false,
        });
        assert!(server.insert_keyword(params).is_err());
    }

    #[test]
    fn append_keyword_tool_appends() {
        let server = ProjectServer::new();
        let params = Parameters(AppendKeywordParams {
            text: "Hello world  ".to_string(),
            keyword: "greetings".to_string(),
        });

        let result = server
            .append_keyword(params)
            .expect("append_keyword should succeed");
        assert_eq!(extract_text(&result), Some("Hello world. greetings"));
    }
}
