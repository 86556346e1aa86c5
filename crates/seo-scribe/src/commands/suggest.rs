//! Suggest command: keyword suggestions from the extraction service.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use seo_scribe_core::config::Config;
use seo_scribe_core::metrics::{self, MetricsReport};
use seo_scribe_core::{Extraction, KeywordPolicy};

use super::load_text;
use crate::collaborator::{ExtractionService, HttpExtractionClient, SavedResponse};

/// Arguments for the `suggest` subcommand.
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// File to extract keywords from (defaults to the saved draft).
    pub file: Option<Utf8PathBuf>,

    /// Use a saved extraction response instead of calling the service.
    #[arg(long, value_name = "JSON_FILE")]
    pub response: Option<Utf8PathBuf>,

    /// Minimum relevance score; topics must score strictly above it.
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Maximum number of suggestions.
    #[arg(long = "max", value_name = "N")]
    pub max_count: Option<usize>,

    /// Also report metrics with the suggestions as density keywords.
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Debug, Serialize)]
struct SuggestReport {
    source: &'static str,
    keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<MetricsReport>,
}

/// Fetch candidates, filter them, and print the suggestions.
#[instrument(name = "cmd_suggest", skip_all, fields(file = ?args.file, response = ?args.response))]
pub fn cmd_suggest(args: SuggestArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let policy = resolve_policy(&args, config);
    debug!(?policy, "executing suggest command");

    // A saved response stands on its own; the text is only needed for a
    // live request or for metrics.
    let needs_text = args.response.is_none() || args.metrics;
    let text = if needs_text {
        Some(load_text(args.file.as_deref(), config)?)
    } else {
        None
    };

    let extraction = match args.response {
        Some(ref path) => SavedResponse::from_file(path)?.extract("")?,
        None => {
            let client = HttpExtractionClient::from_config(&config.extraction)?;
            client
                .extract(text.as_deref().unwrap_or_default())
                .context("keyword extraction failed")?
        }
    };

    let report = build_report(&extraction, &policy, text.as_deref().filter(|_| args.metrics));

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.keywords.is_empty() {
        eprintln!(
            "{} no keyword suggestions ({} response)",
            "note:".yellow(),
            report.source
        );
    }
    for keyword in &report.keywords {
        println!("{keyword}");
    }
    if let Some(ref m) = report.metrics {
        println!();
        for kd in &m.keyword_density {
            println!("{}: {} ({}%)", kd.keyword.cyan(), kd.count, kd.density);
        }
    }
    Ok(())
}

fn resolve_policy(args: &SuggestArgs, config: &Config) -> KeywordPolicy {
    let base = config.keyword_policy();
    KeywordPolicy {
        min_score: args.min_score.unwrap_or(base.min_score),
        max_count: args.max_count.unwrap_or(base.max_count),
    }
}

fn build_report(
    extraction: &Extraction,
    policy: &KeywordPolicy,
    metrics_text: Option<&str>,
) -> SuggestReport {
    let keywords = extraction.suggestions(policy);
    let metrics = metrics_text.map(|text| metrics::compute_metrics(text, &keywords).rounded());
    SuggestReport {
        source: extraction.kind(),
        keywords,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SuggestArgs {
        SuggestArgs {
            file: None,
            response: None,
            min_score: None,
            max_count: None,
            metrics: false,
        }
    }

    #[test]
    fn flags_override_config_policy() {
        let config = Config {
            min_score: Some(0.2),
            max_keywords: Some(3),
            ..Config::default()
        };
        let policy = resolve_policy(&args(), &config);
        assert_eq!(policy.min_score, 0.2);
        assert_eq!(policy.max_count, 3);

        let policy = resolve_policy(
            &SuggestArgs {
                min_score: Some(0.7),
                ..args()
            },
            &config,
        );
        assert_eq!(policy.min_score, 0.7);
        assert_eq!(policy.max_count, 3);
    }

    #[test]
    fn report_includes_metrics_when_asked() {
        let extraction = Extraction::from_json(
            r#"{"response": {"topics": [{"label": "fox", "score": 0.9}]}}"#,
        )
        .unwrap();
        let report = build_report(
            &extraction,
            &KeywordPolicy::default(),
            Some("The quick brown fox."),
        );
        assert_eq!(report.source, "topics");
        assert_eq!(report.keywords, vec!["fox"]);
        let metrics = report.metrics.unwrap();
        assert_eq!(metrics.keyword_density[0].count, 1);
        assert_eq!(metrics.keyword_density[0].density, 25.0);
    }

    #[test]
    fn report_without_metrics() {
        let report = build_report(&Extraction::Empty, &KeywordPolicy::default(), None);
        assert_eq!(report.source, "empty");
        assert!(report.keywords.is_empty());
        assert!(report.metrics.is_none());
    }
}
