//! Metrics command: readability scores, word statistics, keyword density.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use seo_scribe_core::config::Config;
use seo_scribe_core::metrics::{self, MetricsReport};

use super::load_text;

/// Arguments for the `metrics` subcommand.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// File to analyze (defaults to the saved draft).
    pub file: Option<Utf8PathBuf>,

    /// Keyword to measure density for (repeatable).
    #[arg(short, long = "keyword", value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Report full-precision values instead of rounding to two decimals.
    #[arg(long)]
    pub raw: bool,
}

/// Compute and print the metrics report.
#[instrument(name = "cmd_metrics", skip_all, fields(file = ?args.file))]
pub fn cmd_metrics(args: MetricsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(keywords = args.keywords.len(), raw = args.raw, "executing metrics command");

    let text = load_text(args.file.as_deref(), config)?;
    let report = metrics::compute_metrics(&text, &args.keywords);
    let report = if args.raw { report } else { report.rounded() };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &MetricsReport) {
    println!("{}", "Readability".bold().underline());
    println!("{}: {}", "Reading ease".dimmed(), report.readability_ease);
    println!("{}: {}", "Grade level".dimmed(), report.grade_level);

    println!();
    println!("{}", "Words".bold().underline());
    println!("{}: {}", "Words".dimmed(), report.total_words);
    println!("{}: {}", "Sentences".dimmed(), report.total_sentences);
    println!("{}: {}", "Syllables".dimmed(), report.total_syllables);
    println!("{}: {}", "Unique words".dimmed(), report.unique_words_count);
    println!(
        "{}: {}",
        "Avg sentence length".dimmed(),
        report.avg_sentence_length
    );
    println!(
        "{}: {} ({}%)",
        "Complex words".dimmed(),
        report.complex_words,
        report.complex_words_percent
    );
    println!(
        "{}: {} ({}%)",
        "Stopwords".dimmed(),
        report.stopwords,
        report.stopwords_percent
    );

    if !report.keyword_density.is_empty() {
        println!();
        println!("{}", "Keyword density".bold().underline());
        for kd in &report.keyword_density {
            let count = if kd.count == 0 {
                kd.count.to_string().yellow().to_string()
            } else {
                kd.count.to_string().green().to_string()
            };
            println!("{}: {} ({}%)", kd.keyword.cyan(), count, kd.density);
        }
    }
}
