//! Library interface for the `seo-scribe` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - [`collaborator`] - Extraction service clients
//! - [`draft`] - Persisted draft text and undo history
//! - [`highlight`] - Keyword highlighting for display

pub mod collaborator;
pub mod commands;
pub mod draft;
pub mod highlight;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                         Log filter (e.g., debug, seo_scribe=trace)
    SEO_SCRIBE_LOG_PATH              Explicit log file path
    SEO_SCRIBE_LOG_DIR               Log directory
    SEO_SCRIBE_MIN_SCORE             Minimum keyword relevance score
    SEO_SCRIBE_EXTRACTION__API_KEY   Extraction service API key
";

/// Command-line interface definition for seo-scribe.
#[derive(Parser)]
#[command(name = "seo-scribe")]
#[command(about = "Readability metrics, keyword density, and keyword insertion for web copy", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Compute readability metrics and keyword density
    Metrics(commands::metrics::MetricsArgs),

    /// Suggest keywords from an extraction service response
    Suggest(commands::suggest::SuggestArgs),

    /// Insert a keyword into the text
    Insert(commands::insert::InsertArgs),

    /// Manage the saved draft and its undo history
    Draft(commands::draft::DraftArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn insert_parses_mode_and_keyword() {
        let cli = Cli::try_parse_from(["seo-scribe", "insert", "garden tools", "--mode", "append"])
            .expect("insert args should parse");
        let Some(Commands::Insert(args)) = cli.command else {
            panic!("expected the insert subcommand");
        };
        assert_eq!(args.keyword, "garden tools");
        assert_eq!(args.mode, seo_scribe_core::InsertMode::Append);
    }
}
