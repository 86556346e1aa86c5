//! Insert command: add a keyword to the text.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use seo_scribe_core::config::Config;
use seo_scribe_core::{InsertMode, InsertOutcome, insert_with_mode, normalize_keyword};

use super::load_text;
use crate::draft::DraftStore;
use crate::highlight::{DEFAULT_CLOSE, DEFAULT_OPEN, highlight};

/// Arguments for the `insert` subcommand.
#[derive(Args, Debug)]
pub struct InsertArgs {
    /// Keyword to insert.
    pub keyword: String,

    /// File to edit (defaults to the saved draft).
    pub file: Option<Utf8PathBuf>,

    /// Where the keyword goes.
    #[arg(long, value_enum, default_value_t)]
    pub mode: InsertMode,

    /// Mark the keyword in the printed text with `**`.
    #[arg(long)]
    pub highlight: bool,

    /// Save the updated text as the current draft.
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Serialize)]
struct InsertReport {
    #[serde(flatten)]
    outcome: InsertOutcome,
    mode: InsertMode,
    saved: bool,
}

/// Insert the keyword and print the resulting text.
///
/// A keyword that is already present is not an error: the original text is
/// printed unchanged with a notice on stderr.
#[instrument(name = "cmd_insert", skip_all, fields(file = ?args.file, mode = %args.mode))]
pub fn cmd_insert(args: InsertArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(keyword = %args.keyword, "executing insert command");

    if args.keyword.trim().is_empty() {
        anyhow::bail!("keyword must not be empty");
    }

    let text = load_text(args.file.as_deref(), config)?;
    let keyword = normalize_keyword(&args.keyword);
    let outcome = insert_with_mode(&text, &args.keyword, args.mode);

    let saved = match outcome {
        InsertOutcome::Inserted(ref insertion) if args.save => {
            let store = DraftStore::from_config(config)?;
            store.save(&insertion.text)?;
            info!(dir = %store.dir(), "saved updated draft");
            true
        }
        _ => false,
    };

    if global_json {
        let report = InsertReport {
            outcome,
            mode: args.mode,
            saved,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if outcome.is_noop() {
        eprintln!(
            "{} \"{keyword}\" already appears in the text; nothing inserted",
            "note:".yellow(),
        );
    }

    let updated = outcome.into_text(&text);
    if args.highlight {
        println!(
            "{}",
            highlight(&updated, &keyword, DEFAULT_OPEN, DEFAULT_CLOSE)
        );
    } else {
        println!("{updated}");
    }
    if saved {
        eprintln!("{} draft updated", "saved:".green());
    }
    Ok(())
}
