//! Draft command: save, show, undo, and clear the working draft.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use seo_scribe_core::config::Config;
use seo_scribe_core::{check_input_size, require_text};

use super::read_input_file;
use crate::draft::{DraftStore, require_draft};

/// Arguments for the `draft` subcommand.
#[derive(Args, Debug)]
pub struct DraftArgs {
    /// The action to perform.
    #[command(subcommand)]
    pub action: DraftAction,
}

/// Draft actions.
#[derive(Subcommand, Debug)]
pub enum DraftAction {
    /// Save a file (or stdin text via `-`) as the current draft
    Save {
        /// File to save.
        file: Utf8PathBuf,
    },
    /// Print the current draft
    Show,
    /// Restore the previous draft
    Undo,
    /// Delete the draft and its history
    Clear,
}

#[derive(Serialize)]
struct DraftStatus<'a> {
    action: &'static str,
    dir: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    history: usize,
}

/// Execute the `draft` subcommand.
#[instrument(name = "cmd_draft", skip_all)]
pub fn cmd_draft(args: DraftArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let store = DraftStore::from_config(config)?;
    debug!(dir = %store.dir(), action = ?args.action, "executing draft command");

    let (action, text) = match args.action {
        DraftAction::Save { file } => {
            let text = read_text(&file, config)?;
            store.save(&text)?;
            ("save", None)
        }
        DraftAction::Show => ("show", Some(require_draft(&store)?)),
        DraftAction::Undo => match store.undo()? {
            Some(text) => ("undo", Some(text)),
            None => anyhow::bail!("nothing to undo"),
        },
        DraftAction::Clear => {
            store.clear()?;
            ("clear", None)
        }
    };

    let history = store.history()?.len();
    if global_json {
        let status = DraftStatus {
            action,
            dir: store.dir().as_str(),
            text,
            history,
        };
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    match (action, text) {
        (_, Some(text)) => println!("{text}"),
        ("save", None) => eprintln!(
            "{} draft saved to {} ({history} earlier version(s))",
            "saved:".green(),
            store.dir()
        ),
        _ => eprintln!("{} draft cleared", "cleared:".green()),
    }
    Ok(())
}

fn read_text(file: &Utf8Path, config: &Config) -> anyhow::Result<String> {
    let limit = config.input_limit();
    let text = if file.as_str() == "-" {
        let text = std::io::read_to_string(std::io::stdin())?;
        check_input_size(&text, limit)?;
        text
    } else {
        read_input_file(file, limit)?
    };
    require_text(&text)?;
    Ok(text)
}
