//! Persisted draft text with an undo history.
//!
//! The store keeps the most recent draft verbatim in `draft.txt` and the
//! drafts it replaced in `history.json`, newest last. Undo is a replay of a
//! previously saved value; nothing here knows how a draft was produced.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use seo_scribe_core::config::{self, Config};

const DRAFT_FILE: &str = "draft.txt";
const HISTORY_FILE: &str = "history.json";

/// Oldest snapshots are dropped beyond this many.
const MAX_HISTORY: usize = 50;

/// File-backed draft storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: Utf8PathBuf,
}

impl DraftStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open the store configured by `draft_dir`, or the user data directory.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let dir = match config.draft_dir {
            Some(ref dir) => dir.clone(),
            None => config::user_data_dir()
                .context("could not determine a data directory for drafts")?
                .join("drafts"),
        };
        Ok(Self::new(dir))
    }

    /// Directory holding the draft files.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Load the current draft, if one was saved.
    pub fn load(&self) -> anyhow::Result<Option<String>> {
        let path = self.dir.join(DRAFT_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("failed to read draft {path}"))?;
        Ok(Some(text))
    }

    /// Save `text` as the current draft.
    ///
    /// The replaced draft is pushed onto the undo history unless it is
    /// identical to `text`.
    #[tracing::instrument(skip(self, text), fields(dir = %self.dir, text_len = text.len()))]
    pub fn save(&self, text: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.dir.as_std_path())
            .with_context(|| format!("failed to create draft directory {}", self.dir))?;

        if let Some(previous) = self.load()?
            && previous != text
        {
            let mut history = self.history()?;
            history.push(previous);
            if history.len() > MAX_HISTORY {
                let excess = history.len() - MAX_HISTORY;
                history.drain(..excess);
            }
            self.write_history(&history)?;
        }

        self.write_draft(text)?;
        tracing::debug!("draft saved");
        Ok(())
    }

    /// Restore the most recent snapshot as the current draft and return it.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&self) -> anyhow::Result<Option<String>> {
        let mut history = self.history()?;
        let Some(previous) = history.pop() else {
            return Ok(None);
        };
        self.write_history(&history)?;
        self.write_draft(&previous)?;
        tracing::debug!(remaining = history.len(), "draft restored from history");
        Ok(Some(previous))
    }

    /// Delete the draft and its history.
    pub fn clear(&self) -> anyhow::Result<()> {
        for name in [DRAFT_FILE, HISTORY_FILE] {
            let path = self.dir.join(name);
            if path.is_file() {
                std::fs::remove_file(path.as_std_path())
                    .with_context(|| format!("failed to remove {path}"))?;
            }
        }
        Ok(())
    }

    /// Saved snapshots, oldest first.
    pub fn history(&self) -> anyhow::Result<Vec<String>> {
        let path = self.dir.join(HISTORY_FILE);
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(path.as_std_path())
            .with_context(|| format!("failed to read draft history {path}"))?;
        let history: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("draft history {path} is corrupt"))?;
        Ok(history)
    }

    fn write_draft(&self, text: &str) -> anyhow::Result<()> {
        let path = self.dir.join(DRAFT_FILE);
        std::fs::write(path.as_std_path(), text)
            .with_context(|| format!("failed to write draft {path}"))
    }

    fn write_history(&self, history: &[String]) -> anyhow::Result<()> {
        let path = self.dir.join(HISTORY_FILE);
        let raw = serde_json::to_string(history)?;
        std::fs::write(path.as_std_path(), raw)
            .with_context(|| format!("failed to write draft history {path}"))
    }
}

/// Load the saved draft, failing when none exists.
pub fn require_draft(store: &DraftStore) -> anyhow::Result<String> {
    match store.load()? {
        Some(text) => Ok(text),
        None => bail!(
            "no input file given and no draft saved in {}. Run `seo-scribe draft save FILE` first.",
            store.dir()
        ),
    }
}
