//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use seo_scribe_core::config::Config;
use seo_scribe_core::{check_input_size, require_text};

use crate::draft::{DraftStore, require_draft};

pub mod draft;
pub mod info;
pub mod insert;
pub mod metrics;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod suggest;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Load the text a command operates on: `file` when given, otherwise the
/// saved draft. Blank or oversized text is rejected.
pub fn load_text(file: Option<&Utf8Path>, config: &Config) -> anyhow::Result<String> {
    let limit = config.input_limit();
    let text = match file {
        Some(path) => read_input_file(path, limit)?,
        None => {
            let text = require_draft(&DraftStore::from_config(config)?)?;
            check_input_size(&text, limit)?;
            text
        }
    };
    require_text(&text)?;
    Ok(text)
}
