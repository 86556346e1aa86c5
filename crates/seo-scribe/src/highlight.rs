//! Keyword highlighting for display.
//!
//! The engine reports which keyword it inserted; marking it up is a
//! presentation concern handled here. Every case-insensitive occurrence of
//! the keyword is wrapped, with the keyword escaped so regex metacharacters
//! match literally.

use regex::RegexBuilder;

/// Default opening marker (Markdown bold).
pub const DEFAULT_OPEN: &str = "**";

/// Default closing marker (Markdown bold).
pub const DEFAULT_CLOSE: &str = "**";

/// Wrap every case-insensitive occurrence of `keyword` in `open`/`close`.
///
/// Matched text keeps its original casing. A blank keyword leaves the
/// text unchanged.
pub fn highlight(text: &str, keyword: &str, open: &str, close: &str) -> String {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return text.to_string();
    }

    let pattern = match RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!(error = %e, "keyword pattern rejected, leaving text unmarked");
            return text.to_string();
        }
    };

    pattern
        .replace_all(text, |caps: &regex::Captures<'_>| {
            format!("{open}{}{close}", &caps[0])
        })
        .into_owned()
}
