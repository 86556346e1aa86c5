//! Input validation shared by every entry point.

use crate::error::{AnalysisError, AnalysisResult};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Reject text that is empty after trimming.
pub fn require_text(text: &str) -> AnalysisResult<&str> {
    if text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput);
    }
    Ok(text)
}

/// Reject text larger than `limit` bytes. `None` disables the check.
pub fn check_input_size(text: &str, limit: Option<usize>) -> AnalysisResult<()> {
    if let Some(limit) = limit
        && text.len() > limit
    {
        return Err(AnalysisError::InputTooLarge {
            size: text.len(),
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_invalid() {
        assert_eq!(require_text(""), Err(AnalysisError::InvalidInput));
        assert_eq!(require_text(" \n\t"), Err(AnalysisError::InvalidInput));
        assert_eq!(require_text(" hi "), Ok(" hi "));
    }

    #[test]
    fn size_limit() {
        assert!(check_input_size("hello", Some(5)).is_ok());
        assert_eq!(
            check_input_size("hello!", Some(5)),
            Err(AnalysisError::InputTooLarge { size: 6, limit: 5 })
        );
        assert!(check_input_size("anything", None).is_ok());
    }
}
