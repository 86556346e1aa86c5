//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr so stdout stays clean for command
//! output. When a log file or directory is configured, a JSON-lines layer
//! is added alongside.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const ENV_LOG_PATH: &str = "SEO_SCRIBE_LOG_PATH";
const ENV_LOG_DIR: &str = "SEO_SCRIBE_LOG_DIR";
const LOG_FILE_PREFIX: &str = "seo-scribe.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    /// Stderr only.
    #[default]
    None,
    /// A single file, never rotated.
    File(PathBuf),
    /// Daily-rotated files in a directory.
    Dir(PathBuf),
}

/// Observability settings resolved from the environment and config.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File log destination.
    pub target: LogTarget,
}

impl ObservabilityConfig {
    /// Resolve settings. Precedence: `SEO_SCRIBE_LOG_PATH`, then
    /// `SEO_SCRIBE_LOG_DIR`, then the configured `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let target = match (log_path, log_dir.or(config_log_dir)) {
            (Some(path), _) => LogTarget::File(path),
            (None, Some(dir)) => LogTarget::Dir(dir),
            (None, None) => LogTarget::None,
        };
        Self { target }
    }
}

/// Build the log filter. `RUST_LOG` wins; otherwise `--quiet` and
/// `--verbose` adjust the configured default level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => default_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// for the life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_writer, guard) = match &config.target {
        LogTarget::None => (None, None),
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let name = path
                .file_name()
                .context("log path has no file name")?
                .to_owned();
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (Some(writer), Some(guard))
        }
        LogTarget::Dir(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX),
            );
            (Some(writer), Some(guard))
        }
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .with_span_list(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_beats_directories() {
        let cfg = ObservabilityConfig::resolve(
            Some(PathBuf::from("/tmp/a.jsonl")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(cfg.target, LogTarget::File(PathBuf::from("/tmp/a.jsonl")));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let cfg = ObservabilityConfig::resolve(
            None,
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/config")),
        );
        assert_eq!(cfg.target, LogTarget::Dir(PathBuf::from("/tmp/env")));
    }

    #[test]
    fn config_dir_used_last() {
        let cfg = ObservabilityConfig::resolve(None, None, Some(PathBuf::from("/tmp/config")));
        assert_eq!(cfg.target, LogTarget::Dir(PathBuf::from("/tmp/config")));
        assert_eq!(
            ObservabilityConfig::resolve(None, None, None).target,
            LogTarget::None
        );
    }
}
