//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr (stdout belongs to command output and to
//! the MCP transport). JSONL logs additionally go to a file when a log
//! location can be found, in this order:
//!
//! 1. `HOTCOLD_LOG_PATH` (exact file, never rotated)
//! 2. `HOTCOLD_LOG_DIR` (daily-rotated `hotcold.<date>.jsonl`)
//! 3. `log_dir` from configuration
//! 4. the platform data directory (`~/.local/share/hotcold/logs` on Linux)
//!
//! A file location that cannot be created disables file logging rather than
//! failing the command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "HOTCOLD_LOG_PATH";
const LOG_DIR_ENV: &str = "HOTCOLD_LOG_DIR";
const LOG_PREFIX: &str = "hotcold";
const LOG_SUFFIX: &str = "jsonl";

/// Where file logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A single file that is appended to.
    File(PathBuf),
    /// A directory of daily-rotated files.
    Directory(PathBuf),
}

/// Resolved logging destinations.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// File log destination; `None` disables file logging.
    pub target: Option<LogTarget>,
}

impl ObservabilityConfig {
    /// Resolve the log destination from the environment, falling back to
    /// `config_log_dir` and then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            target: resolve_target(
                std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
                std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
                config_log_dir,
                platform_log_dir(),
            ),
        }
    }
}

/// `logs/` under the platform data directory shared with the config layer.
fn platform_log_dir() -> Option<PathBuf> {
    hotcold_core::config::user_data_dir().map(|dir| dir.join("logs").into_std_path_buf())
}

fn resolve_target(
    log_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    platform_dir: Option<PathBuf>,
) -> Option<LogTarget> {
    if let Some(path) = log_path.filter(|p| !p.as_os_str().is_empty()) {
        return Some(LogTarget::File(path));
    }
    log_dir
        .filter(|p| !p.as_os_str().is_empty())
        .or(config_dir)
        .or(platform_dir)
        .map(LogTarget::Directory)
}

/// Build the level filter: `RUST_LOG` wins, then `-q`/`-v`, then the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match config.target.as_ref().and_then(file_appender) {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn file_appender(target: &LogTarget) -> Option<RollingFileAppender> {
    let (dir, builder) = match target {
        LogTarget::File(path) => {
            let name = path.file_name()?.to_str()?;
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let builder = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name);
            (dir, builder)
        }
        LogTarget::Directory(dir) => {
            let builder = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_PREFIX)
                .filename_suffix(LOG_SUFFIX);
            (dir.as_path(), builder)
        }
    };
    std::fs::create_dir_all(dir).ok()?;
    builder.build(dir).ok()
}
