//! Logging initialization for the signup wizard.
//!
//! TUI mode: logs to `<state>/logs/signup-wizard-{datetime}.log`
//! CLI mode: logs to stderr

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes the file writer when dropped; keep it for the whole run
    pub _guard: Option<WorkerGuard>,

    /// Session log file, when logging to a file
    pub log_file_path: Option<PathBuf>,
}

/// Where a session's logs go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// `<dir>/<file_name>`, used while the wizard owns the terminal
    File { dir: PathBuf, file_name: String },
    Stderr,
}

impl LogTarget {
    /// Pick the target for this run
    pub fn select(
        config: &Config,
        is_tui_mode: bool,
        started: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        if logs_to_file(config, is_tui_mode) {
            LogTarget::File {
                dir: config.logs_path(),
                file_name: log_file_name(started),
            }
        } else {
            LogTarget::Stderr
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        match self {
            LogTarget::File { dir, file_name } => Some(dir.join(file_name)),
            LogTarget::Stderr => None,
        }
    }
}

/// HTTP client crates are only interesting when asked for explicitly
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn"];

/// Effective level filter, `--debug` taking precedence over config
pub fn effective_level(config: &Config, debug_override: bool) -> String {
    if debug_override {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    }
}

/// Filter directives: `RUST_LOG` verbatim when set, otherwise the level
/// with HTTP client noise turned down
pub fn filter_directives(level: &str, rust_log: Option<String>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => std::iter::once(level)
            .chain(QUIET_DEPENDENCIES.iter().copied())
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Log file name for a session started at `timestamp`
pub fn log_file_name(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    format!("signup-wizard-{}.log", timestamp.format("%Y%m%dT%H%M%SZ"))
}

/// Whether logs go to a file rather than stderr
pub fn logs_to_file(config: &Config, is_tui_mode: bool) -> bool {
    is_tui_mode && config.logging.to_file
}

/// Install the global subscriber.
///
/// The wizard draws on the terminal, so in TUI mode logs go to a session
/// file under the state directory; CLI commands log to stderr.
pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let level = effective_level(config, debug_override);
    let filter = EnvFilter::try_new(filter_directives(&level, std::env::var("RUST_LOG").ok()))
        .context("Invalid log filter")?;
    let target = LogTarget::select(config, is_tui_mode, chrono::Utc::now());
    let log_file_path = target.path();

    let guard = match target {
        LogTarget::File { dir, file_name } => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(&dir, &file_name));

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_ansi(false).with_writer(writer))
                .try_init()
                .context("Logging was already initialized")?;
            Some(guard)
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .try_init()
                .context("Logging was already initialized")?;
            None
        }
    };

    Ok(LoggingHandle {
        _guard: guard,
        log_file_path,
    })
}

/// Print the session log location if anything was written
pub fn report_log_file(log_path: &Path) {
    if let Ok(metadata) = log_path.metadata() {
        if metadata.len() > 0 {
            eprintln!("Session log: {}", log_path.display());
        }
    }
}
