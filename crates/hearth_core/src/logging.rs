//! Core logging bootstrap.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Emit stable, metadata-only diagnostic events from core.
//!
//! # Invariants
//! - Initialization is idempotent for an identical configuration and
//!   rejects reconfiguration attempts.
//! - Initialization never panics; failures come back as readable strings
//!   the FFI layer can hand to the shell unchanged.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "hearth";
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 4;
const PANIC_SUMMARY_MAX_CHARS: usize = 120;

static LOG_STATE: OnceCell<LogState> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct LogState {
    config: LogConfig,
    _handle: LoggerHandle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogConfig {
    level: &'static str,
    directory: PathBuf,
}

impl LogConfig {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = match level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" | "warning" => "warn",
            "error" => "error",
            other => {
                return Err(format!(
                    "unsupported log level `{other}`; expected trace|debug|info|warn|error"
                ));
            }
        };

        let trimmed = log_dir.trim();
        if trimmed.is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        let directory = Path::new(trimmed);
        if !directory.is_absolute() {
            return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
        }

        Ok(Self {
            level,
            directory: directory.to_path_buf(),
        })
    }
}

/// Initializes core logging with level and directory.
///
/// # Invariants
/// - Repeat calls with the same `level + log_dir` are idempotent.
/// - Repeat calls with a different level or directory are rejected.
///
/// # Errors
/// - Unsupported `level`, empty or relative `log_dir`.
/// - Log directory creation or logger backend startup failure.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let config = LogConfig::parse(level, log_dir)?;

    let state = LOG_STATE.get_or_try_init(|| start_logger(config.clone()))?;

    if state.config != config {
        return Err(format!(
            "logging already initialized with level `{}` at `{}`; refusing reconfiguration",
            state.config.level,
            state.config.directory.display()
        ));
    }

    Ok(())
}

/// Returns `(level, log_dir)` when logging is active, `None` otherwise.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOG_STATE
        .get()
        .map(|state| (state.config.level, state.config.directory.clone()))
}

/// Returns the default log level for the current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(config: LogConfig) -> Result<LogState, String> {
    std::fs::create_dir_all(&config.directory).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.directory.display()
        )
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.directory.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=core_init module=core status=ok level={} log_dir={} version={}",
        config.level,
        config.directory.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LogState {
        config,
        _handle: handle,
    })
}

fn install_panic_hook() {
    let first_install = PANIC_HOOK.set(()).is_ok();
    if !first_install {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            panic_summary(panic_info)
        );
        previous_hook(panic_info);
    }));
}

// Panic payloads can carry user-controlled text; strip newlines and cap
// length before anything reaches the log file.
fn panic_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    let flattened = payload.replace(['\n', '\r'], " ");
    let mut capped: String = flattened.chars().take(PANIC_SUMMARY_MAX_CHARS).collect();
    if flattened.chars().count() > PANIC_SUMMARY_MAX_CHARS {
        capped.push_str("...");
    }
    capped
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, LogConfig};

    #[test]
    fn parse_normalizes_level_aliases() {
        let config = LogConfig::parse(" WARNING ", "/tmp/hearth-logs").unwrap();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn parse_rejects_unknown_level() {
        let err = LogConfig::parse("verbose", "/tmp/hearth-logs").unwrap_err();
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn parse_rejects_relative_or_empty_directory() {
        assert!(LogConfig::parse("info", "logs/dev")
            .unwrap_err()
            .contains("absolute"));
        assert!(LogConfig::parse("info", "   ")
            .unwrap_err()
            .contains("empty"));
    }

    #[test]
    fn init_is_idempotent_and_rejects_reconfiguration() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap().to_string();

        init_logging("info", &dir_str).expect("first init should succeed");
        init_logging("info", &dir_str).expect("same config should be idempotent");

        let err = init_logging("debug", &dir_str).expect_err("level change must fail");
        assert!(err.contains("refusing reconfiguration"));

        let other = tempfile::tempdir().unwrap();
        let err = init_logging("info", other.path().to_str().unwrap())
            .expect_err("directory change must fail");
        assert!(err.contains("refusing reconfiguration"));

        let (level, active_dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(active_dir, dir.path());
    }
}
