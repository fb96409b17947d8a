//! Logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs on the first successful call per process.
//! - Keep user task text out of log output; only counts, ids and byte sizes
//!   are logged.
//!
//! # Invariants
//! - The first successful initialization wins; later calls are no-ops.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "taskpad";
const ROTATE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 3;
const PANIC_MESSAGE_MAX_CHARS: usize = 120;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogging {
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts rolling file logging under `log_dir` at the given level.
///
/// The task-list core has a single logging configuration for the process
/// lifetime: the first call that succeeds activates it, and every later
/// call is a no-op returning `Ok(())`. The level string is anything
/// `flexi_logger` accepts (`info`, `debug`, module specs, ...).
///
/// # Errors
/// - Empty or non-absolute `log_dir`, or a directory that cannot be created.
/// - A level spec the logger backend rejects.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let log_dir = log_dir.trim();
    let dir = Path::new(log_dir);
    if log_dir.is_empty() || !dir.is_absolute() {
        return Err(format!(
            "log_dir must be an absolute path, got `{log_dir}`"
        ));
    }

    if ACTIVE.get().is_some() {
        return Ok(());
    }

    ACTIVE.get_or_try_init(|| -> Result<ActiveLogging, String> {
        std::fs::create_dir_all(dir)
            .map_err(|err| format!("cannot create log directory `{}`: {err}", dir.display()))?;

        let handle = Logger::try_with_str(level.trim())
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(ROTATE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEEP_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        log_panics();

        info!(
            "event=app_start module=core status=ok platform={} version={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION")
        );

        Ok(ActiveLogging {
            log_dir: dir.to_path_buf(),
            _handle: handle,
        })
    })?;

    Ok(())
}

/// Directory the active logger writes to, or `None` before initialization.
pub fn active_log_dir() -> Option<PathBuf> {
    ACTIVE.get().map(|state| state.log_dir.clone())
}

/// Default log level for the current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn log_panics() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info.location().map_or_else(
                || "unknown".to_string(),
                |loc| format!("{}:{}", loc.file(), loc.line()),
            );
            error!(
                "event=panic module=core status=error location={location} message={}",
                panic_message(info)
            );
            previous(info);
        }));
    });
}

// Panic payloads can carry user-entered task text; flatten and cap before
// logging.
fn panic_message(info: &std::panic::PanicHookInfo<'_>) -> String {
    let message = if let Some(text) = info.payload().downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = info.payload().downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    };

    truncate_single_line(&message, PANIC_MESSAGE_MAX_CHARS)
}

fn truncate_single_line(value: &str, max_chars: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(max_chars)
        .collect();

    if value.chars().count() > max_chars {
        format!("{flat}...")
    } else {
        flat
    }
}
