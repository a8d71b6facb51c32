//! File logging for the hook binaries.
//!
//! Hooks share stderr with the user-facing `[Tag]` messages, so diagnostics
//! go to `~/.claude/logs/hookkit.log` only. Filter precedence:
//!
//! 1. `HOOKKIT_DEBUG_LOG=1` forces `debug`
//! 2. `HOOKKIT_LOG` as an `EnvFilter` directive
//! 3. `info`
//!
//! Any failure here leaves logging disabled; it never stops a hook.

use std::env;
use std::path::Path;

use fs_err as fs;
use hookkit_core::StorageConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HOOKKIT_LOG";
const DEBUG_LOG_ENV: &str = "HOOKKIT_DEBUG_LOG";
const LOG_FILE_PREFIX: &str = "hookkit";
const LOG_FILE_SUFFIX: &str = "log";

/// Installs the global subscriber. Keep the guard alive until exit so the
/// background writer flushes.
pub fn init() -> Option<WorkerGuard> {
    let storage = StorageConfig::from_env().ok()?;
    let directive = filter_directive(
        env::var(DEBUG_LOG_ENV).ok().as_deref(),
        env::var(LOG_ENV).ok().as_deref(),
    );
    init_in(&storage.logs_dir(), &directive)
}

fn init_in(log_dir: &Path, directive: &str) -> Option<WorkerGuard> {
    fs::create_dir_all(log_dir).ok()?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(log_dir)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}

fn filter_directive(debug_flag: Option<&str>, log_filter: Option<&str>) -> String {
    let debug_enabled = debug_flag
        .map(|value| matches!(value, "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    if debug_enabled {
        return "debug".to_string();
    }
    match log_filter.map(str::trim) {
        Some(filter) if !filter.is_empty() => filter.to_string(),
        _ => "info".to_string(),
    }
}
