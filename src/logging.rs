//! Tracing setup for LoreLibrary.
//!
//! `logging.level` accepts either a bare level (`debug`) or per-target
//! `EnvFilter` directives (`lorelib=debug,tower_http=info`). When `RUST_LOG`
//! is set it replaces the configured filter entirely.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{LoreError, Result};

/// Level used when the configured one is not recognized.
const DEFAULT_LEVEL: &str = "info";

/// sqlx logs every statement at info; keep that out of normal output.
const SQLX_QUERY_DIRECTIVE: &str = "sqlx::query=warn";

/// Turn the configured level into filter directives.
fn directives(level: &str) -> String {
    let level = level.trim().to_ascii_lowercase();
    let base = match level.as_str() {
        s @ ("trace" | "debug" | "info" | "warn" | "error" | "off") => s,
        "warning" => "warn",
        s if s.contains('=') => s,
        _ => DEFAULT_LEVEL,
    };
    format!("{base},{SQLX_QUERY_DIRECTIVE}")
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

/// Open the log file for appending, creating it and its directory if needed.
fn open_log_file(path: &str) -> Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber.
///
/// Events always go to stdout; with `logging.file` set they are also appended
/// to that file without ANSI colors. Fails if the file cannot be opened or a
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let file_layer = match config.file.as_deref() {
        Some(path) => Some(
            fmt::layer()
                .with_writer(Arc::new(open_log_file(path)?))
                .with_ansi(false)
                .with_target(true),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()
        .map_err(|e| LoreError::Config(format!("failed to install logger: {e}")))
}

/// Install a stdout-only subscriber.
///
/// Used when [`init`] fails. Does nothing if a subscriber is already set.
pub fn init_console_only(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt::layer().with_target(true))
        .try_init();
}
