// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup (§4.13): one JSON-lines file per category under
//! `<vault>/logs/<category>/<component>.jsonl`, never rotated mid-write.
//!
//! Grounded on the non-blocking `tracing-appender` + `EnvFilter` wiring used
//! elsewhere in this codebase; generalized here to route by category rather
//! than writing everything to one file.

use std::path::Path;
use thiserror::Error;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Categories named in §4.13. Each gets its own subdirectory and log file,
/// selected by matching the tracing target's leading path segment.
const CATEGORIES: &[(&str, &str)] = &[
    ("core", "kira_core"),
    ("adapters", "kira_adapters"),
    ("plugins", "kira_tools"),
    ("pipelines", "kira_daemon"),
];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("io error preparing log directory {0}: {1}")]
    Io(std::path::PathBuf, #[source] std::io::Error),
}

/// Keeps the non-blocking writers' background flush threads alive; drop
/// only at process exit.
pub struct LoggingGuards(#[allow(dead_code)] Vec<tracing_appender::non_blocking::WorkerGuard>);

/// Install the global tracing subscriber: one JSON-formatted, non-blocking
/// layer per category, each filtered to that category's crates, plus the
/// `level` floor from config/`RUST_LOG`.
pub fn setup_logging(logs_dir: &Path, log_level: &str) -> Result<LoggingGuards, LoggingError> {
    let base_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let registry = tracing_subscriber::registry().with(base_filter);

    let mut guards = Vec::with_capacity(CATEGORIES.len());
    let mut layers = Vec::new();
    for (category, target_prefix) in CATEGORIES {
        let dir = logs_dir.join(category);
        std::fs::create_dir_all(&dir).map_err(|e| LoggingError::Io(dir.clone(), e))?;
        let appender = tracing_appender::rolling::never(&dir, format!("{category}.jsonl"));
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        let targets = Targets::new().with_target(*target_prefix, tracing::Level::TRACE);
        layers.push(fmt::layer().json().with_writer(non_blocking).with_filter(targets));
    }

    registry.with(layers).init();

    Ok(LoggingGuards(guards))
}
