// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

/// Resolve the config file path: `KIRA_CONFIG` > `XDG_CONFIG_HOME/kira/kira.env` >
/// `~/.config/kira/kira.env`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Ok(path) = std::env::var("KIRA_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("kira").join("kira.env"));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoConfigDir)?;
    Ok(PathBuf::from(home).join(".config/kira/kira.env"))
}

/// Inbox scan interval override, for tests that don't want to wait out the
/// production default.
pub fn inbox_scan_ms() -> Option<Duration> {
    std::env::var("KIRA_INBOX_SCAN_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Calendar reconciliation tick interval override.
pub fn reconcile_ms() -> Option<Duration> {
    std::env::var("KIRA_RECONCILE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
