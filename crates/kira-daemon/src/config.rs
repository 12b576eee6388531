// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration (§6 "Configuration (single file, key-value)").
//!
//! One file, `key = value` per line, `#` comments, blank lines ignored.
//! Not TOML/YAML — the format the spec names is simpler than either, so the
//! parser here is hand-rolled rather than pulled from a format crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory (no $HOME)")]
    NoConfigDir,

    #[error("io error reading config at {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("missing required config key `{0}`")]
    MissingRequired(&'static str),

    #[error("invalid value for `{key}`: `{value}` ({reason})")]
    InvalidValue { key: &'static str, value: String, reason: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Alpha,
    Beta,
    Stable,
}

impl Mode {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "alpha" => Some(Mode::Alpha),
            "beta" => Some(Mode::Beta),
            "stable" => Some(Mode::Stable),
            _ => None,
        }
    }
}

/// Resolved daemon configuration (§6). `vault_path` is the only required
/// key; everything else defaults per the spec.
#[derive(Debug, Clone)]
pub struct KiraConfig {
    pub vault_path: PathBuf,
    pub mode: Mode,
    pub default_timezone: String,
    pub gcal_enabled: bool,
    pub telegram_enabled: bool,
    pub enable_plugins: bool,
    pub sandbox_max_cpu_seconds: Option<u64>,
    pub sandbox_max_memory_mb: Option<u64>,
    pub sandbox_allow_network: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl KiraConfig {
    /// Load from the file at `config_path`, applying defaults for every
    /// optional key (§6). Fails fast, naming the missing key, if
    /// `vault_path` is absent.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(config_path)
            .map_err(|e| ConfigError::Io(config_path.to_path_buf(), e))?;
        Self::parse(&raw)
    }

    /// Parse from an in-memory string rather than a file, for tests and
    /// for the daemon's own lifecycle tests that need a throwaway config.
    pub fn load_from_str(raw: &str) -> Result<Self, ConfigError> {
        Self::parse(raw)
    }

    fn parse(raw: &str) -> Result<Self, ConfigError> {
        let entries = parse_key_value(raw);

        let vault_path = entries
            .get("vault_path")
            .ok_or(ConfigError::MissingRequired("vault_path"))?;

        let mode = match entries.get("mode") {
            Some(v) => Mode::parse(v).ok_or(ConfigError::InvalidValue {
                key: "mode",
                value: v.clone(),
                reason: "expected one of alpha, beta, stable",
            })?,
            None => Mode::Alpha,
        };

        let bool_flag = |key: &'static str, default: bool| -> Result<bool, ConfigError> {
            match entries.get(key) {
                Some(v) => parse_bool(v).ok_or(ConfigError::InvalidValue {
                    key,
                    value: v.clone(),
                    reason: "expected true or false",
                }),
                None => Ok(default),
            }
        };

        let opt_u64 = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            match entries.get(key) {
                Some(v) => v
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidValue { key, value: v.clone(), reason: "expected an integer" }),
                None => Ok(None),
            }
        };

        Ok(Self {
            vault_path: PathBuf::from(vault_path),
            mode,
            default_timezone: entries.get("default_timezone").cloned().unwrap_or_else(|| "UTC".to_string()),
            gcal_enabled: bool_flag("gcal_enabled", false)?,
            telegram_enabled: bool_flag("telegram_enabled", false)?,
            enable_plugins: bool_flag("enable_plugins", false)?,
            sandbox_max_cpu_seconds: opt_u64("sandbox_max_cpu_seconds")?,
            sandbox_max_memory_mb: opt_u64("sandbox_max_memory_mb")?,
            sandbox_allow_network: bool_flag("sandbox_allow_network", false)?,
            log_level: entries.get("log_level").cloned().unwrap_or_else(|| "info".to_string()),
            log_file: entries.get("log_file").map(PathBuf::from),
        })
    }

    pub fn inbox_path(&self) -> PathBuf {
        self.vault_path.join("inbox")
    }

    pub fn audit_path(&self) -> PathBuf {
        self.vault_path.join("artifacts").join("audit")
    }

    pub fn logs_path(&self) -> PathBuf {
        self.vault_path.join("logs")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.vault_path.join(".kira.lock")
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_key_value(raw: &str) -> HashMap<String, String> {
    let mut out = HashMap::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        out.insert(key.trim().to_string(), value.trim().to_string());
    }
    out
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
