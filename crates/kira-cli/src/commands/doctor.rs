// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kira doctor` — checks vault lock, config, and log directory health.
//!
//! Grounded on the original `kira doctor` diagnostic (environment/vault/
//! permission checks), narrowed to what this crate actually owns: the
//! advisory vault lock (§4.5), the config file (§6), and the logs/audit
//! directories (§4.13).

use clap::Args;
use fs2::FileExt;
use kira_daemon::{env, KiraConfig};
use serde::Serialize;

use crate::envelope::{self, Trace};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct DoctorArgs {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Ok,
    Warn,
    Fail,
}

#[derive(Debug, Serialize)]
struct Check {
    name: &'static str,
    status: Status,
    message: String,
}

pub fn handle(_args: DoctorArgs, format: OutputFormat, trace: &Trace) -> i32 {
    let mut checks = Vec::new();

    let config = match env::config_path().and_then(|p| KiraConfig::load(&p)) {
        Ok(config) => {
            checks.push(Check { name: "config file", status: Status::Ok, message: "loaded".to_string() });
            Some(config)
        }
        Err(e) => {
            checks.push(Check { name: "config file", status: Status::Fail, message: e.to_string() });
            None
        }
    };

    if let Some(config) = &config {
        checks.push(check_vault_path(config));
        checks.push(check_lock(config));
        checks.push(check_dir_writable("logs directory", &config.logs_path()));
        checks.push(check_dir_writable("audit directory", &config.audit_path()));
    }

    let failed = checks.iter().filter(|c| c.status == Status::Fail).count();
    let warned = checks.iter().filter(|c| c.status == Status::Warn).count();
    let overall = if failed > 0 {
        Status::Fail
    } else if warned > 0 {
        Status::Warn
    } else {
        Status::Ok
    };

    let data = serde_json::json!({
        "checks": checks,
        "overall": overall,
    });
    envelope::success(format, trace, data, || {
        for check in &checks {
            let icon = match check.status {
                Status::Ok => "\u{2713}",
                Status::Warn => "\u{26a0}",
                Status::Fail => "\u{2717}",
            };
            println!("{icon} {}: {}", check.name, check.message);
        }
    });

    match overall {
        Status::Ok => 0,
        Status::Warn => 0,
        Status::Fail => ExitError::CONFIG,
    }
}

fn check_vault_path(config: &KiraConfig) -> Check {
    if config.vault_path.exists() {
        Check { name: "vault path", status: Status::Ok, message: format!("found at {}", config.vault_path.display()) }
    } else {
        Check { name: "vault path", status: Status::Fail, message: format!("not found at {}", config.vault_path.display()) }
    }
}

fn check_lock(config: &KiraConfig) -> Check {
    let lock_path = config.lock_path();
    let file = match std::fs::OpenOptions::new().create(true).write(true).open(&lock_path) {
        Ok(f) => f,
        Err(e) => return Check { name: "vault lock", status: Status::Fail, message: e.to_string() },
    };
    match file.try_lock_exclusive() {
        Ok(()) => {
            let _ = file.unlock();
            Check { name: "vault lock", status: Status::Ok, message: "acquirable".to_string() }
        }
        Err(_) => Check {
            name: "vault lock",
            status: Status::Warn,
            message: "held by another kira-daemon instance".to_string(),
        },
    }
}

fn check_dir_writable(name: &'static str, path: &std::path::Path) -> Check {
    if !path.exists() {
        return Check { name, status: Status::Warn, message: "will be created".to_string() };
    }
    let probe = path.join(".kira-doctor-probe");
    match std::fs::write(&probe, b"") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            Check { name, status: Status::Ok, message: "writable".to_string() }
        }
        Err(e) => Check { name, status: Status::Fail, message: e.to_string() },
    }
}

#[cfg(test)]
#[path = "doctor_tests.rs"]
mod tests;
