// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! kira-daemon
//!
//! Background process that owns the vault lock and drives the inbox,
//! rollup, and calendar-reconciliation loops. Typically started once per
//! vault; the `kira` CLI talks to the vault directly and does not go
//! through this process.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use kira_daemon::{env, lifecycle, KiraConfig, LifecycleError};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("kira-daemon {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("kira-daemon {}", env!("CARGO_PKG_VERSION"));
                println!("Background process driving the inbox, rollup, and calendar sync loops.");
                println!();
                println!("USAGE:");
                println!("    kira-daemon");
                println!();
                println!("Configuration is read from the file named by $KIRA_CONFIG, or");
                println!("$XDG_CONFIG_HOME/kira/kira.env, or ~/.config/kira/kira.env.");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("usage: kira-daemon [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config_path = env::config_path()?;
    let config = KiraConfig::load(&config_path)?;

    let _log_guards = kira_daemon::logging::setup_logging(&config.logs_path(), &config.log_level)?;

    info!(config = %config_path.display(), "starting kira-daemon");

    let daemon = match lifecycle::startup(config) {
        Ok(d) => d,
        Err(LifecycleError::LockFailed(path)) => {
            eprintln!("kira-daemon is already running");
            eprintln!("  lock file: {}", path.display());
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "startup failed");
            return Err(e.into());
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let shutdown = async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM"),
            _ = sigint.recv() => info!("received SIGINT"),
        }
    };

    daemon.scheduler.run(shutdown).await;
    daemon.shutdown();

    info!("kira-daemon stopped");
    Ok(())
}
