// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: acquire the vault lock, wire the bus/pipelines/tools,
//! run to shutdown.
//!
//! The advisory file lock is grounded directly on the teacher's
//! lock-before-anything-else startup idiom (open without truncating,
//! `try_lock_exclusive`, then write the PID) — it resolves the vault-root
//! single-writer question (§9) the same way the teacher resolves its own
//! single-daemon-instance question.

use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use fs2::FileExt;
use thiserror::Error;
use tracing::info;

use kira_adapters::{CalendarSyncAdapter, NoOpCalendarSyncAdapter};
use kira_bus::Bus;
use kira_core::{SystemClock, UuidIdGen};
use kira_storage::{AuditLogger, VaultError, VaultStore};
use kira_tools::{InboxPipeline, RollupPipeline, VaultAccess};

use crate::config::KiraConfig;
use crate::normalize::InboxNormalizer;
use crate::scheduler::Scheduler;

pub type DaemonVault = VaultStore<SystemClock, UuidIdGen>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to acquire lock on {0}: another kira-daemon instance is already running for this vault")]
    LockFailed(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("vault error: {0}")]
    Vault(#[from] VaultError),
}

/// Everything the running daemon needs, held for the duration of the
/// process and torn down on shutdown.
pub struct DaemonState {
    config: KiraConfig,
    // Held only to keep the advisory lock alive; released on drop.
    #[allow(dead_code)]
    lock_file: File,
    pub vault: Arc<DaemonVault>,
    pub bus: Arc<Bus>,
    pub audit: Arc<AuditLogger>,
    pub scheduler: Scheduler,
}

impl DaemonState {
    pub fn shutdown(self) {
        info!("daemon shutting down");
    }
}

/// Acquire the vault-root lock and wire every component (§4.5, §4.9, §4.10,
/// §4.11, §4.13, §6 sync adapters). Returns before the scheduler's first
/// tick — the caller drives the loop.
pub fn startup(config: KiraConfig) -> Result<DaemonState, LifecycleError> {
    std::fs::create_dir_all(&config.vault_path)?;
    std::fs::create_dir_all(config.inbox_path())?;
    std::fs::create_dir_all(config.audit_path())?;
    std::fs::create_dir_all(config.logs_path())?;

    let lock_path = config.lock_path();
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)?;
    lock_file
        .try_lock_exclusive()
        .map_err(|_| LifecycleError::LockFailed(lock_path.clone()))?;

    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    let bus = Arc::new(Bus::new());
    let audit = Arc::new(AuditLogger::new(config.audit_path()));

    let vault: Arc<DaemonVault> = Arc::new(VaultStore::open(
        config.vault_path.clone(),
        SystemClock,
        UuidIdGen,
        Some(bus.clone() as Arc<dyn kira_core::EventPublisher>),
    )?);

    let rollup = Arc::new(RollupPipeline::new(
        vault.clone() as Arc<dyn VaultAccess>,
        bus.clone() as Arc<dyn kira_core::EventPublisher>,
    ));

    let normalizer = Arc::new(InboxNormalizer::new(vault.clone() as Arc<dyn VaultAccess>));
    let inbox = Arc::new(InboxPipeline::new(
        config.inbox_path(),
        bus.clone() as Arc<dyn kira_core::EventPublisher>,
        normalizer,
        32,
        5,
    ));

    let calendar = Arc::new(NoOpCalendarSyncAdapter::new()) as Arc<dyn CalendarSyncAdapter>;

    let scheduler = Scheduler::new(inbox, rollup, calendar, config.gcal_enabled);

    info!(vault_path = %config.vault_path.display(), mode = ?config.mode, "kira-daemon started");

    Ok(DaemonState { config, lock_file, vault, bus, audit, scheduler })
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
