// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::KiraConfig;

fn config(dir: &tempfile::TempDir) -> KiraConfig {
    KiraConfig::load_from_str(&format!("vault_path = {}\n", dir.path().display())).unwrap()
}

#[test]
fn startup_creates_vault_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let state = startup(config(&dir)).unwrap();

    assert!(dir.path().join("inbox").exists());
    assert!(dir.path().join("artifacts").join("audit").exists());
    assert!(dir.path().join("logs").exists());
    state.shutdown();
}

#[test]
fn startup_acquires_an_exclusive_lock_on_the_vault_root() {
    let dir = tempfile::tempdir().unwrap();
    let _first = startup(config(&dir)).unwrap();

    let err = startup(config(&dir)).unwrap_err();
    assert!(matches!(err, LifecycleError::LockFailed(_)));
}

#[test]
fn shutdown_releases_the_lock_for_a_subsequent_startup() {
    let dir = tempfile::tempdir().unwrap();
    let first = startup(config(&dir)).unwrap();
    first.shutdown();

    let second = startup(config(&dir));
    assert!(second.is_ok());
}

#[test]
fn lock_file_records_the_current_pid() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir);
    let lock_path = cfg.lock_path();
    let state = startup(cfg).unwrap();

    let recorded = std::fs::read_to_string(&lock_path).unwrap();
    assert_eq!(recorded.trim(), std::process::id().to_string());
    state.shutdown();
}
