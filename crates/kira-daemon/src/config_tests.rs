// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_vault_path_fails_fast() {
    let err = KiraConfig::parse("mode = beta\n").unwrap_err();
    assert!(matches!(err, ConfigError::MissingRequired("vault_path")));
}

#[test]
fn defaults_are_applied() {
    let cfg = KiraConfig::parse("vault_path = /home/kira/vault\n").unwrap();
    assert_eq!(cfg.vault_path, PathBuf::from("/home/kira/vault"));
    assert_eq!(cfg.mode, Mode::Alpha);
    assert_eq!(cfg.default_timezone, "UTC");
    assert!(!cfg.gcal_enabled);
    assert!(!cfg.telegram_enabled);
    assert!(!cfg.enable_plugins);
    assert!(!cfg.sandbox_allow_network);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.log_file.is_none());
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let cfg = KiraConfig::parse(
        "# a comment\n\nvault_path = /vault\nmode = beta\n\n# trailing\n",
    )
    .unwrap();
    assert_eq!(cfg.mode, Mode::Beta);
}

#[test]
fn invalid_mode_is_rejected() {
    let err = KiraConfig::parse("vault_path = /vault\nmode = bogus\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "mode", .. }));
}

#[test]
fn invalid_bool_is_rejected() {
    let err = KiraConfig::parse("vault_path = /vault\ngcal_enabled = yes\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "gcal_enabled", .. }));
}

#[test]
fn sandbox_limits_parse_as_integers() {
    let cfg = KiraConfig::parse(
        "vault_path = /vault\nsandbox_max_cpu_seconds = 30\nsandbox_max_memory_mb = 512\n",
    )
    .unwrap();
    assert_eq!(cfg.sandbox_max_cpu_seconds, Some(30));
    assert_eq!(cfg.sandbox_max_memory_mb, Some(512));
}

#[test]
fn derived_paths_are_vault_relative() {
    let cfg = KiraConfig::parse("vault_path = /vault\n").unwrap();
    assert_eq!(cfg.inbox_path(), PathBuf::from("/vault/inbox"));
    assert_eq!(cfg.audit_path(), PathBuf::from("/vault/artifacts/audit"));
    assert_eq!(cfg.logs_path(), PathBuf::from("/vault/logs"));
    assert_eq!(cfg.lock_path(), PathBuf::from("/vault/.kira.lock"));
}
