// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stable process exit codes (spec §6 "CLI surface").

use std::fmt;

/// Carries the exit code an [`anyhow::Error`] should map to, independent of
/// whatever message is printed. Wrapped (via `anyhow::Error::from`) around
/// the lowest-level error so `main`'s downcast finds it through the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitError {
    pub code: i32,
}

impl ExitError {
    pub const VALIDATION: i32 = 2;
    pub const CONFLICT: i32 = 3;
    pub const FSM_GUARD: i32 = 4;
    pub const IO_OR_LOCK: i32 = 5;
    pub const CONFIG: i32 = 6;
    pub const UNKNOWN: i32 = 7;

    pub fn new(code: i32) -> Self {
        Self { code }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exit code {}", self.code)
    }
}

impl std::error::Error for ExitError {}

/// Map a [`kira_storage::VaultError`] to its stable exit code (spec §6, §7).
pub fn code_for_vault_error(err: &kira_storage::VaultError) -> i32 {
    use kira_storage::VaultError;
    match err {
        VaultError::Validation(_) => ExitError::VALIDATION,
        VaultError::FsmGuard(_) => ExitError::FSM_GUARD,
        VaultError::NotFound(_) => ExitError::VALIDATION,
        VaultError::DuplicateId(_) => ExitError::CONFLICT,
        VaultError::SelfLink(_) => ExitError::VALIDATION,
        VaultError::Locked => ExitError::IO_OR_LOCK,
        VaultError::CommitFailed { .. } => ExitError::IO_OR_LOCK,
        VaultError::Io(_) => ExitError::IO_OR_LOCK,
        VaultError::Codec(_) => ExitError::VALIDATION,
    }
}
