// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Last-writer-wins conflict resolution between a Vault entity and its
//! synced calendar event.

use chrono::{DateTime, Utc};

/// Which side should win a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    VaultWins,
    GcalWins,
    /// Timestamps are within the tolerance window; no conflict.
    NoConflict,
}

/// Conflicts within this window are treated as clock skew, not a real
/// divergence (mirrors the Python adapter's 60-second tolerance).
const CONFLICT_TOLERANCE_SECONDS: i64 = 60;

/// Resolve a conflict between a Vault entity's `updated_at` and the
/// synced calendar event's `updated_at` (§3 `gcal_last_synced` bookkeeping).
pub fn resolve_conflict(vault_updated_at: DateTime<Utc>, gcal_updated_at: DateTime<Utc>) -> Resolution {
    let delta = (vault_updated_at - gcal_updated_at).num_seconds().abs();
    if delta <= CONFLICT_TOLERANCE_SECONDS {
        return Resolution::NoConflict;
    }
    if vault_updated_at > gcal_updated_at {
        Resolution::VaultWins
    } else {
        Resolution::GcalWins
    }
}

/// One side of a Vault entity known to be linked to a calendar event, as
/// seen by the reconciliation planner.
#[derive(Debug, Clone)]
pub struct ReconciliationInput {
    pub entity_id: String,
    pub gcal_id: String,
    pub vault_updated_at: DateTime<Utc>,
    pub gcal_updated_at: Option<DateTime<Utc>>,
}

/// An action the caller should take to bring the Vault and the calendar
/// back in sync (component 16, "Sync adapters").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationAction {
    PushToGcal { entity_id: String },
    PullFromGcal { entity_id: String },
}

/// Plan reconciliation across a batch of linked entity/event pairs.
/// Pairs with no matching remote event are skipped (nothing to reconcile
/// against); pairs within the tolerance window produce no action.
pub fn plan_reconciliation(inputs: &[ReconciliationInput]) -> Vec<ReconciliationAction> {
    inputs
        .iter()
        .filter_map(|input| {
            let gcal_updated_at = input.gcal_updated_at?;
            match resolve_conflict(input.vault_updated_at, gcal_updated_at) {
                Resolution::VaultWins => Some(ReconciliationAction::PushToGcal { entity_id: input.entity_id.clone() }),
                Resolution::GcalWins => Some(ReconciliationAction::PullFromGcal { entity_id: input.entity_id.clone() }),
                Resolution::NoConflict => None,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
