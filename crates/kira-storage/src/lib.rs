// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Storage layer for Kira: the single-writer vault store, its link index,
//! the idempotency/dedupe store, and the audit logger.

mod audit;
mod idempotency;
mod links;
mod vault;

pub use audit::{AuditError, AuditLogger, AuditRecord};
pub use idempotency::{
    generate_event_id, normalize_payload, DedupeStats, EventRecord, IdempotencyError,
    IdempotencyStore,
};
pub use links::{extract_wikilinks, Direction, Link, LinkIndex, LinkType};
pub use vault::{EntityFilter, EntityPatch, VaultError, VaultStore};
