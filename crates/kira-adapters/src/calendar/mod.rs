// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar sync adapters (§6, ADR-012 in spirit).
//!
//! Grounded on `original_source/src/kira/adapters/gcal/adapter.py`: the
//! event shape, the `gcal_id`/`gcal_last_synced` bookkeeping fields
//! already on `TaskFields`/`EventFields` (spec §3), and the last-writer-wins
//! conflict rule carry over. The HTTP client to a concrete calendar
//! provider is an external collaborator and stays out of scope here; this
//! module supplies the trait seam, the reconciliation rule, and a fake.

mod noop;
mod reconcile;

pub use noop::NoOpCalendarSyncAdapter;
pub use reconcile::{plan_reconciliation, resolve_conflict, ReconciliationAction, ReconciliationInput, Resolution};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeCalendarSyncAdapter, PushCall};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// A calendar event as understood by the sync adapter, independent of any
/// concrete provider's wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// Remote calendar event ID (§3 `gcal_id`).
    pub gcal_id: String,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub all_day: bool,
    /// Remote last-modified timestamp, used for conflict resolution.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum CalendarSyncError {
    #[error("calendar sync failed: {0}")]
    SyncFailed(String),
}

/// Adapter for pulling from and pushing to a remote calendar.
///
/// Reconciliation itself (deciding which side wins) is the pure function
/// [`resolve_conflict`]; this trait only moves data across the boundary.
#[async_trait]
pub trait CalendarSyncAdapter: Send + Sync {
    /// Fetch events updated since `since`.
    async fn pull(&self, since: DateTime<Utc>) -> Result<Vec<CalendarEvent>, CalendarSyncError>;

    /// Push (create or update) an event, returning its remote ID.
    async fn push(&self, event: &CalendarEvent) -> Result<String, CalendarSyncError>;
}
