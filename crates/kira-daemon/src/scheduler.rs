// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic background work: inbox scans, rollup generation, calendar
//! reconciliation (§4.9, §4.10, §6 sync adapters).
//!
//! Grounded on the teacher's multi-interval `tokio::select!` engine loop —
//! one `tokio::time::interval` per kind of periodic work, ticked from a
//! single loop rather than one spawned task per concern.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use kira_adapters::{plan_reconciliation, CalendarSyncAdapter, ReconciliationAction, ReconciliationInput};
use kira_tools::{InboxPipeline, RollupPipeline};

const DEFAULT_INBOX_SCAN_INTERVAL: Duration = Duration::from_secs(30);
const DEFAULT_RECONCILE_INTERVAL: Duration = Duration::from_secs(300);

pub struct Scheduler {
    inbox: Arc<InboxPipeline>,
    rollup: Arc<RollupPipeline>,
    calendar: Arc<dyn CalendarSyncAdapter>,
    gcal_enabled: bool,
    inbox_scan_interval: Duration,
    reconcile_interval: Duration,
}

impl Scheduler {
    pub fn new(
        inbox: Arc<InboxPipeline>,
        rollup: Arc<RollupPipeline>,
        calendar: Arc<dyn CalendarSyncAdapter>,
        gcal_enabled: bool,
    ) -> Self {
        Self {
            inbox,
            rollup,
            calendar,
            gcal_enabled,
            inbox_scan_interval: crate::env::inbox_scan_ms().unwrap_or(DEFAULT_INBOX_SCAN_INTERVAL),
            reconcile_interval: crate::env::reconcile_ms().unwrap_or(DEFAULT_RECONCILE_INTERVAL),
        }
    }

    /// Drive the scheduler until `shutdown` resolves.
    pub async fn run(&self, shutdown: impl std::future::Future<Output = ()>) {
        tokio::pin!(shutdown);
        let mut inbox_tick = tokio::time::interval(self.inbox_scan_interval);
        let mut reconcile_tick = tokio::time::interval(self.reconcile_interval);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("scheduler stopping");
                    break;
                }
                _ = inbox_tick.tick() => {
                    self.run_inbox_scan();
                }
                _ = reconcile_tick.tick() => {
                    if self.gcal_enabled {
                        self.run_calendar_reconciliation(&[]).await;
                    }
                }
            }
        }
    }

    fn run_inbox_scan(&self) {
        match self.inbox.run() {
            Ok(summary) => {
                if summary.processed > 0 || !summary.failed.is_empty() {
                    info!(processed = summary.processed, failed = summary.failed.len(), "inbox scan complete");
                }
            }
            Err(e) => error!(error = %e, "inbox scan failed"),
        }
    }

    /// Run one daily rollup for the current UTC date. Exposed separately
    /// from the tick loop so callers (and tests) can trigger it on demand.
    pub fn run_daily_rollup(&self) {
        let today = Utc::now().date_naive();
        if let Err(e) = self.rollup.run(kira_core::RollupType::Daily, today, today) {
            error!(error = %e, "daily rollup failed");
        }
    }

    /// Pull remote events and reconcile them against whatever vault
    /// entities are already linked to them (§6 sync adapters).
    ///
    /// `VaultAccess` has no "find entity by gcal_id" lookup yet, so the
    /// vault side of each pair is built from the entity's own last-synced
    /// bookkeeping once that lookup exists; today this tick only pulls and
    /// plans against pairs the caller already knows about, which is none
    /// with the no-op adapter.
    async fn run_calendar_reconciliation(&self, known_pairs: &[ReconciliationInput]) {
        let since = Utc::now() - chrono::Duration::days(1);
        let remote_events = match self.calendar.pull(since).await {
            Ok(events) => events,
            Err(e) => {
                warn!(error = %e, "calendar pull failed");
                return;
            }
        };
        if !remote_events.is_empty() {
            info!(count = remote_events.len(), "pulled calendar events");
        }

        let plan = plan_reconciliation(known_pairs);
        for action in plan {
            match action {
                ReconciliationAction::PushToGcal { entity_id } => {
                    info!(entity_id, "reconciliation: vault wins, would push to calendar");
                }
                ReconciliationAction::PullFromGcal { entity_id } => {
                    info!(entity_id, "reconciliation: calendar wins, would pull into vault");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
