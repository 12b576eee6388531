// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op calendar sync adapter.

use super::{CalendarEvent, CalendarSyncAdapter, CalendarSyncError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Calendar adapter with no remote calendar configured.
///
/// `pull` always returns no events; `push` mints a placeholder `gcal-*`
/// ID without contacting anything, mirroring the Python adapter's
/// placeholder-ID behavior before the real API client is wired in.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpCalendarSyncAdapter;

impl NoOpCalendarSyncAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CalendarSyncAdapter for NoOpCalendarSyncAdapter {
    async fn pull(&self, _since: DateTime<Utc>) -> Result<Vec<CalendarEvent>, CalendarSyncError> {
        Ok(Vec::new())
    }

    async fn push(&self, event: &CalendarEvent) -> Result<String, CalendarSyncError> {
        if event.gcal_id.starts_with("vault-") {
            Ok(format!("gcal-{}", uuid::Uuid::new_v4().simple()))
        } else {
            Ok(event.gcal_id.clone())
        }
    }
}

#[cfg(test)]
#[path = "noop_tests.rs"]
mod tests;
