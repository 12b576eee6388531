// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake calendar sync adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CalendarEvent, CalendarSyncAdapter, CalendarSyncError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded push call.
#[derive(Debug, Clone)]
pub struct PushCall {
    pub event: CalendarEvent,
}

struct FakeCalendarState {
    pull_queue: Vec<CalendarEvent>,
    pushes: Vec<PushCall>,
}

/// Fake calendar sync adapter for testing.
///
/// `pull` always returns the full queued event set regardless of `since`
/// (callers filter by window upstream); `push` records every call and
/// echoes the event's own `gcal_id` back as the remote ID.
#[derive(Clone)]
pub struct FakeCalendarSyncAdapter {
    inner: Arc<Mutex<FakeCalendarState>>,
}

impl Default for FakeCalendarSyncAdapter {
    fn default() -> Self {
        Self { inner: Arc::new(Mutex::new(FakeCalendarState { pull_queue: Vec::new(), pushes: Vec::new() })) }
    }
}

impl FakeCalendarSyncAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue events to be returned by the next `pull` call.
    pub fn queue_pulled(&self, events: Vec<CalendarEvent>) {
        self.inner.lock().pull_queue = events;
    }

    /// All recorded push calls, in order.
    pub fn pushes(&self) -> Vec<PushCall> {
        self.inner.lock().pushes.clone()
    }
}

#[async_trait]
impl CalendarSyncAdapter for FakeCalendarSyncAdapter {
    async fn pull(&self, _since: DateTime<Utc>) -> Result<Vec<CalendarEvent>, CalendarSyncError> {
        Ok(self.inner.lock().pull_queue.clone())
    }

    async fn push(&self, event: &CalendarEvent) -> Result<String, CalendarSyncError> {
        let mut state = self.inner.lock();
        state.pushes.push(PushCall { event: event.clone() });
        Ok(event.gcal_id.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
