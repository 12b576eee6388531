// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn sample_event(gcal_id: &str) -> CalendarEvent {
    CalendarEvent {
        gcal_id: gcal_id.to_string(),
        summary: "test".to_string(),
        start: Utc.timestamp_opt(1000, 0).unwrap(),
        end: Utc.timestamp_opt(2000, 0).unwrap(),
        location: None,
        attendees: Vec::new(),
        all_day: false,
        updated_at: Utc.timestamp_opt(1000, 0).unwrap(),
    }
}

#[tokio::test]
async fn pull_is_always_empty() {
    let adapter = NoOpCalendarSyncAdapter::new();
    let events = adapter.pull(Utc.timestamp_opt(0, 0).unwrap()).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn pushing_an_unsynced_event_mints_a_gcal_id() {
    let adapter = NoOpCalendarSyncAdapter::new();
    let id = adapter.push(&sample_event("vault-task-1")).await.unwrap();
    assert!(id.starts_with("gcal-"));
}

#[tokio::test]
async fn pushing_an_already_synced_event_keeps_its_id() {
    let adapter = NoOpCalendarSyncAdapter::new();
    let id = adapter.push(&sample_event("gcal-existing-123")).await.unwrap();
    assert_eq!(id, "gcal-existing-123");
}
