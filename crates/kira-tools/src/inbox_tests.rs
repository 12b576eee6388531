// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;

struct RecordingPublisher {
    events: StdMutex<Vec<Event>>,
}
impl RecordingPublisher {
    fn new() -> Self {
        Self { events: StdMutex::new(Vec::new()) }
    }
}
impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

struct AlwaysOk;
impl NormalizationSink for AlwaysOk {
    fn normalize(&self, _event: &Event) -> Result<(), String> {
        Ok(())
    }
}

struct FailNTimes(AtomicUsize, usize);
impl NormalizationSink for FailNTimes {
    fn normalize(&self, _event: &Event) -> Result<(), String> {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        if n < self.1 {
            Err("transient failure".to_string())
        } else {
            Ok(())
        }
    }
}

struct AlwaysFail;
impl NormalizationSink for AlwaysFail {
    fn normalize(&self, _event: &Event) -> Result<(), String> {
        Err("permanent failure".to_string())
    }
}

#[test]
fn markdown_items_publish_file_dropped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.md"), "hello").unwrap();
    let publisher = Arc::new(RecordingPublisher::new());
    let pipeline = InboxPipeline::new(dir.path(), publisher.clone(), Arc::new(AlwaysOk), 10, 2);

    let summary = pipeline.run().unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(publisher.events.lock().unwrap()[0].name(), "file.dropped");
}

#[test]
fn text_items_publish_message_received() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let publisher = Arc::new(RecordingPublisher::new());
    let pipeline = InboxPipeline::new(dir.path(), publisher.clone(), Arc::new(AlwaysOk), 10, 2);

    pipeline.run().unwrap();
    assert_eq!(publisher.events.lock().unwrap()[0].name(), "message.received");
}

#[test]
fn transient_failures_are_retried_until_success() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let publisher = Arc::new(RecordingPublisher::new());
    let sink = Arc::new(FailNTimes(AtomicUsize::new(0), 2));
    let pipeline = InboxPipeline::new(dir.path(), publisher, sink, 10, 3);

    let summary = pipeline.run().unwrap();
    assert_eq!(summary.processed, 1);
    assert!(summary.failed.is_empty());
}

#[test]
fn exhausting_retries_emits_failed_event() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let publisher = Arc::new(RecordingPublisher::new());
    let pipeline = InboxPipeline::new(dir.path(), publisher.clone(), Arc::new(AlwaysFail), 10, 1);

    let summary = pipeline.run().unwrap();
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(publisher.events.lock().unwrap()[0].name(), "inbox.failed");
}

#[test]
fn max_items_per_run_caps_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5 {
        fs::write(dir.path().join(format!("{i}.txt")), "x").unwrap();
    }
    let publisher = Arc::new(RecordingPublisher::new());
    let pipeline = InboxPipeline::new(dir.path(), publisher, Arc::new(AlwaysOk), 2, 0);

    let summary = pipeline.run().unwrap();
    assert_eq!(summary.processed, 2);
}

#[test]
fn missing_inbox_directory_yields_empty_summary() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let publisher = Arc::new(RecordingPublisher::new());
    let pipeline = InboxPipeline::new(missing, publisher, Arc::new(AlwaysOk), 10, 0);

    let summary = pipeline.run().unwrap();
    assert_eq!(summary.processed, 0);
}
