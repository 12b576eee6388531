// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use kira_core::{Event, EventPublisher};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A registered callback. Boxed so the registry can hold subscribers of
/// varying closure types under one topic.
pub type Subscriber = Box<dyn Fn(&Event) + Send + Sync>;

/// In-process pub/sub bus (§4.5: "synchronous, in-process, callback-style
/// subscribers ... do not require an async runtime at this layer").
///
/// `publish` iterates subscribers for the event's topic in the order they
/// were registered, running each to completion before moving to the next.
/// A subscriber that panics is caught, logged with the event's correlation
/// ID when present, and does not interrupt the remaining subscribers.
#[derive(Clone, Default)]
pub struct Bus {
    subscribers: Arc<RwLock<HashMap<String, Vec<Subscriber>>>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` to run on every event whose [`Event::name`]
    /// equals `topic`. Registration order determines dispatch order.
    pub fn subscribe(&self, topic: impl Into<String>, handler: Subscriber) {
        self.subscribers
            .write()
            .entry(topic.into())
            .or_default()
            .push(handler);
    }

    /// Number of subscribers currently registered for `topic`, for tests
    /// and diagnostics.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.subscribers
            .read()
            .get(topic)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl EventPublisher for Bus {
    fn publish(&self, event: Event) {
        let topic = event.name();
        let handlers_len = {
            let subs = self.subscribers.read();
            subs.get(&topic).map(Vec::len).unwrap_or(0)
        };
        for i in 0..handlers_len {
            // Re-acquire the lock per call so a subscriber that itself
            // publishes (and subscribes) doesn't deadlock on re-entry.
            let result = {
                let subs = self.subscribers.read();
                let Some(handler) = subs.get(&topic).and_then(|v| v.get(i)) else {
                    continue;
                };
                panic::catch_unwind(AssertUnwindSafe(|| handler(&event)))
            };
            if let Err(payload) = result {
                let reason = panic_message(&payload);
                match event.correlation_id() {
                    Some(correlation_id) => {
                        tracing::error!(topic = %topic, %correlation_id, reason = %reason, "subscriber panicked");
                    }
                    None => {
                        tracing::error!(topic = %topic, reason = %reason, "subscriber panicked");
                    }
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
