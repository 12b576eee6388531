// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Injectable monotonic UTC clock (§4.1).

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// A source of the current UTC instant.
///
/// Production code uses [`SystemClock`]; tests use [`FakeClock`] so that
/// `created_at`/`updated_at` assertions are deterministic.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real wall-clock time.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only advances when told to, for deterministic tests.
///
/// `now_utc()` always returns a value strictly greater than the previous
/// call when auto-advance is enabled (the default), which keeps invariant
/// I3 (`updated_at` strictly increases) true even when a test issues two
/// mutations back to back within the same wall-clock millisecond.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<DateTime<Utc>>>,
    auto_advance: std::time::Duration,
}

impl FakeClock {
    /// Start the clock at a fixed instant, auto-advancing by 1ms per read.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(start)),
            auto_advance: std::time::Duration::from_millis(1),
        }
    }

    /// Start the clock without auto-advance; every read returns the same
    /// instant until [`FakeClock::advance`] is called explicitly.
    pub fn frozen(start: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(start)),
            auto_advance: std::time::Duration::ZERO,
        }
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut guard = self.inner.lock();
        *guard += delta;
    }

    /// Set the clock to an exact instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.inner.lock() = instant;
    }
}

impl Clock for FakeClock {
    fn now_utc(&self) -> DateTime<Utc> {
        let mut guard = self.inner.lock();
        let now = *guard;
        if !self.auto_advance.is_zero() {
            *guard += chrono::Duration::from_std(self.auto_advance)
                .unwrap_or(chrono::Duration::milliseconds(1));
        }
        now
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
