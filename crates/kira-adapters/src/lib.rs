// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: desktop notifications, LLM providers
//! (§4.12), and calendar sync (§6).

pub mod calendar;
pub mod llm;
pub mod notify;

pub use calendar::{
    plan_reconciliation, resolve_conflict, CalendarEvent, CalendarSyncAdapter, CalendarSyncError,
    NoOpCalendarSyncAdapter, ReconciliationAction, ReconciliationInput, Resolution,
};
pub use llm::UnavailableLlmProvider;
pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use calendar::{FakeCalendarSyncAdapter, PushCall};
#[cfg(any(test, feature = "test-support"))]
pub use llm::FakeLlmProvider;
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
