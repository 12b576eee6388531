// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Synchronous, in-process event bus (§4.5).
//!
//! Subscribers are registered per topic and run to completion in
//! registration order before the next subscriber or publisher resumes.
//! There is no durability layer here; [`kira_storage::IdempotencyStore`]
//! and [`kira_storage::AuditLogger`] cover persistence for the pieces
//! that need it.

mod bus;

pub use bus::{Bus, Subscriber};
