// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Graph validation over the vault's link index (§4.8): cycle detection on
//! `depends_on`, orphans, broken links, and near-duplicate titles.

mod cycles;
mod duplicates;
mod report;

pub use cycles::find_cycles;
pub use duplicates::{find_near_duplicates, DuplicatePair, DEFAULT_SIMILARITY_THRESHOLD};
pub use report::{validate, ValidationReport};
