// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Tool registry (§4.11), inbox pipeline (§4.9), and rollup pipeline
//! (§4.10). None of this writes to the vault directly except through the
//! [`VaultAccess`] seam, which the daemon wires to a real
//! [`kira_storage::VaultStore`].

mod inbox;
mod registry;
mod rollup;
mod standard_tools;
mod vault_access;

pub use inbox::{InboxError, InboxPipeline, InboxRunSummary, NormalizationSink};
pub use registry::{
    ArgSchema, ArgSpec, ArgType, Tool, ToolError, ToolRegistry, ToolResult, ToolStatus,
};
pub use rollup::{RollupAggregator, RollupContext, RollupError, RollupPipeline, RollupSection};
pub use standard_tools::{
    InboxNormalizeTool, RollupDailyTool, TaskCreateTool, TaskDeleteTool, TaskGetTool,
    TaskListTool, TaskUpdateTool,
};
pub use vault_access::VaultAccess;
