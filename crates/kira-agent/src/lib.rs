// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The agent planner/executor (§4.12, the fourth hard core), session
//! memory, keyword-overlap RAG, and the LLM provider router.
//!
//! Grounded on `original_source/src/kira/agent/{memory,rag,executor}.py`:
//! the bounded ring-buffer conversation memory, the router-by-task-type
//! shape, and the plan/dry-run/execute/verify phase split are all carried
//! over; only the async Python plumbing is replaced with synchronous,
//! trait-seamed Rust.

mod executor;
mod llm;
mod memory;
mod planner;
mod rag;
mod router;

pub use executor::{ExecutionResult, Executor, ExecutorConfig, OverallStatus, StepOutcome, ToolResultSummary};
pub use llm::{LlmError, LlmProvider, LlmTaskType, Message, Role};
pub use memory::{ConversationMemory, ConversationTurn};
pub use planner::{describe_tools, parse_plan, PlannedStep, PlanningError, PlanningResult};
pub use rag::{RagContextStore, RagDocument};
pub use router::LlmRouter;
