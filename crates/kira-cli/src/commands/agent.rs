// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kira agent run` — drives the plan/dry-run/execute pipeline (§4.12)
//! against the real vault.
//!
//! Grounded on `original_source/src/kira/cli/kira_agent.py` (a `kira
//! agent` command group) and `original_source/src/kira/agent/message_handler.py`
//! (the chat-adapter-independent plan → execute → format-response shape).
//! No remote LLM transport is configured here: that HTTP client is an
//! external collaborator out of scope per §1, so the router's only
//! provider is [`kira_adapters::UnavailableLlmProvider`] — the plan phase
//! fails with a clear "no provider configured" error rather than a
//! silently empty chain.
//!
//! `--plan-json` lets a caller hand the planner's expected `{tool_calls,
//! reasoning}` document straight to the dry-run/execute phases, bypassing
//! the router entirely. Without a real provider wired in, this is the
//! only way to drive `kira_agent::parse_plan`/`Executor::run` against a
//! live vault outside of the crates' own unit tests.

use std::sync::Arc;

use clap::{Args, Subcommand};
use kira_agent::{describe_tools, Executor, ExecutorConfig, LlmRouter, LlmTaskType, Message};
use kira_adapters::UnavailableLlmProvider;
use kira_core::{SessionId, SystemClock, UuidIdGen};
use kira_storage::VaultStore;
use kira_tools::{
    TaskCreateTool, TaskDeleteTool, TaskGetTool, TaskListTool, TaskUpdateTool, ToolRegistry,
    VaultAccess,
};

use crate::envelope::{self, Trace};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand)]
pub enum AgentCommand {
    /// Plan and execute a natural-language request against the vault
    Run {
        prompt: String,
        /// Groups this request with prior turns in conversation memory
        #[arg(long, default_value = "cli")]
        session: String,
        /// Skip the LLM planner and execute this pre-formed plan instead
        /// (a JSON object matching `{"tool_calls": [...], "reasoning": ""}`)
        #[arg(long)]
        plan_json: Option<String>,
    },
}

pub fn handle(
    args: AgentArgs,
    vault_path: &std::path::Path,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    match args.command {
        AgentCommand::Run { prompt, session, plan_json } => {
            run(prompt, session, plan_json, vault_path, format, trace)
        }
    }
}

fn build_registry(vault: Arc<dyn VaultAccess>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(TaskCreateTool::new(vault.clone())));
    registry.register(Box::new(TaskUpdateTool::new(vault.clone())));
    registry.register(Box::new(TaskDeleteTool::new(vault.clone())));
    registry.register(Box::new(TaskGetTool::new(vault.clone())));
    registry.register(Box::new(TaskListTool::new(vault)));
    registry
}

fn run(
    prompt: String,
    session: String,
    plan_json: Option<String>,
    vault_path: &std::path::Path,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    let store = match VaultStore::open(vault_path, SystemClock, UuidIdGen, None) {
        Ok(s) => s,
        Err(e) => return envelope::error(format, trace, &e.to_string(), ExitError::IO_OR_LOCK),
    };
    let vault: Arc<dyn VaultAccess> = Arc::new(store);
    let registry = build_registry(vault);

    // Session memory (last-k-exchanges context) is consulted by the real
    // message-handler path (daemon adapters); a one-shot CLI run has no
    // prior turns to load, so the id is only threaded through for the
    // audit trail.
    let _session_id = SessionId::new(session);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => return envelope::error(format, trace, &e.to_string(), ExitError::CONFIG),
    };

    let raw = match plan_json {
        Some(raw) => raw,
        None => {
            let router = LlmRouter::new().with_local_fallback(Arc::new(UnavailableLlmProvider::new()));
            let system_prompt = describe_tools(&registry);
            let messages = vec![Message::system(system_prompt), Message::user(prompt)];
            match rt.block_on(router.complete(LlmTaskType::Planning, &messages)) {
                Ok(raw) => raw,
                Err(e) => return envelope::error(format, trace, &e.to_string(), ExitError::CONFIG),
            }
        }
    };
    let plan = match kira_agent::parse_plan(&raw) {
        Ok(plan) => plan,
        Err(e) => return envelope::error(format, trace, &e.to_string(), ExitError::VALIDATION),
    };

    let executor = Executor::new(registry, ExecutorConfig::default());
    let result = rt.block_on(executor.run(plan.tool_calls));

    // Partial completion still surfaces as a non-zero exit: a caller
    // scripting this command needs to notice a halted run the same way
    // `kira validate` surfaces any issue as non-zero, not just total failure.
    let has_error = result.error.is_some()
        || !matches!(result.status, kira_agent::OverallStatus::Ok);
    let data = serde_json::to_value(&result).unwrap_or(serde_json::Value::Null);
    envelope::success(format, trace, data, || {
        println!("status: {:?}", result.status);
        for step in &result.steps {
            println!("  {}: {:?}", step.tool, step.result.status);
        }
    });

    if has_error { ExitError::VALIDATION } else { 0 }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
