// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execute phase (§4.12 step 3) plus the timeout/cancellation wrapper that
//! spans all four phases.

use kira_tools::{ToolRegistry, ToolResult, ToolStatus};
use serde::Serialize;
use std::time::Duration;

use crate::planner::PlannedStep;

#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    /// Per-phase timeout (§4.12 "Cancellation and timeouts", default 60s).
    pub phase_timeout: Duration,
    /// Whether to run the optional dry-run verification phase.
    pub dry_run_first: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { phase_timeout: Duration::from_secs(60), dry_run_first: true }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub tool: String,
    pub result: ToolResultSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolResultSummary {
    pub status: ToolStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ToolResult> for ToolResultSummary {
    fn from(r: &ToolResult) -> Self {
        Self { status: r.status, error: r.error.clone() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Ok,
    Partial,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub status: OverallStatus,
    pub steps: Vec<StepOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct Executor {
    registry: ToolRegistry,
    config: ExecutorConfig,
}

impl Executor {
    pub fn new(registry: ToolRegistry, config: ExecutorConfig) -> Self {
        Self { registry, config }
    }

    /// Re-invoke every step with `dry_run=true` and verify none produced a
    /// validation error (§4.12 step 2, optional).
    fn dry_run_check(&self, steps: &[PlannedStep]) -> Result<(), String> {
        for step in steps {
            let result = self.registry.invoke(&step.tool, &step.args, true);
            match result {
                Ok(r) if r.status == ToolStatus::Error => {
                    return Err(r.error.unwrap_or_else(|| "dry-run validation failed".to_string()));
                }
                Err(e) => return Err(e.to_string()),
                Ok(_) => {}
            }
        }
        Ok(())
    }

    /// Execute `steps` in order. The first `error` status halts further
    /// steps; a halted run with at least one successful step is reported
    /// as `partial` (§4.12 step 3).
    fn execute_steps(&self, steps: &[PlannedStep]) -> ExecutionResult {
        let mut outcomes = Vec::with_capacity(steps.len());
        let mut halted = false;

        for step in steps {
            let result = match self.registry.invoke(&step.tool, &step.args, step.dry_run) {
                Ok(r) => r,
                Err(e) => kira_tools::ToolResult::error(e.to_string()),
            };
            let is_error = result.status == ToolStatus::Error;
            outcomes.push(StepOutcome { tool: step.tool.clone(), result: (&result).into() });
            if is_error {
                halted = true;
                break;
            }
        }

        let status = if !halted {
            OverallStatus::Ok
        } else if outcomes.iter().any(|o| o.result.status == ToolStatus::Ok) {
            OverallStatus::Partial
        } else {
            OverallStatus::Error
        };

        ExecutionResult { status, steps: outcomes, error: None }
    }

    /// Run dry-run (if configured) then execute, each under the
    /// configured per-phase timeout (§4.12 "Cancellation and timeouts").
    pub async fn run(&self, steps: Vec<PlannedStep>) -> ExecutionResult {
        if self.config.dry_run_first {
            let dry_run = tokio::time::timeout(self.config.phase_timeout, async {
                self.dry_run_check(&steps)
            })
            .await;
            match dry_run {
                Ok(Err(reason)) => {
                    tracing::warn!(error = %reason, "dry-run phase failed");
                    return ExecutionResult { status: OverallStatus::Error, steps: Vec::new(), error: Some(reason) };
                }
                Err(_) => {
                    tracing::error!("dry-run phase timed out");
                    return ExecutionResult {
                        status: OverallStatus::Error,
                        steps: Vec::new(),
                        error: Some("timeout".to_string()),
                    };
                }
                Ok(Ok(())) => {}
            }
        }

        match tokio::time::timeout(self.config.phase_timeout, async { self.execute_steps(&steps) }).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("execute phase timed out");
                ExecutionResult { status: OverallStatus::Error, steps: Vec::new(), error: Some("timeout".to_string()) }
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
