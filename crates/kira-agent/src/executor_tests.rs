// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kira_tools::{ArgSchema, Tool};
use serde_json::{json, Value as Json};

struct AlwaysOkTool;
impl Tool for AlwaysOkTool {
    fn name(&self) -> &'static str {
        "always_ok"
    }
    fn description(&self) -> &'static str {
        "always succeeds"
    }
    fn args_schema(&self) -> ArgSchema {
        ArgSchema::default()
    }
    fn execute(&self, _args: &Json, _dry_run: bool) -> ToolResult {
        ToolResult::ok(json!({"done": true}))
    }
}

struct AlwaysFailTool;
impl Tool for AlwaysFailTool {
    fn name(&self) -> &'static str {
        "always_fail"
    }
    fn description(&self) -> &'static str {
        "always fails"
    }
    fn args_schema(&self) -> ArgSchema {
        ArgSchema::default()
    }
    fn execute(&self, _args: &Json, _dry_run: bool) -> ToolResult {
        ToolResult::error("boom")
    }
}

fn registry() -> ToolRegistry {
    let mut r = ToolRegistry::new();
    r.register(Box::new(AlwaysOkTool));
    r.register(Box::new(AlwaysFailTool));
    r
}

fn step(tool: &str) -> PlannedStep {
    PlannedStep { tool: tool.to_string(), args: json!({}), dry_run: false }
}

#[tokio::test]
async fn all_steps_succeeding_reports_ok() {
    let executor = Executor::new(registry(), ExecutorConfig { dry_run_first: false, ..Default::default() });
    let result = executor.run(vec![step("always_ok"), step("always_ok")]).await;
    assert_eq!(result.status, OverallStatus::Ok);
    assert_eq!(result.steps.len(), 2);
}

#[tokio::test]
async fn a_failing_step_halts_remaining_steps() {
    let executor = Executor::new(registry(), ExecutorConfig { dry_run_first: false, ..Default::default() });
    let result = executor.run(vec![step("always_fail"), step("always_ok")]).await;
    assert_eq!(result.status, OverallStatus::Error);
    assert_eq!(result.steps.len(), 1);
}

#[tokio::test]
async fn partial_success_is_reported_when_some_steps_already_ran() {
    let executor = Executor::new(registry(), ExecutorConfig { dry_run_first: false, ..Default::default() });
    let result = executor.run(vec![step("always_ok"), step("always_fail"), step("always_ok")]).await;
    assert_eq!(result.status, OverallStatus::Partial);
    assert_eq!(result.steps.len(), 2);
}

#[tokio::test]
async fn dry_run_phase_blocks_execution_on_validation_error() {
    let executor = Executor::new(registry(), ExecutorConfig { dry_run_first: true, ..Default::default() });
    let mut bad_step = step("always_fail");
    bad_step.dry_run = true;
    let result = executor.run(vec![bad_step]).await;
    assert_eq!(result.status, OverallStatus::Error);
    assert!(result.steps.is_empty());
}

#[tokio::test]
async fn unknown_tool_reports_an_error_step() {
    let executor = Executor::new(registry(), ExecutorConfig { dry_run_first: false, ..Default::default() });
    let result = executor.run(vec![step("nonexistent")]).await;
    assert_eq!(result.status, OverallStatus::Error);
}
