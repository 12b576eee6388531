// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan phase (§4.12 step 1): build a system prompt listing available
//! tools, send it plus conversation memory and the user request, and
//! parse the LLM's `{ tool_calls, reasoning }` response.

use kira_tools::ToolRegistry;
use serde::Deserialize;
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct PlannedStep {
    pub tool: String,
    #[serde(default)]
    pub args: Json,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanningResult {
    pub tool_calls: Vec<PlannedStep>,
    #[serde(default)]
    pub reasoning: String,
}

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("planner response was not valid JSON: {0}")]
    Unparseable(String),
}

/// Build the system prompt's tool catalog section (name + description +
/// a JSON-schema-equivalent argument list), consumed by the planner's LLM
/// call (§4.12 "Plan").
pub fn describe_tools(registry: &ToolRegistry) -> String {
    let mut out = String::new();
    for (name, description, schema) in registry.catalog() {
        out.push_str(&format!("- {name}: {description}\n"));
        for arg in &schema.args {
            out.push_str(&format!(
                "    {}{}: {:?}\n",
                arg.name,
                if arg.required { "*" } else { "" },
                arg.kind
            ));
        }
    }
    out
}

/// Parse the raw LLM response into a [`PlanningResult`] (§4.12 "Require
/// the LLM to return a JSON object ... Reject non-JSON responses").
pub fn parse_plan(raw: &str) -> Result<PlanningResult, PlanningError> {
    serde_json::from_str(raw).map_err(|e| PlanningError::Unparseable(e.to_string()))
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
