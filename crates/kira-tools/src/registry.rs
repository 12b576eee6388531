// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative tool contracts (§4.11): a JSON-schema-equivalent argument
//! spec, pre-execution validation, and a registry the agent planner
//! consults by name.

use serde_json::Value as Json;
use std::collections::BTreeMap;
use thiserror::Error;

/// The primitive argument types a tool can declare (§4.11 "types/enums/bounds").
#[derive(Debug, Clone, PartialEq)]
pub enum ArgType {
    String,
    Integer { min: Option<i64>, max: Option<i64> },
    Number,
    Bool,
    Enum(Vec<String>),
    StringArray,
}

/// One argument's contract.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: ArgType,
}

/// A tool's full argument contract.
#[derive(Debug, Clone, Default)]
pub struct ArgSchema {
    pub args: Vec<ArgSpec>,
}

impl ArgSchema {
    pub fn new(args: Vec<ArgSpec>) -> Self {
        Self { args }
    }

    /// Validate `input` against this schema, collecting every violation
    /// rather than stopping at the first (mirrors `kira_core::schema`).
    pub fn validate(&self, input: &Json) -> Result<(), ToolError> {
        let Json::Object(map) = input else {
            return Err(ToolError::Validation(vec!["arguments must be a JSON object".to_string()]));
        };

        let mut violations = Vec::new();
        let known: std::collections::HashSet<&str> = self.args.iter().map(|a| a.name).collect();

        for spec in &self.args {
            match map.get(spec.name) {
                None if spec.required => {
                    violations.push(format!("missing required argument `{}`", spec.name));
                }
                None => {}
                Some(value) => {
                    if let Some(reason) = check_type(&spec.kind, value) {
                        violations.push(format!("argument `{}`: {reason}", spec.name));
                    }
                }
            }
        }
        for key in map.keys() {
            if !known.contains(key.as_str()) {
                violations.push(format!("unknown argument `{key}`"));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ToolError::Validation(violations))
        }
    }
}

fn check_type(kind: &ArgType, value: &Json) -> Option<String> {
    match kind {
        ArgType::String => (!value.is_string()).then(|| "expected a string".to_string()),
        ArgType::Bool => (!value.is_boolean()).then(|| "expected a bool".to_string()),
        ArgType::Number => (!value.is_number()).then(|| "expected a number".to_string()),
        ArgType::StringArray => match value.as_array() {
            Some(items) if items.iter().all(Json::is_string) => None,
            _ => Some("expected an array of strings".to_string()),
        },
        ArgType::Integer { min, max } => {
            let Some(n) = value.as_i64() else {
                return Some("expected an integer".to_string());
            };
            if let Some(min) = min {
                if n < *min {
                    return Some(format!("must be >= {min}"));
                }
            }
            if let Some(max) = max {
                if n > *max {
                    return Some(format!("must be <= {max}"));
                }
            }
            None
        }
        ArgType::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.iter().any(|a| a == s) => None,
            _ => Some(format!("must be one of {allowed:?}")),
        },
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToolError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),
    #[error("vault error: {0}")]
    Vault(String),
    #[error("unknown tool `{0}`")]
    NotFound(String),
}

/// Execution outcome status (§4.11, §4.12 "partial success").
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Ok,
    Error,
}

/// What a tool call produced.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ToolResult {
    pub status: ToolStatus,
    pub output: Json,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn ok(output: Json) -> Self {
        Self { status: ToolStatus::Ok, output, error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: ToolStatus::Error, output: Json::Null, error: Some(message.into()) }
    }
}

/// A tool callable from the agent (§4.11).
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn args_schema(&self) -> ArgSchema;

    /// `dry_run=true` performs validation and simulation but never reaches
    /// the single-writer (§4.11).
    fn execute(&self, args: &Json, dry_run: bool) -> ToolResult;

    /// Validate, then execute. Tools should call this rather than
    /// `execute` directly so validation is never skipped.
    fn call(&self, args: &Json, dry_run: bool) -> ToolResult {
        if let Err(e) = self.args_schema().validate(args) {
            return ToolResult::error(e.to_string());
        }
        self.execute(args, dry_run)
    }
}

/// The set of tools the agent planner can see and invoke (§4.11, §4.12).
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn invoke(&self, name: &str, args: &Json, dry_run: bool) -> Result<ToolResult, ToolError> {
        match self.get(name) {
            Some(tool) => Ok(tool.call(args, dry_run)),
            None => Err(ToolError::NotFound(name.to_string())),
        }
    }

    /// `(name, description, args_schema)` for every registered tool, the
    /// shape the agent's system prompt lists (§4.12 "Plan").
    pub fn catalog(&self) -> Vec<(&'static str, &'static str, ArgSchema)> {
        self.tools
            .values()
            .map(|t| (t.name(), t.description(), t.args_schema()))
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
