// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The standard tool set named in §4.11: `task_create`, `task_update`,
//! `task_delete`, `task_get`, `task_list`, `rollup_daily`, `inbox_normalize`.

use chrono::NaiveDate;
use kira_core::{EntityId, EntityType, FrontMatter, TaskStatus, TransitionInput};
use kira_storage::{EntityFilter, EntityPatch};
use serde_json::{json, Value as Json};
use std::sync::Arc;

use crate::inbox::InboxPipeline;
use crate::registry::{ArgSchema, ArgSpec, ArgType, Tool, ToolResult};
use crate::rollup::RollupPipeline;
use crate::vault_access::VaultAccess;

fn entity_to_json(e: &kira_core::Entity) -> Json {
    json!({
        "id": e.id.as_str(),
        "title": e.title,
        "tags": e.tags,
        "created_at": e.created_at.to_rfc3339(),
        "updated_at": e.updated_at.to_rfc3339(),
        "body": e.body,
    })
}

pub struct TaskCreateTool {
    vault: Arc<dyn VaultAccess>,
}

impl TaskCreateTool {
    pub fn new(vault: Arc<dyn VaultAccess>) -> Self {
        Self { vault }
    }
}

impl Tool for TaskCreateTool {
    fn name(&self) -> &'static str {
        "task_create"
    }

    fn description(&self) -> &'static str {
        "Create a new task entity"
    }

    fn args_schema(&self) -> ArgSchema {
        ArgSchema::new(vec![
            ArgSpec { name: "title", required: true, kind: ArgType::String },
            ArgSpec { name: "body", required: false, kind: ArgType::String },
            ArgSpec { name: "tags", required: false, kind: ArgType::StringArray },
        ])
    }

    fn execute(&self, args: &Json, dry_run: bool) -> ToolResult {
        let title = args["title"].as_str().unwrap_or_default().to_string();
        let body = args.get("body").and_then(Json::as_str).unwrap_or_default().to_string();
        if dry_run {
            return ToolResult::ok(json!({"simulated": true, "title": title}));
        }
        match self.vault.create_entity(EntityType::Task, FrontMatter::new(), body, title) {
            Ok(entity) => ToolResult::ok(entity_to_json(&entity)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

pub struct TaskUpdateTool {
    vault: Arc<dyn VaultAccess>,
}

impl TaskUpdateTool {
    pub fn new(vault: Arc<dyn VaultAccess>) -> Self {
        Self { vault }
    }
}

impl Tool for TaskUpdateTool {
    fn name(&self) -> &'static str {
        "task_update"
    }

    fn description(&self) -> &'static str {
        "Update a task's fields and/or transition its status"
    }

    fn args_schema(&self) -> ArgSchema {
        ArgSchema::new(vec![
            ArgSpec { name: "id", required: true, kind: ArgType::String },
            ArgSpec { name: "title", required: false, kind: ArgType::String },
            ArgSpec { name: "body", required: false, kind: ArgType::String },
            ArgSpec {
                name: "status",
                required: false,
                kind: ArgType::Enum(vec![
                    "todo".to_string(),
                    "doing".to_string(),
                    "review".to_string(),
                    "done".to_string(),
                    "blocked".to_string(),
                ]),
            },
            ArgSpec { name: "reason", required: false, kind: ArgType::String },
        ])
    }

    fn execute(&self, args: &Json, dry_run: bool) -> ToolResult {
        let id = EntityId::new(args["id"].as_str().unwrap_or_default());
        if dry_run {
            return ToolResult::ok(json!({"simulated": true, "id": id.as_str()}));
        }

        let mut patch = EntityPatch::default();
        if let Some(title) = args.get("title").and_then(Json::as_str) {
            patch.title = Some(title.to_string());
        }
        if let Some(body) = args.get("body").and_then(Json::as_str) {
            patch.body = Some(body.to_string());
        }
        let reason = args.get("reason").and_then(Json::as_str).map(str::to_string);

        let transition = args
            .get("status")
            .and_then(Json::as_str)
            .and_then(TaskStatus::parse)
            .map(|to| {
                (
                    to,
                    TransitionInput { reason: reason.clone(), ..Default::default() },
                )
            });

        match self.vault.update_entity(&id, patch, transition) {
            Ok(entity) => ToolResult::ok(entity_to_json(&entity)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

pub struct TaskDeleteTool {
    vault: Arc<dyn VaultAccess>,
}

impl TaskDeleteTool {
    pub fn new(vault: Arc<dyn VaultAccess>) -> Self {
        Self { vault }
    }
}

impl Tool for TaskDeleteTool {
    fn name(&self) -> &'static str {
        "task_delete"
    }

    fn description(&self) -> &'static str {
        "Delete a task by ID"
    }

    fn args_schema(&self) -> ArgSchema {
        ArgSchema::new(vec![ArgSpec { name: "id", required: true, kind: ArgType::String }])
    }

    fn execute(&self, args: &Json, dry_run: bool) -> ToolResult {
        let id = EntityId::new(args["id"].as_str().unwrap_or_default());
        if dry_run {
            return ToolResult::ok(json!({"simulated": true, "id": id.as_str()}));
        }
        match self.vault.delete_entity(&id) {
            Ok(()) => ToolResult::ok(json!({"deleted": id.as_str()})),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

pub struct TaskGetTool {
    vault: Arc<dyn VaultAccess>,
}

impl TaskGetTool {
    pub fn new(vault: Arc<dyn VaultAccess>) -> Self {
        Self { vault }
    }
}

impl Tool for TaskGetTool {
    fn name(&self) -> &'static str {
        "task_get"
    }

    fn description(&self) -> &'static str {
        "Fetch a single entity by ID"
    }

    fn args_schema(&self) -> ArgSchema {
        ArgSchema::new(vec![ArgSpec { name: "id", required: true, kind: ArgType::String }])
    }

    fn execute(&self, args: &Json, _dry_run: bool) -> ToolResult {
        let id = EntityId::new(args["id"].as_str().unwrap_or_default());
        match self.vault.get_entity(&id) {
            Ok(entity) => ToolResult::ok(entity_to_json(&entity)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

pub struct TaskListTool {
    vault: Arc<dyn VaultAccess>,
}

impl TaskListTool {
    pub fn new(vault: Arc<dyn VaultAccess>) -> Self {
        Self { vault }
    }
}

impl Tool for TaskListTool {
    fn name(&self) -> &'static str {
        "task_list"
    }

    fn description(&self) -> &'static str {
        "List tasks, optionally filtered by status or tag"
    }

    fn args_schema(&self) -> ArgSchema {
        ArgSchema::new(vec![
            ArgSpec {
                name: "status",
                required: false,
                kind: ArgType::Enum(vec![
                    "todo".to_string(),
                    "doing".to_string(),
                    "review".to_string(),
                    "done".to_string(),
                    "blocked".to_string(),
                ]),
            },
            ArgSpec { name: "tag", required: false, kind: ArgType::String },
        ])
    }

    fn execute(&self, args: &Json, _dry_run: bool) -> ToolResult {
        let filter = EntityFilter {
            tag: args.get("tag").and_then(Json::as_str).map(str::to_string),
            status: args.get("status").and_then(Json::as_str).and_then(TaskStatus::parse),
        };
        let entities = self.vault.list_entities(Some(EntityType::Task), &filter);
        ToolResult::ok(json!(entities.iter().map(entity_to_json).collect::<Vec<_>>()))
    }
}

pub struct RollupDailyTool {
    pipeline: Arc<RollupPipeline>,
}

impl RollupDailyTool {
    pub fn new(pipeline: Arc<RollupPipeline>) -> Self {
        Self { pipeline }
    }
}

impl Tool for RollupDailyTool {
    fn name(&self) -> &'static str {
        "rollup_daily"
    }

    fn description(&self) -> &'static str {
        "Compose a daily rollup entity from registered aggregators"
    }

    fn args_schema(&self) -> ArgSchema {
        ArgSchema::new(vec![ArgSpec { name: "date", required: true, kind: ArgType::String }])
    }

    fn execute(&self, args: &Json, dry_run: bool) -> ToolResult {
        let date_str = args["date"].as_str().unwrap_or_default();
        let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
            return ToolResult::error(format!("invalid date `{date_str}`"));
        };
        if dry_run {
            return ToolResult::ok(json!({"simulated": true, "date": date_str}));
        }
        match self.pipeline.run(kira_core::RollupType::Daily, date, date) {
            Ok(entity) => ToolResult::ok(entity_to_json(&entity)),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

pub struct InboxNormalizeTool {
    pipeline: Arc<InboxPipeline>,
}

impl InboxNormalizeTool {
    pub fn new(pipeline: Arc<InboxPipeline>) -> Self {
        Self { pipeline }
    }
}

impl Tool for InboxNormalizeTool {
    fn name(&self) -> &'static str {
        "inbox_normalize"
    }

    fn description(&self) -> &'static str {
        "Run one inbox-scan pass, normalizing any new items"
    }

    fn args_schema(&self) -> ArgSchema {
        ArgSchema::default()
    }

    fn execute(&self, _args: &Json, dry_run: bool) -> ToolResult {
        if dry_run {
            return ToolResult::ok(json!({"simulated": true}));
        }
        match self.pipeline.run() {
            Ok(summary) => ToolResult::ok(json!({
                "processed": summary.processed,
                "failed": summary.failed.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            })),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "standard_tools_tests.rs"]
mod tests;
