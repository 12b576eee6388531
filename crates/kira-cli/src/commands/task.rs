// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `kira task create|update|list|get|delete` — direct vault CRUD (spec §6).

use std::collections::BTreeSet;

use clap::{Args, Subcommand};
use kira_core::{
    EntityId, EntityType, FrontMatter, Priority, SystemClock, TaskStatus, TransitionInput,
    UuidIdGen,
};
use kira_storage::{EntityFilter, EntityPatch, VaultStore};

use crate::envelope::{self, Trace};
use crate::exit_error::{code_for_vault_error, ExitError};
use crate::output::OutputFormat;
use crate::table::{Column, Table};

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommand,
}

#[derive(Subcommand)]
pub enum TaskCommand {
    /// Create a new task
    Create {
        title: String,
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        due_ts: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long, default_value = "")]
        body: String,
    },
    /// Update an existing task
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        start_ts: Option<String>,
    },
    /// List tasks
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "tag")]
        tag: Option<String>,
    },
    /// Show one task
    Get { id: String },
    /// Delete a task
    Delete { id: String },
}

#[allow(clippy::too_many_arguments)]
pub fn handle(
    command: TaskCommand,
    vault_path: &std::path::Path,
    dry_run: bool,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    let store = match VaultStore::open(vault_path, SystemClock, UuidIdGen, None) {
        Ok(s) => s,
        Err(e) => return envelope::error(format, trace, &e.to_string(), ExitError::IO_OR_LOCK),
    };

    match command {
        TaskCommand::Create { title, priority, assignee, due_ts, tags, body } => {
            create(&store, title, priority, assignee, due_ts, tags, body, dry_run, format, trace)
        }
        TaskCommand::Update { id, title, status, reason, assignee, start_ts } => {
            update(&store, id, title, status, reason, assignee, start_ts, dry_run, format, trace)
        }
        TaskCommand::List { status, tag } => list(&store, status, tag, format, trace),
        TaskCommand::Get { id } => get(&store, id, format, trace),
        TaskCommand::Delete { id } => delete(&store, id, dry_run, format, trace),
    }
}

#[allow(clippy::too_many_arguments)]
fn create(
    store: &VaultStore<SystemClock, UuidIdGen>,
    title: String,
    priority: String,
    assignee: Option<String>,
    due_ts: Option<String>,
    tags: Vec<String>,
    body: String,
    dry_run: bool,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    let priority = match Priority::parse(&priority) {
        Some(p) => p,
        None => return envelope::error(format, trace, &format!("invalid priority: {priority}"), ExitError::VALIDATION),
    };

    if dry_run {
        envelope::success(format, trace, serde_json::json!({"simulated": true, "title": title}), || {
            println!("would create task \"{title}\"");
        });
        return 0;
    }

    let mut metadata = FrontMatter::new();
    metadata.insert("status".to_string(), TaskStatus::Todo.as_str().into());
    metadata.insert("priority".to_string(), priority_str(priority).into());
    if let Some(assignee) = assignee {
        metadata.insert("assignee".to_string(), assignee.into());
    }
    if let Some(due_ts) = due_ts {
        metadata.insert("due_ts".to_string(), due_ts.into());
    }

    match store.create_entity(EntityType::Task, metadata, body, title) {
        Ok(entity) => {
            let tags: BTreeSet<String> = tags.into_iter().collect();
            let entity = if tags.is_empty() {
                entity
            } else {
                match store.update_entity(&entity.id, EntityPatch { tags: Some(tags), ..Default::default() }, None) {
                    Ok(e) => e,
                    Err(e) => return envelope::error(format, trace, &e.to_string(), code_for_vault_error(&e)),
                }
            };
            envelope::success(format, trace, entity_json(&entity), || println!("created {}", entity.id.as_str()));
            0
        }
        Err(e) => envelope::error(format, trace, &e.to_string(), code_for_vault_error(&e)),
    }
}

#[allow(clippy::too_many_arguments)]
fn update(
    store: &VaultStore<SystemClock, UuidIdGen>,
    id: String,
    title: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    assignee: Option<String>,
    start_ts: Option<String>,
    dry_run: bool,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    let id = EntityId::new(id);

    if dry_run {
        envelope::success(format, trace, serde_json::json!({"simulated": true, "id": id.as_str()}), || {
            println!("would update {}", id.as_str());
        });
        return 0;
    }

    let mut patch = EntityPatch { title, ..Default::default() };
    if let Some(assignee) = &assignee {
        patch.metadata.insert("assignee".to_string(), assignee.clone().into());
    }
    if let Some(start_ts) = &start_ts {
        patch.metadata.insert("start_ts".to_string(), start_ts.clone().into());
    }

    let status_transition = match status {
        Some(status) => {
            let to_state = match TaskStatus::parse(&status) {
                Some(s) => s,
                None => return envelope::error(format, trace, &format!("invalid status: {status}"), ExitError::VALIDATION),
            };
            let input = TransitionInput {
                reason: reason.clone(),
                has_assignee: assignee.is_some(),
                has_start_ts: start_ts.is_some(),
                has_reopen_reason: reason.is_some(),
                has_estimate: false,
                has_done_ts: false,
                force: false,
            };
            Some((to_state, input))
        }
        None => None,
    };

    match store.update_entity(&id, patch, status_transition) {
        Ok(entity) => {
            envelope::success(format, trace, entity_json(&entity), || println!("updated {}", entity.id.as_str()));
            0
        }
        Err(e) => envelope::error(format, trace, &e.to_string(), code_for_vault_error(&e)),
    }
}

fn list(
    store: &VaultStore<SystemClock, UuidIdGen>,
    status: Option<String>,
    tag: Option<String>,
    format: OutputFormat,
    trace: &Trace,
) -> i32 {
    let status = match status.as_deref().map(TaskStatus::parse) {
        Some(None) => return envelope::error(format, trace, "invalid --status value", ExitError::VALIDATION),
        Some(Some(s)) => Some(s),
        None => None,
    };
    let filter = EntityFilter { tag, status };
    let entities = store.list_entities(Some(EntityType::Task), &filter);

    let data = serde_json::Value::Array(entities.iter().map(entity_json).collect());
    envelope::success(format, trace, data, || {
        let mut table = Table::new(vec![
            Column::left("ID"),
            Column::status("STATUS"),
            Column::left("TITLE").with_max(60),
        ]);
        for entity in &entities {
            let status = entity.metadata.get("status").and_then(kira_core::Value::as_str).unwrap_or("");
            table.row(vec![entity.id.as_str().to_string(), status.to_string(), entity.title.clone()]);
        }
        table.render(&mut std::io::stdout());
    });
    0
}

fn get(store: &VaultStore<SystemClock, UuidIdGen>, id: String, format: OutputFormat, trace: &Trace) -> i32 {
    let id = EntityId::new(id);
    match store.get_entity(&id) {
        Ok(entity) => {
            envelope::success(format, trace, entity_json(&entity), || {
                println!("{}  [{}]", entity.title, entity.id.as_str());
                println!("{}", entity.body);
            });
            0
        }
        Err(e) => envelope::error(format, trace, &e.to_string(), code_for_vault_error(&e)),
    }
}

fn delete(store: &VaultStore<SystemClock, UuidIdGen>, id: String, dry_run: bool, format: OutputFormat, trace: &Trace) -> i32 {
    let id = EntityId::new(id);
    if dry_run {
        envelope::success(format, trace, serde_json::json!({"simulated": true, "id": id.as_str()}), || {
            println!("would delete {}", id.as_str());
        });
        return 0;
    }
    match store.delete_entity(&id) {
        Ok(()) => {
            envelope::success(format, trace, serde_json::json!({"deleted": id.as_str()}), || {
                println!("deleted {}", id.as_str());
            });
            0
        }
        Err(e) => envelope::error(format, trace, &e.to_string(), code_for_vault_error(&e)),
    }
}

fn priority_str(p: Priority) -> &'static str {
    match p {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn entity_json(entity: &kira_core::Entity) -> serde_json::Value {
    serde_json::json!({
        "id": entity.id.as_str(),
        "title": entity.title,
        "tags": entity.tags,
        "created_at": entity.created_at.to_rfc3339(),
        "updated_at": entity.updated_at.to_rfc3339(),
        "status": entity.metadata.get("status").and_then(kira_core::Value::as_str),
        "priority": entity.metadata.get("priority").and_then(kira_core::Value::as_str),
    })
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
