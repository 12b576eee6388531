// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};
use kira_core::{FakeClock, SequentialIdGen};
use kira_storage::VaultStore;

fn vault(dir: &tempfile::TempDir) -> Arc<dyn VaultAccess> {
    let clock = FakeClock::frozen(Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap());
    Arc::new(VaultStore::open(dir.path(), clock, SequentialIdGen::new(), None).unwrap())
}

#[test]
fn task_create_writes_an_entity() {
    let dir = tempfile::tempdir().unwrap();
    let tool = TaskCreateTool::new(vault(&dir));
    let result = tool.call(&json!({"title": "Write tests"}), false);
    assert_eq!(result.status, crate::ToolStatus::Ok);
    assert_eq!(result.output["title"], "Write tests");
}

#[test]
fn task_create_dry_run_does_not_touch_the_vault() {
    let dir = tempfile::tempdir().unwrap();
    let v = vault(&dir);
    let tool = TaskCreateTool::new(v.clone());
    tool.call(&json!({"title": "Simulated"}), true);
    let listed = v.list_entities(Some(EntityType::Task), &EntityFilter::default());
    assert!(listed.is_empty());
}

#[test]
fn task_get_and_delete_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let v = vault(&dir);
    let created = v
        .create_entity(EntityType::Task, FrontMatter::new(), String::new(), "X".to_string())
        .unwrap();

    let get_tool = TaskGetTool::new(v.clone());
    let got = get_tool.call(&json!({"id": created.id.as_str()}), false);
    assert_eq!(got.output["id"], created.id.as_str());

    let delete_tool = TaskDeleteTool::new(v.clone());
    let deleted = delete_tool.call(&json!({"id": created.id.as_str()}), false);
    assert_eq!(deleted.status, crate::ToolStatus::Ok);
    assert!(v.get_entity(&created.id).is_err());
}

#[test]
fn task_update_rejects_invalid_status_enum_before_touching_vault() {
    let dir = tempfile::tempdir().unwrap();
    let tool = TaskUpdateTool::new(vault(&dir));
    let result = tool.call(&json!({"id": "task-x", "status": "bogus"}), false);
    assert_eq!(result.status, crate::ToolStatus::Error);
}

#[test]
fn task_list_filters_by_status() {
    let dir = tempfile::tempdir().unwrap();
    let v = vault(&dir);
    v.create_entity(EntityType::Task, FrontMatter::new(), String::new(), "A".to_string())
        .unwrap();

    let tool = TaskListTool::new(v);
    let result = tool.call(&json!({}), false);
    assert_eq!(result.output.as_array().unwrap().len(), 1);
}
