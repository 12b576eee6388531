// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn trace() -> Trace {
    Trace { trace_id: "t-1".to_string(), verbose: false }
}

#[test]
fn create_then_get_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let code = handle(
        TaskCommand::Create {
            title: "write the quarterly report".to_string(),
            priority: "high".to_string(),
            assignee: None,
            due_ts: None,
            tags: vec!["work".to_string()],
            body: String::new(),
        },
        dir.path(),
        false,
        OutputFormat::Json,
        &trace(),
    );
    assert_eq!(code, 0);

    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    let entities = store.list_entities(Some(EntityType::Task), &EntityFilter::default());
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].title, "write the quarterly report");
    assert_eq!(entities[0].tags, BTreeSet::from(["work".to_string()]));
}

#[test]
fn create_rejects_unknown_priority() {
    let dir = tempfile::tempdir().unwrap();
    let code = handle(
        TaskCommand::Create {
            title: "t".to_string(),
            priority: "urgent".to_string(),
            assignee: None,
            due_ts: None,
            tags: vec![],
            body: String::new(),
        },
        dir.path(),
        false,
        OutputFormat::Json,
        &trace(),
    );
    assert_eq!(code, ExitError::VALIDATION);
}

#[test]
fn create_dry_run_does_not_touch_the_vault() {
    let dir = tempfile::tempdir().unwrap();
    let code = handle(
        TaskCommand::Create {
            title: "t".to_string(),
            priority: "medium".to_string(),
            assignee: None,
            due_ts: None,
            tags: vec![],
            body: String::new(),
        },
        dir.path(),
        true,
        OutputFormat::Json,
        &trace(),
    );
    assert_eq!(code, 0);

    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    assert!(store.list_entities(Some(EntityType::Task), &EntityFilter::default()).is_empty());
}

#[test]
fn update_transitions_status_through_the_fsm() {
    let dir = tempfile::tempdir().unwrap();
    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    let mut metadata = FrontMatter::new();
    metadata.insert("status".to_string(), "todo".into());
    metadata.insert("priority".to_string(), "medium".into());
    let entity = store.create_entity(EntityType::Task, metadata, String::new(), "a task").unwrap();
    drop(store);

    let code = handle(
        TaskCommand::Update {
            id: entity.id.as_str().to_string(),
            title: None,
            status: Some("doing".to_string()),
            reason: None,
            assignee: Some("ada".to_string()),
            start_ts: Some("2026-07-28T00:00:00Z".to_string()),
        },
        dir.path(),
        false,
        OutputFormat::Json,
        &trace(),
    );
    assert_eq!(code, 0);

    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    let updated = store.get_entity(&entity.id).unwrap();
    assert_eq!(updated.metadata.get("status").and_then(kira_core::Value::as_str), Some("doing"));
}

#[test]
fn update_rejects_a_guard_failing_transition() {
    let dir = tempfile::tempdir().unwrap();
    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    let mut metadata = FrontMatter::new();
    metadata.insert("status".to_string(), "todo".into());
    metadata.insert("priority".to_string(), "medium".into());
    let entity = store.create_entity(EntityType::Task, metadata, String::new(), "a task").unwrap();
    drop(store);

    // todo -> doing requires an assignee (G1); omitting it should fail the guard.
    let code = handle(
        TaskCommand::Update {
            id: entity.id.as_str().to_string(),
            title: None,
            status: Some("doing".to_string()),
            reason: None,
            assignee: None,
            start_ts: None,
        },
        dir.path(),
        false,
        OutputFormat::Json,
        &trace(),
    );
    assert_eq!(code, ExitError::FSM_GUARD);
}

#[test]
fn delete_removes_the_entity() {
    let dir = tempfile::tempdir().unwrap();
    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    let mut metadata = FrontMatter::new();
    metadata.insert("status".to_string(), "todo".into());
    metadata.insert("priority".to_string(), "medium".into());
    let entity = store.create_entity(EntityType::Task, metadata, String::new(), "a task").unwrap();
    drop(store);

    let code = handle(
        TaskCommand::Delete { id: entity.id.as_str().to_string() },
        dir.path(),
        false,
        OutputFormat::Json,
        &trace(),
    );
    assert_eq!(code, 0);

    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    assert!(store.get_entity(&entity.id).is_err());
}

#[test]
fn delete_dry_run_keeps_the_entity() {
    let dir = tempfile::tempdir().unwrap();
    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    let mut metadata = FrontMatter::new();
    metadata.insert("status".to_string(), "todo".into());
    metadata.insert("priority".to_string(), "medium".into());
    let entity = store.create_entity(EntityType::Task, metadata, String::new(), "a task").unwrap();
    drop(store);

    let code = handle(
        TaskCommand::Delete { id: entity.id.as_str().to_string() },
        dir.path(),
        true,
        OutputFormat::Json,
        &trace(),
    );
    assert_eq!(code, 0);

    let store = VaultStore::open(dir.path(), SystemClock, UuidIdGen, None).unwrap();
    assert!(store.get_entity(&entity.id).is_ok());
}

#[test]
fn get_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let code = handle(TaskCommand::Get { id: "does-not-exist".to_string() }, dir.path(), false, OutputFormat::Json, &trace());
    assert_eq!(code, ExitError::VALIDATION);
}
