// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kira_core::{Entity, EntityId, TaskStatus, TransitionInput};
use kira_storage::{EntityFilter, EntityPatch, VaultError};
use kira_tools::VaultAccess;
use std::sync::Mutex as StdMutex;

struct RecordingVault {
    created: StdMutex<Vec<(EntityType, String, String)>>,
}

impl RecordingVault {
    fn new() -> Self {
        Self { created: StdMutex::new(Vec::new()) }
    }
}

impl VaultAccess for RecordingVault {
    fn create_entity(
        &self,
        entity_type: EntityType,
        _metadata: FrontMatter,
        body: String,
        title: String,
    ) -> Result<Entity, VaultError> {
        self.created.lock().unwrap().push((entity_type, title.clone(), body.clone()));
        Ok(Entity {
            id: EntityId::new("note-test"),
            entity_type,
            title,
            tags: Default::default(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            metadata: FrontMatter::new(),
            body,
        })
    }

    fn update_entity(
        &self,
        _id: &EntityId,
        _patch: EntityPatch,
        _status_transition: Option<(TaskStatus, TransitionInput)>,
    ) -> Result<Entity, VaultError> {
        unimplemented!("not exercised by these tests")
    }

    fn delete_entity(&self, _id: &EntityId) -> Result<(), VaultError> {
        unimplemented!("not exercised by these tests")
    }

    fn get_entity(&self, _id: &EntityId) -> Result<Entity, VaultError> {
        unimplemented!("not exercised by these tests")
    }

    fn list_entities(&self, _entity_type: Option<EntityType>, _filter: &EntityFilter) -> Vec<Entity> {
        Vec::new()
    }
}

#[test]
fn file_dropped_uses_first_nonblank_line_as_title() {
    let vault = Arc::new(RecordingVault::new());
    let normalizer = InboxNormalizer::new(vault.clone());
    let event = Event::FileDropped {
        path: "/inbox/a.md".to_string(),
        content: "\n# Grocery list\n\n- milk\n- eggs\n".to_string(),
        trace_id: kira_core::TraceId::generate(),
    };

    normalizer.normalize(&event).unwrap();

    let created = vault.created.lock().unwrap();
    assert_eq!(created[0].1, "Grocery list");
}

#[test]
fn message_received_falls_back_to_source_when_blank() {
    let vault = Arc::new(RecordingVault::new());
    let normalizer = InboxNormalizer::new(vault.clone());
    let event = Event::MessageReceived {
        source: "telegram".to_string(),
        text: "   \n".to_string(),
        trace_id: kira_core::TraceId::generate(),
    };

    normalizer.normalize(&event).unwrap();

    let created = vault.created.lock().unwrap();
    assert_eq!(created[0].1, "inbox item from telegram");
}

#[test]
fn unsupported_event_is_rejected() {
    let vault = Arc::new(RecordingVault::new());
    let normalizer = InboxNormalizer::new(vault);
    let event = Event::Failed {
        origin: "inbox".to_string(),
        error: "boom".to_string(),
        context: Default::default(),
    };

    assert!(normalizer.normalize(&event).is_err());
}
