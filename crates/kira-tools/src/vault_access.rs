// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Object-safe facade over [`kira_storage::VaultStore`] so tools can hold
//! `Arc<dyn VaultAccess>` without naming the store's clock/ID-gen
//! type parameters.

use kira_core::{Clock, Entity, EntityId, EntityType, FrontMatter, IdGen, TaskStatus};
use kira_core::TransitionInput;
use kira_storage::{EntityFilter, EntityPatch, VaultError, VaultStore};

pub trait VaultAccess: Send + Sync {
    fn create_entity(
        &self,
        entity_type: EntityType,
        metadata: FrontMatter,
        body: String,
        title: String,
    ) -> Result<Entity, VaultError>;

    fn update_entity(
        &self,
        id: &EntityId,
        patch: EntityPatch,
        status_transition: Option<(TaskStatus, TransitionInput)>,
    ) -> Result<Entity, VaultError>;

    fn delete_entity(&self, id: &EntityId) -> Result<(), VaultError>;

    fn get_entity(&self, id: &EntityId) -> Result<Entity, VaultError>;

    fn list_entities(&self, entity_type: Option<EntityType>, filter: &EntityFilter) -> Vec<Entity>;
}

impl<C, G> VaultAccess for VaultStore<C, G>
where
    C: Clock + Clone + 'static,
    G: IdGen + 'static,
{
    fn create_entity(
        &self,
        entity_type: EntityType,
        metadata: FrontMatter,
        body: String,
        title: String,
    ) -> Result<Entity, VaultError> {
        VaultStore::create_entity(self, entity_type, metadata, body, title)
    }

    fn update_entity(
        &self,
        id: &EntityId,
        patch: EntityPatch,
        status_transition: Option<(TaskStatus, TransitionInput)>,
    ) -> Result<Entity, VaultError> {
        VaultStore::update_entity(self, id, patch, status_transition)
    }

    fn delete_entity(&self, id: &EntityId) -> Result<(), VaultError> {
        VaultStore::delete_entity(self, id)
    }

    fn get_entity(&self, id: &EntityId) -> Result<Entity, VaultError> {
        VaultStore::get_entity(self, id)
    }

    fn list_entities(&self, entity_type: Option<EntityType>, filter: &EntityFilter) -> Vec<Entity> {
        VaultStore::list_entities(self, entity_type, filter)
    }
}
