// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single-writer vault store (§4.4 — "the hard core").
//!
//! Atomic write grounded on the teacher's snapshot temp-file/fsync/rename
//! idiom; the process-wide write lock replaces the teacher's `parking_lot`
//! WAL mutex with a plain `Mutex<()>` guarding the rename step.

use crate::links::{extract_wikilinks, Direction, Link, LinkIndex, LinkType};
use kira_core::{
    parse_document, schema, serialize_document, task_fsm, transition, CodecError, Document,
    Entity, EntityId, EntityType, EventPublisher, FrontMatter, IdMinter, TaskStatus,
    TransitionInput, Value,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Validation(#[from] schema::ValidationError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    FsmGuard(#[from] task_fsm::FsmGuardError),
    #[error("entity not found: {0}")]
    NotFound(EntityId),
    #[error("duplicate id: {0}")]
    DuplicateId(EntityId),
    #[error("self-links are not permitted: {0}")]
    SelfLink(EntityId),
    #[error("vault is locked by another writer")]
    Locked,
    #[error("commit failed, temp file preserved at {path}: {source}")]
    CommitFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A typed patch applied via `update_entity`. Any field left `None` is
/// unchanged; `metadata` merges into the existing map (absent keys keep
/// their old value, `Value::Null` deletes the key).
#[derive(Debug, Clone, Default)]
pub struct EntityPatch {
    pub title: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub body: Option<String>,
    pub metadata: FrontMatter,
}

/// Optional filter for `list_entities`.
#[derive(Debug, Clone, Default)]
pub struct EntityFilter {
    pub tag: Option<String>,
    pub status: Option<TaskStatus>,
}

struct Inner {
    entities: BTreeMap<EntityId, Entity>,
    links: LinkIndex,
}

/// The vault store: the only component permitted to write to the vault
/// filesystem (§4.4 "Contract").
pub struct VaultStore<C, G> {
    root: PathBuf,
    write_lock: Mutex<()>,
    inner: RwLock<Inner>,
    clock: C,
    minter: IdMinter<C, G>,
    hooks: task_fsm::HookRegistry,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl<C: kira_core::Clock + Clone, G: kira_core::IdGen> VaultStore<C, G> {
    /// Open a vault rooted at `root`, hydrating the link index by parsing
    /// every entity file on disk (§4.4 "Link index ... hydrated on startup").
    pub fn open(
        root: impl Into<PathBuf>,
        clock: C,
        id_gen: G,
        publisher: Option<Arc<dyn EventPublisher>>,
    ) -> Result<Self, VaultError> {
        let root = root.into();
        for entity_type in [
            EntityType::Task,
            EntityType::Note,
            EntityType::Event,
            EntityType::Project,
            EntityType::Rollup,
        ] {
            fs::create_dir_all(root.join(entity_type.folder()))?;
        }

        let mut entities = BTreeMap::new();
        for entity_type in [
            EntityType::Task,
            EntityType::Note,
            EntityType::Event,
            EntityType::Project,
            EntityType::Rollup,
        ] {
            let dir = root.join(entity_type.folder());
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("md") {
                    continue;
                }
                let bytes = fs::read(&path)?;
                let doc = parse_document(&bytes)?;
                let entity = document_to_entity(&doc, entity_type)?;
                entities.insert(entity.id.clone(), entity);
            }
        }

        let mut links = LinkIndex::new();
        for id in entities.keys() {
            links.register_entity(id.clone());
        }
        for entity in entities.values() {
            links.set_outgoing(&entity.id, derive_links(entity));
        }

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
            inner: RwLock::new(Inner { entities, links }),
            minter: IdMinter::new(clock.clone(), id_gen),
            clock,
            hooks: task_fsm::HookRegistry::new(),
            publisher,
        })
    }

    pub fn register_hook(&mut self, state: TaskStatus, hook: task_fsm::Hook) {
        self.hooks.register(state, hook);
    }

    fn publish(&self, event: kira_core::Event) {
        if let Some(publisher) = &self.publisher {
            publisher.publish(event);
        }
    }

    fn path_for(&self, entity_type: EntityType, id: &EntityId) -> PathBuf {
        self.root
            .join(entity_type.folder())
            .join(format!("{}.md", id.as_str()))
    }

    /// Create a brand-new entity (§4.4 "create_entity").
    pub fn create_entity(
        &self,
        entity_type: EntityType,
        metadata: FrontMatter,
        body: String,
        title: impl Into<String>,
    ) -> Result<Entity, VaultError> {
        let title = title.into();
        schema::validate(entity_type, &metadata)?;

        let _guard = self.write_lock.lock();
        let now = self.minter_now();

        let id = {
            let inner = self.inner.read();
            self.minter.mint(entity_type, |candidate| {
                inner.entities.contains_key(&EntityId::new(candidate))
            })
        };

        if for_self_link(&id, &body) {
            return Err(VaultError::SelfLink(id));
        }

        let mut entity = Entity::new(id.clone(), entity_type, title, now);
        entity.metadata = metadata;
        entity.body = body;

        self.commit_new(&entity)?;

        let mut inner = self.inner.write();
        inner.links.register_entity(id.clone());
        inner.links.set_outgoing(&id, derive_links(&entity));
        inner.entities.insert(id.clone(), entity.clone());
        drop(inner);

        self.publish(kira_core::Event::EntityCreated {
            entity: entity.clone(),
        });
        Ok(entity)
    }

    /// Apply a typed patch, optionally carrying a task `status` transition
    /// through the FSM (§4.4 "FSM integration").
    pub fn update_entity(
        &self,
        id: &EntityId,
        patch: EntityPatch,
        status_transition: Option<(TaskStatus, TransitionInput)>,
    ) -> Result<Entity, VaultError> {
        let _guard = self.write_lock.lock();

        let mut entity = {
            let inner = self.inner.read();
            inner
                .entities
                .get(id)
                .cloned()
                .ok_or_else(|| VaultError::NotFound(id.clone()))?
        };
        let previous_title = entity.title.clone();

        if let Some(title) = patch.title {
            entity.title = title;
        }
        if let Some(tags) = patch.tags {
            entity.tags = tags;
        }
        if let Some(body) = patch.body {
            if for_self_link(id, &body) {
                return Err(VaultError::SelfLink(id.clone()));
            }
            entity.body = body;
        }
        for (key, value) in patch.metadata {
            if value.is_null() {
                entity.metadata.shift_remove(&key);
            } else {
                entity.metadata.insert(key, value);
            }
        }

        let mut transition_event = None;
        if let Some((to_state, input)) = status_transition {
            let from_state = current_status(&entity);
            let outcome = transition(from_state, to_state, &input)?;
            apply_mutations(&mut entity, &outcome.mutations, self.minter_now());
            entity
                .metadata
                .insert("status".to_string(), Value::from(to_state.as_str()));
            transition_event = Some((from_state, to_state, input.reason, outcome.mutations));
        }

        schema::validate(entity.entity_type, &entity.metadata)?;
        entity.updated_at = self.minter_now();

        self.commit_existing(&entity)?;

        {
            let mut inner = self.inner.write();
            inner.links.set_outgoing(id, derive_links(&entity));
            inner.entities.insert(id.clone(), entity.clone());
        }

        if let Some((from_state, to_state, reason, mutations)) = transition_event {
            let ctx = task_fsm::TransitionContext {
                entity_id: id.as_str().to_string(),
                from: from_state,
                to: to_state,
                reason: reason.clone(),
                correlation_id: None,
                mutations: mutations.clone(),
            };
            self.hooks.dispatch(&ctx);
            self.publish(kira_core::Event::TaskTransition {
                entity_id: id.clone(),
                from_state,
                to_state,
                reason,
                correlation_id: None,
                mutations,
            });
        }

        self.publish(kira_core::Event::EntityUpdated {
            entity: entity.clone(),
            previous_title: Some(previous_title),
        });
        Ok(entity)
    }

    /// Remove an entity's file, index entries, and emit `entity.deleted`.
    pub fn delete_entity(&self, id: &EntityId) -> Result<(), VaultError> {
        let _guard = self.write_lock.lock();

        let entity = {
            let inner = self.inner.read();
            inner
                .entities
                .get(id)
                .cloned()
                .ok_or_else(|| VaultError::NotFound(id.clone()))?
        };

        let path = self.path_for(entity.entity_type, id);
        fs::remove_file(&path)?;

        {
            let mut inner = self.inner.write();
            inner.links.forget_entity(id);
            inner.entities.remove(id);
        }

        self.publish(kira_core::Event::EntityDeleted {
            id: id.clone(),
            entity_type: entity.entity_type,
        });
        Ok(())
    }

    pub fn get_entity(&self, id: &EntityId) -> Result<Entity, VaultError> {
        self.inner
            .read()
            .entities
            .get(id)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(id.clone()))
    }

    pub fn list_entities(
        &self,
        entity_type: Option<EntityType>,
        filter: &EntityFilter,
    ) -> Vec<Entity> {
        self.inner
            .read()
            .entities
            .values()
            .filter(|e| match entity_type {
                Some(t) => e.entity_type == t,
                None => true,
            })
            .filter(|e| match &filter.tag {
                Some(tag) => e.tags.contains(tag),
                None => true,
            })
            .filter(|e| match filter.status {
                Some(status) => {
                    e.metadata
                        .get("status")
                        .and_then(Value::as_str)
                        .and_then(TaskStatus::parse)
                        == Some(status)
                }
                None => true,
            })
            .cloned()
            .collect()
    }

    pub fn query_links(&self, id: &EntityId, direction: Direction) -> Vec<Link> {
        self.inner.read().links.query(id, direction)
    }

    /// Snapshot the current link index, for callers (e.g. `kira validate`)
    /// that run whole-graph checks (§4.8) rather than per-entity queries.
    pub fn link_index(&self) -> LinkIndex {
        self.inner.read().links.clone()
    }

    fn minter_now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now_utc()
    }

    /// Stage into a temp file in the same directory, fsync, then rename
    /// over the target (§4.4 "Atomic write"). A stale temp left by a prior
    /// crash is cleared before staging; if the rename itself still fails,
    /// that is fatal and the temp file is left in place for recovery
    /// (§4.4 "Failure semantics").
    fn write_atomic(path: &Path, contents: &str) -> Result<(), VaultError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("md.tmp");
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }
        {
            let mut file = File::create(&tmp_path)?;
            use std::io::Write;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path).map_err(|e| VaultError::CommitFailed {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn commit_new(&self, entity: &Entity) -> Result<(), VaultError> {
        let path = self.path_for(entity.entity_type, &entity.id);
        if path.exists() {
            return Err(VaultError::DuplicateId(entity.id.clone()));
        }
        let contents = serialize_document(&entity_to_document(entity));
        Self::write_atomic(&path, &contents)
    }

    fn commit_existing(&self, entity: &Entity) -> Result<(), VaultError> {
        let path = self.path_for(entity.entity_type, &entity.id);
        let contents = serialize_document(&entity_to_document(entity));
        Self::write_atomic(&path, &contents)
    }
}

fn for_self_link(id: &EntityId, body: &str) -> bool {
    extract_wikilinks(body).contains(id)
}

fn derive_links(entity: &Entity) -> BTreeSet<(EntityId, LinkType)> {
    let mut links: BTreeSet<(EntityId, LinkType)> = extract_wikilinks(&entity.body)
        .into_iter()
        .map(|target| (target, LinkType::Wikilink))
        .collect();

    if let Some(depends) = entity.metadata.get("depends_on").and_then(Value::as_seq) {
        for value in depends {
            if let Some(s) = value.as_str() {
                links.insert((EntityId::new(s), LinkType::DependsOn));
            }
        }
    }
    links
}

fn current_status(entity: &Entity) -> TaskStatus {
    entity
        .metadata
        .get("status")
        .and_then(Value::as_str)
        .and_then(TaskStatus::parse)
        .unwrap_or_default()
}

fn apply_mutations(
    entity: &mut Entity,
    mutations: &task_fsm::GuardMutations,
    now: chrono::DateTime<chrono::Utc>,
) {
    if mutations.set_done_ts {
        entity
            .metadata
            .insert("done_ts".to_string(), Value::from(now.to_rfc3339()));
    }
    if mutations.clear_done_ts {
        entity.metadata.shift_remove("done_ts");
    }
    if mutations.set_estimate_frozen {
        entity
            .metadata
            .insert("estimate_frozen".to_string(), Value::Bool(true));
    }
}

fn entity_to_document(entity: &Entity) -> Document {
    let mut fm = FrontMatter::new();
    fm.insert("id".to_string(), Value::from(entity.id.as_str()));
    fm.insert(
        "entity_type".to_string(),
        Value::from(entity.entity_type.as_str()),
    );
    fm.insert("title".to_string(), Value::from(entity.title.as_str()));
    fm.insert(
        "tags".to_string(),
        Value::Seq(entity.tags.iter().map(|t| Value::from(t.as_str())).collect()),
    );
    for (key, value) in &entity.metadata {
        fm.insert(key.clone(), value.clone());
    }
    fm.insert(
        "created_at".to_string(),
        Value::from(entity.created_at.to_rfc3339()),
    );
    fm.insert(
        "updated_at".to_string(),
        Value::from(entity.updated_at.to_rfc3339()),
    );
    Document {
        front_matter: fm,
        body: entity.body.clone(),
    }
}

fn document_to_entity(doc: &Document, entity_type: EntityType) -> Result<Entity, VaultError> {
    let get_str = |key: &str| -> Option<String> {
        doc.front_matter.get(key).and_then(Value::as_str).map(String::from)
    };
    let id = get_str("id")
        .map(EntityId::new)
        .ok_or_else(|| CodecError::Malformed("missing id".to_string()))?;
    let title = get_str("title").unwrap_or_default();
    let created_at = get_str("created_at")
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .ok_or_else(|| CodecError::Malformed("missing/invalid created_at".to_string()))?;
    let updated_at = get_str("updated_at")
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or(created_at);
    let tags: BTreeSet<String> = doc
        .front_matter
        .get("tags")
        .and_then(Value::as_seq)
        .map(|seq| seq.iter().filter_map(Value::as_str).map(String::from).collect())
        .unwrap_or_default();

    let mut metadata = FrontMatter::new();
    for (key, value) in &doc.front_matter {
        if !matches!(key.as_str(), "id" | "entity_type" | "title" | "tags" | "created_at" | "updated_at") {
            metadata.insert(key.clone(), value.clone());
        }
    }

    Ok(Entity {
        id,
        entity_type,
        title,
        tags,
        created_at,
        updated_at,
        metadata,
        body: doc.body.clone(),
    })
}

#[cfg(test)]
#[path = "vault_tests.rs"]
mod tests;
