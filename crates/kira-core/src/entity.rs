// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The entity envelope (§3 "Entities") and ID minting (§4.1).

use crate::clock::Clock;
use crate::id::IdGen;
use crate::value::FrontMatter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

crate::define_id! {
    /// Globally unique, URL-safe entity identifier. Stable across renames (I1).
    pub struct EntityId;
}

/// Registered entity types (§3). Drives schema selection (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Task,
    Note,
    Event,
    Project,
    Rollup,
}

impl EntityType {
    /// The folder an entity of this type lives under inside the vault (§6).
    pub fn folder(self) -> &'static str {
        match self {
            EntityType::Task => "tasks",
            EntityType::Note => "notes",
            EntityType::Event => "events",
            EntityType::Project => "projects",
            EntityType::Rollup => "journal",
        }
    }

    /// The `<type>` prefix used when minting an ID (§4.1).
    pub fn id_prefix(self) -> &'static str {
        match self {
            EntityType::Task => "task",
            EntityType::Note => "note",
            EntityType::Event => "event",
            EntityType::Project => "project",
            EntityType::Rollup => "rollup",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.id_prefix()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "task" => Some(EntityType::Task),
            "note" => Some(EntityType::Note),
            "event" => Some(EntityType::Event),
            "project" => Some(EntityType::Project),
            "rollup" => Some(EntityType::Rollup),
            _ => None,
        }
    }

    /// Parse a vault folder name (e.g. `"tasks"`) back to its [`EntityType`].
    pub fn parse_folder(folder: &str) -> Option<Self> {
        [
            EntityType::Task,
            EntityType::Note,
            EntityType::Event,
            EntityType::Project,
            EntityType::Rollup,
        ]
        .into_iter()
        .find(|t| t.folder() == folder)
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The common envelope shared by every entity type (§3 "Entities").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: EntityType,
    pub title: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: FrontMatter,
    #[serde(default)]
    pub body: String,
}

impl Entity {
    /// Construct a brand-new entity. `created_at == updated_at` (S1).
    pub fn new(id: EntityId, entity_type: EntityType, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            entity_type,
            title: title.into(),
            tags: BTreeSet::new(),
            created_at: now,
            updated_at: now,
            metadata: FrontMatter::new(),
            body: String::new(),
        }
    }

    /// Field accessor used by the task FSM / schema validators: reads a
    /// metadata value that is allowed to be absent.
    pub fn field(&self, key: &str) -> Option<&crate::value::Value> {
        self.metadata.get(key)
    }
}

/// A unique-collision-probing ID minter (§4.1).
///
/// IDs take the form `<type>-<yyyymmdd>-<hhmm>-<short-random>`. Collisions
/// are vanishingly unlikely but the contract requires retrying on one, so
/// the caller supplies an `exists` probe against the live vault index.
pub struct IdMinter<C, G> {
    clock: C,
    id_gen: G,
}

impl<C: Clock, G: IdGen> IdMinter<C, G> {
    pub fn new(clock: C, id_gen: G) -> Self {
        Self { clock, id_gen }
    }

    /// Mint a fresh, vault-unique ID for `entity_type`.
    ///
    /// `exists` should answer whether a candidate ID is already present in
    /// the vault's link/entity index; minting retries with a new random
    /// suffix until it finds a free one.
    pub fn mint(&self, entity_type: EntityType, exists: impl Fn(&str) -> bool) -> EntityId {
        let now = self.clock.now_utc();
        let date = now.format("%Y%m%d");
        let time = now.format("%H%M");
        loop {
            let suffix = self.id_gen.short_random();
            let candidate = format!("{}-{}-{}-{}", entity_type.id_prefix(), date, time, suffix);
            if !exists(&candidate) {
                return EntityId::new(candidate);
            }
        }
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
