// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain event types published on the event bus (§4.5, §6).
//!
//! Serializes with `{"type": "entity.created", ...fields}`, mirroring the
//! tagged-union event shape of the teacher's job-event system.

use crate::entity::{Entity, EntityId, EntityType};
use crate::task::TaskStatus;
use crate::task_fsm::GuardMutations;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

crate::define_id! {
    /// Correlates causally related records across logs and events (GLOSSARY).
    pub struct TraceId;
}

crate::define_id! {
    /// Joins events that belong to the same logical operation.
    pub struct CorrelationId;
}

impl TraceId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl CorrelationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Period granularity for a rollup request (§3 "rollup", §4.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupType {
    Daily,
    Weekly,
    Monthly,
}

impl RollupType {
    pub fn as_str(self) -> &'static str {
        match self {
            RollupType::Daily => "daily",
            RollupType::Weekly => "weekly",
            RollupType::Monthly => "monthly",
        }
    }
}

/// Events flowing over the synchronous event bus (§4.5).
///
/// Unlike a flat job-event enum, `task.enter_<to_state>` is dynamic per
/// §4.7; [`Event::name`] computes the topic string the bus dispatches on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "entity.created")]
    EntityCreated { entity: Entity },

    #[serde(rename = "entity.updated")]
    EntityUpdated {
        entity: Entity,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous_title: Option<String>,
    },

    #[serde(rename = "entity.deleted")]
    EntityDeleted {
        id: EntityId,
        entity_type: EntityType,
    },

    #[serde(rename = "task.transition")]
    TaskTransition {
        entity_id: EntityId,
        from_state: TaskStatus,
        to_state: TaskStatus,
        #[serde(default)]
        reason: Option<String>,
        #[serde(default)]
        correlation_id: Option<CorrelationId>,
        mutations: GuardMutations,
    },

    #[serde(rename = "file.dropped")]
    FileDropped {
        path: String,
        content: String,
        trace_id: TraceId,
    },

    #[serde(rename = "message.received")]
    MessageReceived {
        source: String,
        text: String,
        trace_id: TraceId,
    },

    #[serde(rename = "rollup.requested")]
    RollupRequested {
        rollup_type: RollupType,
        period_start: NaiveDate,
        period_end: NaiveDate,
        correlation_id: CorrelationId,
    },

    /// Generic failure event (`*.failed`, §7 "repeated failure emits ... a
    /// `*.failed` event"). `origin` is the failing subsystem, e.g. `"inbox"`.
    #[serde(rename = "failed")]
    Failed {
        origin: String,
        error: String,
        #[serde(default)]
        context: HashMap<String, String>,
    },
}

/// Constructor-injected publish sink (design note: "Global mutable
/// singletons" → pass a service through instead). Implemented by the event
/// bus; the vault store and pipelines depend only on this trait so they
/// never need a direct dependency on the bus crate.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: Event);
}

impl Event {
    /// The topic string subscribers register against.
    ///
    /// For [`Event::TaskTransition`] this is `task.enter_<to_state>` per
    /// §4.7; for everything else it is the event's serde tag.
    pub fn name(&self) -> String {
        match self {
            Event::EntityCreated { .. } => "entity.created".to_string(),
            Event::EntityUpdated { .. } => "entity.updated".to_string(),
            Event::EntityDeleted { .. } => "entity.deleted".to_string(),
            Event::TaskTransition { to_state, .. } => format!("task.enter_{to_state}"),
            Event::FileDropped { .. } => "file.dropped".to_string(),
            Event::MessageReceived { .. } => "message.received".to_string(),
            Event::RollupRequested { .. } => "rollup.requested".to_string(),
            Event::Failed { origin, .. } => format!("{origin}.failed"),
        }
    }

    /// The correlation ID carried by events that have one, for log
    /// correlation on the bus (§4.5).
    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        match self {
            Event::TaskTransition { correlation_id, .. } => correlation_id.as_ref(),
            Event::RollupRequested { correlation_id, .. } => Some(correlation_id),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
