// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task-specific extension fields (§3 "task").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::entity::EntityId;

/// Task lifecycle status (§4.7 state set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    Doing,
    Review,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "doing" => Some(TaskStatus::Doing),
            "review" => Some(TaskStatus::Review),
            "done" => Some(TaskStatus::Done),
            "blocked" => Some(TaskStatus::Blocked),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Task priority (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Strongly typed facade over a task entity's `metadata` map (design note:
/// "type-specific fields are validated by §4.3 and then typed ... as
/// strongly as the target language allows").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFields {
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(default)]
    pub due_ts: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_ts: Option<DateTime<Utc>>,
    #[serde(default)]
    pub done_ts: Option<DateTime<Utc>>,
    #[serde(default, with = "duration_secs_opt")]
    pub estimate: Option<Duration>,
    #[serde(default)]
    pub estimate_frozen: bool,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub reopen_reason: Option<String>,
    #[serde(default)]
    pub gcal_id: Option<String>,
    #[serde(default)]
    pub gcal_last_synced: Option<DateTime<Utc>>,
    #[serde(default)]
    pub depends_on: BTreeSet<EntityId>,
}

impl Default for TaskFields {
    fn default() -> Self {
        Self {
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due_ts: None,
            start_ts: None,
            done_ts: None,
            estimate: None,
            estimate_frozen: false,
            assignee: None,
            reopen_reason: None,
            gcal_id: None,
            gcal_last_synced: None,
            depends_on: BTreeSet::new(),
        }
    }
}

mod duration_secs_opt {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match d {
            Some(d) => s.serialize_some(&d.as_secs()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let secs: Option<u64> = Option::deserialize(d)?;
        Ok(secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
