// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-entity-type field schemas and validation (§4.3).

use crate::entity::EntityType;
use crate::value::Value;
use thiserror::Error;

/// The semantic type a field's value must conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    Int,
    /// RFC-3339 UTC timestamp, stored as [`Value::String`].
    Timestamp,
    /// Duration in seconds, stored as [`Value::Int`].
    Duration,
    /// One of a fixed set of string values.
    Enum(&'static [&'static str]),
    /// A sequence of scalar strings.
    StringSeq,
}

/// A single field's schema entry (§4.3).
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// An entity type's complete field schema. `open` types accept fields not
/// named here (§4.3 "Unknown fields are rejected unless the type is marked
/// `open`"); in this registry only `note` is open, since it declares no
/// extension fields at all.
pub struct EntitySchema {
    pub fields: &'static [FieldSchema],
    pub open: bool,
}

pub fn schema_for(entity_type: EntityType) -> EntitySchema {
    match entity_type {
        EntityType::Task => EntitySchema {
            fields: &[
                FieldSchema { name: "status", required: true, kind: FieldKind::Enum(&["todo", "doing", "review", "done", "blocked"]) },
                FieldSchema { name: "priority", required: true, kind: FieldKind::Enum(&["low", "medium", "high"]) },
                FieldSchema { name: "due_ts", required: false, kind: FieldKind::Timestamp },
                FieldSchema { name: "start_ts", required: false, kind: FieldKind::Timestamp },
                FieldSchema { name: "done_ts", required: false, kind: FieldKind::Timestamp },
                FieldSchema { name: "estimate", required: false, kind: FieldKind::Duration },
                FieldSchema { name: "estimate_frozen", required: false, kind: FieldKind::Bool },
                FieldSchema { name: "assignee", required: false, kind: FieldKind::String },
                FieldSchema { name: "reopen_reason", required: false, kind: FieldKind::String },
                FieldSchema { name: "gcal_id", required: false, kind: FieldKind::String },
                FieldSchema { name: "gcal_last_synced", required: false, kind: FieldKind::Timestamp },
                FieldSchema { name: "depends_on", required: false, kind: FieldKind::StringSeq },
            ],
            open: false,
        },
        EntityType::Note => EntitySchema { fields: &[], open: true },
        EntityType::Event => EntitySchema {
            fields: &[
                FieldSchema { name: "start", required: true, kind: FieldKind::Timestamp },
                FieldSchema { name: "end", required: true, kind: FieldKind::Timestamp },
                FieldSchema { name: "location", required: false, kind: FieldKind::String },
                FieldSchema { name: "attendees", required: false, kind: FieldKind::StringSeq },
                FieldSchema { name: "all_day", required: false, kind: FieldKind::Bool },
                FieldSchema { name: "gcal_id", required: false, kind: FieldKind::String },
                FieldSchema { name: "gcal_last_synced", required: false, kind: FieldKind::Timestamp },
            ],
            open: false,
        },
        EntityType::Project => EntitySchema {
            fields: &[
                FieldSchema { name: "status", required: true, kind: FieldKind::String },
                FieldSchema { name: "members", required: false, kind: FieldKind::StringSeq },
            ],
            open: false,
        },
        EntityType::Rollup => EntitySchema {
            fields: &[
                FieldSchema { name: "rollup_type", required: true, kind: FieldKind::Enum(&["daily", "weekly", "monthly"]) },
                FieldSchema { name: "period_start", required: true, kind: FieldKind::String },
                FieldSchema { name: "period_end", required: true, kind: FieldKind::String },
                FieldSchema { name: "sections_count", required: true, kind: FieldKind::Int },
            ],
            open: false,
        },
    }
}

/// What about a field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolatedRule {
    MissingRequired,
    UnknownField,
    TypeMismatch { expected: &'static str },
    InvalidEnumValue { allowed: &'static [&'static str] },
    InvalidTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field_path: String,
    pub rule: ViolatedRule,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("validation failed: {violations:?}")]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

/// Validate `data` against `entity_type`'s schema, producing structured
/// field-path/rule errors rather than the first failure (§4.3).
pub fn validate(entity_type: EntityType, data: &crate::value::FrontMatter) -> Result<(), ValidationError> {
    let schema = schema_for(entity_type);
    let mut violations = Vec::new();

    for field in schema.fields {
        match data.get(field.name) {
            None => {
                if field.required {
                    violations.push(FieldViolation {
                        field_path: field.name.to_string(),
                        rule: ViolatedRule::MissingRequired,
                    });
                }
            }
            Some(value) => {
                if let Some(rule) = check_kind(field.kind, value) {
                    violations.push(FieldViolation {
                        field_path: field.name.to_string(),
                        rule,
                    });
                }
            }
        }
    }

    if !schema.open {
        let known: std::collections::HashSet<&str> =
            schema.fields.iter().map(|f| f.name).collect();
        for key in data.keys() {
            if !known.contains(key.as_str()) {
                violations.push(FieldViolation {
                    field_path: key.clone(),
                    rule: ViolatedRule::UnknownField,
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn check_kind(kind: FieldKind, value: &Value) -> Option<ViolatedRule> {
    if value.is_null() {
        return None;
    }
    match kind {
        FieldKind::String => {
            (!matches!(value, Value::String(_))).then_some(ViolatedRule::TypeMismatch { expected: "string" })
        }
        FieldKind::Bool => {
            (!matches!(value, Value::Bool(_))).then_some(ViolatedRule::TypeMismatch { expected: "bool" })
        }
        FieldKind::Int | FieldKind::Duration => {
            (!matches!(value, Value::Int(_))).then_some(ViolatedRule::TypeMismatch { expected: "int" })
        }
        FieldKind::Timestamp => match value.as_str() {
            Some(s) => (chrono::DateTime::parse_from_rfc3339(s).is_err())
                .then_some(ViolatedRule::InvalidTimestamp),
            None => Some(ViolatedRule::TypeMismatch { expected: "timestamp string" }),
        },
        FieldKind::Enum(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => None,
            Some(_) => Some(ViolatedRule::InvalidEnumValue { allowed }),
            None => Some(ViolatedRule::TypeMismatch { expected: "string" }),
        },
        FieldKind::StringSeq => match value.as_seq() {
            Some(items) if items.iter().all(|v| matches!(v, Value::String(_))) => None,
            Some(_) => Some(ViolatedRule::TypeMismatch { expected: "sequence of string" }),
            None => Some(ViolatedRule::TypeMismatch { expected: "sequence" }),
        },
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
