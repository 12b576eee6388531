// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The idempotency / dedupe store (§4.6 — "the second hard core").
//!
//! Persistence follows the teacher's JSONL-append idiom (`wal.rs`): the
//! full table is the durable state, one record per line, rewritten
//! atomically (temp + fsync + rename) on every mutation rather than
//! appended — the table is small and bounded by `cleanup_old_events`, so a
//! full rewrite per call is simpler than WAL replay and still durable.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdempotencyError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of the dedupe table (§4.6 "Storage").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    pub event_id: String,
    pub first_seen_ts: DateTime<Utc>,
    pub last_seen_ts: DateTime<Utc>,
    pub seen_count: u64,
    pub source: String,
    pub external_id: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DedupeStats {
    pub total_events: u64,
    pub duplicate_sightings: u64,
    pub by_source: BTreeMap<String, u64>,
    pub duplicate_rate: f64,
}

/// Timing/metadata fields stripped before hashing so retries of the same
/// logical event always hash identically (§4.6 "Contract", P5).
const STRIPPED_FIELDS: &[&str] = &["received_at", "processed_at", "retry_count", "trace_id"];

/// Strip timing fields and rely on `serde_json::Map`'s default `BTreeMap`
/// backing (no `preserve_order` feature) for lexicographically sorted keys.
pub fn normalize_payload(payload: &serde_json::Value) -> serde_json::Value {
    match payload {
        serde_json::Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, value) in map {
                if !STRIPPED_FIELDS.contains(&key.as_str()) {
                    out.insert(key.clone(), value.clone());
                }
            }
            serde_json::Value::Object(out)
        }
        other => other.clone(),
    }
}

/// `event_id = sha256(source, external_id, normalized_payload_json)` (§4.6).
pub fn generate_event_id(source: &str, external_id: &str, payload: &serde_json::Value) -> String {
    let normalized = normalize_payload(payload);
    // `to_string` on a `BTreeMap`-backed object is already canonical.
    let normalized_json = normalized.to_string();
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b"|");
    hasher.update(external_id.as_bytes());
    hasher.update(b"|");
    hasher.update(normalized_json.as_bytes());
    format!("{:x}", hasher.finalize())
}

const DEFAULT_TTL_DAYS: i64 = 30;

/// Persistent dedup table, keyed by `event_id` (§4.6).
pub struct IdempotencyStore {
    path: PathBuf,
    table: parking_lot::Mutex<BTreeMap<String, EventRecord>>,
}

impl IdempotencyStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, IdempotencyError> {
        let path = path.into();
        let table = if path.exists() {
            let file = File::open(&path)?;
            let reader = BufReader::new(file);
            let mut table = BTreeMap::new();
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: EventRecord = serde_json::from_str(&line)?;
                table.insert(record.event_id.clone(), record);
            }
            table
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            table: parking_lot::Mutex::new(table),
        })
    }

    pub fn is_duplicate(&self, event_id: &str) -> bool {
        self.table.lock().contains_key(event_id)
    }

    /// Returns `true` iff this is the first sighting (§4.6 "mark_seen").
    pub fn mark_seen(
        &self,
        event_id: &str,
        source: &str,
        external_id: &str,
        metadata: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<bool, IdempotencyError> {
        let mut table = self.table.lock();
        let first_sighting = match table.get_mut(event_id) {
            Some(record) => {
                record.last_seen_ts = now;
                record.seen_count += 1;
                false
            }
            None => {
                table.insert(
                    event_id.to_string(),
                    EventRecord {
                        event_id: event_id.to_string(),
                        first_seen_ts: now,
                        last_seen_ts: now,
                        seen_count: 1,
                        source: source.to_string(),
                        external_id: external_id.to_string(),
                        metadata,
                    },
                );
                true
            }
        };
        Self::persist(&self.path, &table)?;
        Ok(first_sighting)
    }

    pub fn get_event_info(&self, event_id: &str) -> Option<EventRecord> {
        self.table.lock().get(event_id).cloned()
    }

    /// Delete rows with `first_seen_ts < now - ttl_days` (§4.6, P7). Default
    /// TTL is 30 days when `ttl_days` is `None`.
    pub fn cleanup_old_events(
        &self,
        ttl_days: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<usize, IdempotencyError> {
        let cutoff = now - ChronoDuration::days(ttl_days.unwrap_or(DEFAULT_TTL_DAYS));
        let mut table = self.table.lock();
        let before = table.len();
        table.retain(|_, record| record.first_seen_ts >= cutoff);
        let removed = before - table.len();
        if removed > 0 {
            Self::persist(&self.path, &table)?;
        }
        Ok(removed)
    }

    pub fn get_stats(&self) -> DedupeStats {
        let table = self.table.lock();
        let mut by_source = BTreeMap::new();
        let mut duplicate_sightings = 0u64;
        for record in table.values() {
            *by_source.entry(record.source.clone()).or_insert(0) += 1;
            duplicate_sightings += record.seen_count.saturating_sub(1);
        }
        let total_events = table.len() as u64;
        let total_sightings: u64 = table.values().map(|r| r.seen_count).sum();
        let duplicate_rate = if total_sightings == 0 {
            0.0
        } else {
            duplicate_sightings as f64 / total_sightings as f64
        };
        DedupeStats {
            total_events,
            duplicate_sightings,
            by_source,
            duplicate_rate,
        }
    }

    fn persist(path: &Path, table: &BTreeMap<String, EventRecord>) -> Result<(), IdempotencyError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("db.tmp");
        {
            let mut file = File::create(&tmp_path)?;
            for record in table.values() {
                let line = serde_json::to_string(record)?;
                writeln!(file, "{line}")?;
            }
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "idempotency_tests.rs"]
mod tests;
