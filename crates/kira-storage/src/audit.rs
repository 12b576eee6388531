// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Audit logger: one JSONL line per CLI/agent command, partitioned by UTC
//! date (§4.13 "The audit logger").
//!
//! Grounded on the teacher's WAL append idiom (`wal.rs`): append-only,
//! fsynced per write. Unlike the WAL, a day's file is never rotated or
//! truncated mid-write; readers are expected to tolerate a trailing
//! partial line if a write is interrupted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub trace_id: String,
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub args: serde_json::Value,
    pub result: serde_json::Value,
    pub exit_code: i32,
}

/// Appends one record per invocation to `<dir>/audit-YYYY-MM-DD.jsonl`.
pub struct AuditLogger {
    dir: PathBuf,
}

impl AuditLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(record.timestamp);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        let line = serde_json::to_string(record)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    }

    pub fn path_for(&self, timestamp: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(format!("audit-{}.jsonl", timestamp.format("%Y-%m-%d")))
    }

    /// Read every complete record in a day's file, silently dropping a
    /// trailing partial line (§4.13 "readers must tolerate a final partial
    /// line").
    pub fn read_day(&self, date: chrono::NaiveDate) -> Result<Vec<AuditRecord>, AuditError> {
        let path = self
            .dir
            .join(format!("audit-{}.jsonl", date.format("%Y-%m-%d")));
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        let mut records = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(record) = serde_json::from_str::<AuditRecord>(line) {
                records.push(record);
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
