// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inbox pipeline (§4.9). Scans a folder, emits `file.dropped` /
//! `message.received` for every item, and hands each one to a
//! [`NormalizationSink`] with retry and exponential backoff. The pipeline
//! itself never writes to the vault.

use kira_core::{Event, EventPublisher, TraceId};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// The thing that actually normalizes a dropped/received item. Unlike the
/// generic [`EventPublisher`], this reports failure so the pipeline can
/// retry it (§4.9 "on subscriber exception, retries with exponential
/// backoff").
pub trait NormalizationSink: Send + Sync {
    fn normalize(&self, event: &Event) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum InboxError {
    #[error("io error scanning inbox: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default)]
pub struct InboxRunSummary {
    pub processed: usize,
    pub failed: Vec<PathBuf>,
}

pub struct InboxPipeline {
    inbox_dir: PathBuf,
    publisher: Arc<dyn EventPublisher>,
    normalizer: Arc<dyn NormalizationSink>,
    max_items_per_run: usize,
    max_retries: u32,
}

impl InboxPipeline {
    pub fn new(
        inbox_dir: impl Into<PathBuf>,
        publisher: Arc<dyn EventPublisher>,
        normalizer: Arc<dyn NormalizationSink>,
        max_items_per_run: usize,
        max_retries: u32,
    ) -> Self {
        Self {
            inbox_dir: inbox_dir.into(),
            publisher,
            normalizer,
            max_items_per_run,
            max_retries,
        }
    }

    /// Scan the inbox (lexicographic by mtime, capped at
    /// `max_items_per_run`) and process each item in turn.
    pub fn run(&self) -> Result<InboxRunSummary, InboxError> {
        let mut entries: Vec<(std::time::SystemTime, PathBuf)> = Vec::new();
        if self.inbox_dir.exists() {
            for entry in fs::read_dir(&self.inbox_dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let mtime = entry.metadata()?.modified()?;
                entries.push((mtime, entry.path()));
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        entries.truncate(self.max_items_per_run);

        let mut summary = InboxRunSummary::default();
        for (_, path) in entries {
            if self.process_one(&path) {
                summary.processed += 1;
            } else {
                summary.failed.push(path);
            }
        }
        Ok(summary)
    }

    fn process_one(&self, path: &Path) -> bool {
        let trace_id = TraceId::generate();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read inbox item");
                return false;
            }
        };

        let is_markdown = path.extension().and_then(|e| e.to_str()) == Some("md");
        let event = if is_markdown {
            Event::FileDropped {
                path: path.display().to_string(),
                content,
                trace_id: trace_id.clone(),
            }
        } else {
            Event::MessageReceived {
                source: "inbox".to_string(),
                text: content,
                trace_id: trace_id.clone(),
            }
        };

        let mut attempt = 0u32;
        loop {
            match self.normalizer.normalize(&event) {
                Ok(()) => {
                    self.publisher.publish(event);
                    return true;
                }
                Err(reason) => {
                    attempt += 1;
                    tracing::warn!(
                        %trace_id,
                        path = %path.display(),
                        attempt,
                        max_retries = self.max_retries,
                        error = %reason,
                        "inbox normalization failed"
                    );
                    if attempt > self.max_retries {
                        self.publisher.publish(Event::Failed {
                            origin: "inbox".to_string(),
                            error: reason,
                            context: std::collections::HashMap::from([(
                                "path".to_string(),
                                path.display().to_string(),
                            )]),
                        });
                        return false;
                    }
                    thread::sleep(Duration::from_millis(10 * 2u64.pow(attempt.min(10))));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "inbox_tests.rs"]
mod tests;
