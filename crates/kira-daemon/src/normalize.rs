// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The concrete [`NormalizationSink`] the inbox pipeline (§4.9) hands
//! dropped files and received messages to: turn each into a note entity.
//! A dropped Markdown file's first line becomes the title; everything else
//! falls back to a generic title derived from its source.

use std::sync::Arc;

use kira_core::{Event, EntityType, FrontMatter};
use kira_tools::{NormalizationSink, VaultAccess};

pub struct InboxNormalizer {
    vault: Arc<dyn VaultAccess>,
}

impl InboxNormalizer {
    pub fn new(vault: Arc<dyn VaultAccess>) -> Self {
        Self { vault }
    }
}

impl NormalizationSink for InboxNormalizer {
    fn normalize(&self, event: &Event) -> Result<(), String> {
        let (title, body) = match event {
            Event::FileDropped { path, content, .. } => (title_from_content(content, path), content.clone()),
            Event::MessageReceived { source, text, .. } => (title_from_content(text, source), text.clone()),
            other => return Err(format!("inbox normalizer cannot handle event `{}`", other.name())),
        };

        self.vault
            .create_entity(EntityType::Note, FrontMatter::new(), body, title)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

fn title_from_content(content: &str, fallback: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|l| l.trim_start_matches('#').trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| format!("inbox item from {fallback}"))
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
