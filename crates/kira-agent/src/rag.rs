// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retrieval context store (§4.12), grounded on
//! `original_source/src/kira/agent/rag.py`: keyword-overlap retrieval
//! only, no embeddings or vector index. Documents are scored by how many
//! of the query's normalized terms they contain.

use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct RagDocument {
    pub entity_id: String,
    pub title: String,
    pub body: String,
}

#[derive(Default)]
pub struct RagContextStore {
    documents: Vec<RagDocument>,
}

impl RagContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&mut self, document: RagDocument) {
        self.documents.push(document);
    }

    fn terms(text: &str) -> BTreeSet<String> {
        text.to_lowercase()
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Rank indexed documents by keyword overlap with `query` and return
    /// the top `limit`. Ties break by insertion order.
    pub fn retrieve(&self, query: &str, limit: usize) -> Vec<&RagDocument> {
        let query_terms = Self::terms(query);
        if query_terms.is_empty() {
            return Vec::new();
        }
        let mut scored: Vec<(usize, usize, &RagDocument)> = self
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                let doc_terms = Self::terms(&format!("{} {}", doc.title, doc.body));
                (query_terms.intersection(&doc_terms).count(), i, doc)
            })
            .filter(|(score, _, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().take(limit).map(|(_, _, doc)| doc).collect()
    }
}

#[cfg(test)]
#[path = "rag_tests.rs"]
mod tests;
