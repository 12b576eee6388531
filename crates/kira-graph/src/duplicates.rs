// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Near-duplicate title detection (§4.8 "Duplicates"), grounded on
//! `original_source/.../test_graph_validation.py`: titles are normalized
//! (lowercased, punctuation stripped, stop words removed) and compared
//! with Jaccard similarity over the remaining term sets. Only entities of
//! the same [`EntityType`] are compared.

use kira_core::{EntityId, EntityType};
use std::collections::BTreeSet;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "in", "on", "at", "to", "for", "of", "and", "or", "is", "are", "how",
];

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicatePair {
    pub first: EntityId,
    pub second: EntityId,
    pub similarity: f64,
}

/// Lowercase, strip punctuation, collapse whitespace, drop stop words.
pub fn normalize_title(title: &str) -> BTreeSet<String> {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Pairwise-compare `entities` (only within the same type) and return pairs
/// at or above `threshold`, sorted for deterministic reporting.
pub fn find_near_duplicates(
    entities: &[(EntityId, EntityType, String)],
    threshold: f64,
) -> Vec<DuplicatePair> {
    let normalized: Vec<(&EntityId, EntityType, BTreeSet<String>)> = entities
        .iter()
        .map(|(id, ty, title)| (id, *ty, normalize_title(title)))
        .collect();

    let mut pairs = Vec::new();
    for i in 0..normalized.len() {
        for j in (i + 1)..normalized.len() {
            let (id_a, ty_a, terms_a) = &normalized[i];
            let (id_b, ty_b, terms_b) = &normalized[j];
            if ty_a != ty_b {
                continue;
            }
            let similarity = jaccard(terms_a, terms_b);
            if similarity >= threshold {
                let (first, second) = if *id_a <= *id_b {
                    ((*id_a).clone(), (*id_b).clone())
                } else {
                    ((*id_b).clone(), (*id_a).clone())
                };
                pairs.push(DuplicatePair { first, second, similarity });
            }
        }
    }
    pairs.sort_by(|a, b| (&a.first, &a.second).cmp(&(&b.first, &b.second)));
    pairs
}

#[cfg(test)]
#[path = "duplicates_tests.rs"]
mod tests;
