// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comprehensive vault validation (§4.8), combining cycle, orphan,
//! broken-link, and duplicate detection into one report.

use crate::cycles::find_cycles;
use crate::duplicates::{find_near_duplicates, DuplicatePair, DEFAULT_SIMILARITY_THRESHOLD};
use kira_core::{Entity, EntityId};
use kira_storage::{Link, LinkIndex, LinkType};

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub orphans: Vec<EntityId>,
    pub cycles: Vec<Vec<EntityId>>,
    pub broken_links: Vec<Link>,
    pub duplicates: Vec<DuplicatePair>,
    pub total_entities: usize,
    pub total_links: usize,
}

impl ValidationReport {
    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
    }

    pub fn issue_count(&self) -> usize {
        self.orphans.len() + self.cycles.len() + self.broken_links.len() + self.duplicates.len()
    }
}

/// Run every check over `entities` and `links`. `ignore_ids` excludes
/// entities (e.g. ones living under an ignored folder or kind) from the
/// orphan and duplicate checks, per §4.8's ignore-list carve-out.
pub fn validate(
    entities: &[Entity],
    links: &LinkIndex,
    similarity_threshold: Option<f64>,
    ignore_ids: &[EntityId],
) -> ValidationReport {
    let ignore: std::collections::HashSet<&EntityId> = ignore_ids.iter().collect();

    let orphans: Vec<EntityId> = links
        .orphans()
        .into_iter()
        .filter(|id| !ignore.contains(id))
        .collect();

    let depends_on_edges = links.edges_of_type(LinkType::DependsOn);
    let cycles = find_cycles(&depends_on_edges);

    let broken_links = links.all_broken_links();

    let titled: Vec<(EntityId, kira_core::EntityType, String)> = entities
        .iter()
        .filter(|e| !ignore.contains(&e.id))
        .map(|e| (e.id.clone(), e.entity_type, e.title.clone()))
        .collect();
    let duplicates =
        find_near_duplicates(&titled, similarity_threshold.unwrap_or(DEFAULT_SIMILARITY_THRESHOLD));

    ValidationReport {
        orphans,
        cycles,
        broken_links,
        duplicates,
        total_entities: entities.len(),
        total_links: links.total_links(),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
