// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory link index: the bidirectional adjacency map over wikilinks and
//! typed metadata links (§4.4 "Link index", design note "Cyclic graphs").
//!
//! Entities own their data; links are indexed separately by ID so the graph
//! can be cyclic without Rust ownership fighting it.

use kira_core::EntityId;
use std::collections::{BTreeMap, BTreeSet};

/// The kind of reference a link represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkType {
    /// An inline `[[target-id]]` reference in the body (§3 "Relationships").
    Wikilink,
    /// A `depends_on` entry in task metadata.
    DependsOn,
}

impl LinkType {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkType::Wikilink => "wikilink",
            LinkType::DependsOn => "depends_on",
        }
    }
}

/// A single resolved (or unresolved) link edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Link {
    pub source: EntityId,
    pub target: EntityId,
    pub link_type: LinkType,
    /// `true` if `target` does not exist in the vault (§4.4, §4.8).
    pub broken: bool,
}

/// Direction to query links in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Out,
    In,
    Both,
}

#[derive(Debug, Default, Clone)]
struct Adjacency {
    outgoing: BTreeSet<(EntityId, LinkType)>,
    incoming: BTreeSet<(EntityId, LinkType)>,
}

/// The bidirectional adjacency map over the entity graph (§4.4, GLOSSARY).
#[derive(Debug, Default, Clone)]
pub struct LinkIndex {
    adjacency: BTreeMap<EntityId, Adjacency>,
    known_ids: BTreeSet<EntityId>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that `id` exists in the vault, independent of whether it
    /// has any links yet. Needed so `broken` can be computed correctly.
    pub fn register_entity(&mut self, id: EntityId) {
        self.known_ids.insert(id);
    }

    pub fn forget_entity(&mut self, id: &EntityId) {
        self.known_ids.remove(id);
        self.adjacency.remove(id);
        for adj in self.adjacency.values_mut() {
            adj.outgoing.retain(|(target, _)| target != id);
            adj.incoming.retain(|(source, _)| source != id);
        }
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.known_ids.contains(id)
    }

    /// Replace the outgoing link set for `source`, updating all affected
    /// endpoints' incoming sets (§4.4 "the diff between old and new links").
    pub fn set_outgoing(&mut self, source: &EntityId, links: BTreeSet<(EntityId, LinkType)>) {
        let previous = self
            .adjacency
            .get(source)
            .map(|a| a.outgoing.clone())
            .unwrap_or_default();

        for (target, link_type) in previous.difference(&links) {
            if let Some(adj) = self.adjacency.get_mut(target) {
                adj.incoming.remove(&(source.clone(), *link_type));
            }
        }
        for (target, link_type) in links.difference(&previous) {
            self.adjacency
                .entry(target.clone())
                .or_default()
                .incoming
                .insert((source.clone(), *link_type));
        }

        self.adjacency.entry(source.clone()).or_default().outgoing = links;
    }

    pub fn query(&self, id: &EntityId, direction: Direction) -> Vec<Link> {
        let adj = match self.adjacency.get(id) {
            Some(a) => a,
            None => return Vec::new(),
        };
        let mut out = Vec::new();
        if matches!(direction, Direction::Out | Direction::Both) {
            for (target, link_type) in &adj.outgoing {
                out.push(Link {
                    source: id.clone(),
                    target: target.clone(),
                    link_type: *link_type,
                    broken: !self.known_ids.contains(target),
                });
            }
        }
        if matches!(direction, Direction::In | Direction::Both) {
            for (source, link_type) in &adj.incoming {
                out.push(Link {
                    source: source.clone(),
                    target: id.clone(),
                    link_type: *link_type,
                    broken: false,
                });
            }
        }
        out
    }

    /// Entities with zero in- and out-links (§4.8 "Orphans").
    pub fn orphans(&self) -> Vec<EntityId> {
        self.known_ids
            .iter()
            .filter(|id| match self.adjacency.get(*id) {
                None => true,
                Some(adj) => adj.outgoing.is_empty() && adj.incoming.is_empty(),
            })
            .cloned()
            .collect()
    }

    /// Every `(source, target)` edge, restricted to `link_type`, for graph
    /// algorithms that operate on a single relation (e.g. §4.8 cycles on
    /// `depends_on`).
    pub fn edges_of_type(&self, link_type: LinkType) -> Vec<(EntityId, EntityId)> {
        let mut edges = Vec::new();
        for (source, adj) in &self.adjacency {
            for (target, lt) in &adj.outgoing {
                if *lt == link_type {
                    edges.push((source.clone(), target.clone()));
                }
            }
        }
        edges
    }

    pub fn all_broken_links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        for (source, adj) in &self.adjacency {
            for (target, link_type) in &adj.outgoing {
                if !self.known_ids.contains(target) {
                    out.push(Link {
                        source: source.clone(),
                        target: target.clone(),
                        link_type: *link_type,
                        broken: true,
                    });
                }
            }
        }
        out
    }

    pub fn known_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.known_ids.iter()
    }

    pub fn total_links(&self) -> usize {
        self.adjacency.values().map(|a| a.outgoing.len()).sum()
    }
}

/// Extract every `[[target-id]]` wikilink referenced in body text.
///
/// Self-links are included here; rejecting them is the vault store's job
/// at insertion time (§3 "Self-links are rejected at insertion"), not this
/// parser's — it only reports what the body actually contains.
pub fn extract_wikilinks(body: &str) -> BTreeSet<EntityId> {
    let mut links = BTreeSet::new();
    let mut rest = body;
    while let Some(start) = rest.find("[[") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("]]") else {
            break;
        };
        let target = after[..end].trim();
        if !target.is_empty() {
            links.insert(EntityId::new(target));
        }
        rest = &after[end + 2..];
    }
    links
}

#[cfg(test)]
#[path = "links_tests.rs"]
mod tests;
