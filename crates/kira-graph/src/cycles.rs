// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tarjan's strongly-connected-components algorithm restricted to the
//! `depends_on` subgraph (§4.8 "Cycles").
//!
//! Grounded on `original_source/.../test_graph_validation.py`: a 2-node
//! mutual dependency and a 3-node ring must each surface as exactly one
//! cycle; a linear chain must surface none.

use kira_core::EntityId;
use std::collections::{BTreeMap, HashMap};

struct Tarjan {
    adjacency: HashMap<EntityId, Vec<EntityId>>,
    index_counter: usize,
    index: HashMap<EntityId, usize>,
    lowlink: HashMap<EntityId, usize>,
    on_stack: HashMap<EntityId, bool>,
    stack: Vec<EntityId>,
    sccs: Vec<Vec<EntityId>>,
}

impl Tarjan {
    fn strongconnect(&mut self, v: &EntityId) {
        self.index.insert(v.clone(), self.index_counter);
        self.lowlink.insert(v.clone(), self.index_counter);
        self.index_counter += 1;
        self.stack.push(v.clone());
        self.on_stack.insert(v.clone(), true);

        let neighbors = self.adjacency.get(v).cloned().unwrap_or_default();
        for w in &neighbors {
            if !self.index.contains_key(w) {
                self.strongconnect(w);
                let w_low = self.lowlink[w];
                let v_low = self.lowlink[v];
                self.lowlink.insert(v.clone(), v_low.min(w_low));
            } else if *self.on_stack.get(w).unwrap_or(&false) {
                let w_idx = self.index[w];
                let v_low = self.lowlink[v];
                self.lowlink.insert(v.clone(), v_low.min(w_idx));
            }
        }

        if self.lowlink[v] == self.index[v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack.insert(w.clone(), false);
                let is_v = w == *v;
                component.push(w);
                if is_v {
                    break;
                }
            }
            self.sccs.push(component);
        }
    }
}

/// A cycle is a strongly-connected component of size >= 2 in the
/// `depends_on` subgraph, or a single node with a self-loop (which the
/// vault store already rejects at creation, but defensive here too).
///
/// Each cycle is rotated (not reordered) so the smallest entity ID starts
/// the reported sequence, giving deterministic output independent of
/// traversal order while preserving the actual `depends_on` path.
pub fn find_cycles(edges: &[(EntityId, EntityId)]) -> Vec<Vec<EntityId>> {
    let mut adjacency: BTreeMap<EntityId, Vec<EntityId>> = BTreeMap::new();
    for (source, target) in edges {
        adjacency.entry(source.clone()).or_default().push(target.clone());
        adjacency.entry(target.clone()).or_default();
    }

    let mut tarjan = Tarjan {
        adjacency: adjacency.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        index_counter: 0,
        index: HashMap::new(),
        lowlink: HashMap::new(),
        on_stack: HashMap::new(),
        stack: Vec::new(),
        sccs: Vec::new(),
    };

    for node in adjacency.keys() {
        if !tarjan.index.contains_key(node) {
            tarjan.strongconnect(node);
        }
    }

    let self_loops: std::collections::HashSet<&EntityId> = edges
        .iter()
        .filter(|(s, t)| s == t)
        .map(|(s, _)| s)
        .collect();

    let mut cycles: Vec<Vec<EntityId>> = tarjan
        .sccs
        .into_iter()
        .filter(|scc| scc.len() >= 2 || self_loops.contains(&scc[0]))
        .collect();

    for cycle in &mut cycles {
        if let Some(min_pos) = cycle
            .iter()
            .enumerate()
            .min_by_key(|(_, id)| (*id).clone())
            .map(|(i, _)| i)
        {
            cycle.rotate_left(min_pos);
        }
    }
    cycles.sort();
    cycles
}

#[cfg(test)]
#[path = "cycles_tests.rs"]
mod tests;
