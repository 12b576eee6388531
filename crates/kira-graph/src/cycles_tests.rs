// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn id(s: &str) -> EntityId {
    EntityId::new(s)
}

#[test]
fn empty_graph_has_no_cycles() {
    assert!(find_cycles(&[]).is_empty());
}

#[test]
fn linear_chain_has_no_cycles() {
    let edges = vec![
        (id("task-1"), id("task-2")),
        (id("task-2"), id("task-3")),
        (id("task-3"), id("task-4")),
    ];
    assert!(find_cycles(&edges).is_empty());
}

#[test]
fn mutual_dependency_is_one_cycle() {
    let edges = vec![(id("task-1"), id("task-2")), (id("task-2"), id("task-1"))];
    let cycles = find_cycles(&edges);
    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].contains(&id("task-1")));
    assert!(cycles[0].contains(&id("task-2")));
}

#[test]
fn three_node_ring_is_one_cycle() {
    let edges = vec![
        (id("task-1"), id("task-2")),
        (id("task-2"), id("task-3")),
        (id("task-3"), id("task-1")),
    ];
    let cycles = find_cycles(&edges);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 3);
}

#[test]
fn three_node_ring_is_rotated_not_sorted() {
    // task-a -> task-b -> task-c -> task-a. A full alphabetical sort would
    // report [task-a, task-b, task-c], which is not a rotation of this
    // cycle's actual traversal order and would misrepresent the
    // `depends_on` path. Rotating to start at the smallest ID must instead
    // preserve the adjacency Tarjan discovered.
    let edges = vec![
        (id("task-a"), id("task-b")),
        (id("task-b"), id("task-c")),
        (id("task-c"), id("task-a")),
    ];
    let cycles = find_cycles(&edges);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0], vec![id("task-a"), id("task-c"), id("task-b")]);
}

#[test]
fn separate_cycles_are_reported_independently() {
    let edges = vec![
        (id("a"), id("b")),
        (id("b"), id("a")),
        (id("c"), id("d")),
        (id("d"), id("c")),
    ];
    let cycles = find_cycles(&edges);
    assert_eq!(cycles.len(), 2);
}

#[test]
fn self_loop_is_reported_as_a_cycle() {
    let edges = vec![(id("task-1"), id("task-1"))];
    let cycles = find_cycles(&edges);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0], vec![id("task-1")]);
}
