// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn doc(id: &str, title: &str, body: &str) -> RagDocument {
    RagDocument { entity_id: id.to_string(), title: title.to_string(), body: body.to_string() }
}

#[test]
fn empty_store_returns_nothing() {
    let store = RagContextStore::new();
    assert!(store.retrieve("anything", 5).is_empty());
}

#[test]
fn higher_keyword_overlap_ranks_first() {
    let mut store = RagContextStore::new();
    store.index(doc("a", "Deploy pipeline notes", "discusses CI and deploy steps"));
    store.index(doc("b", "Grocery list", "milk eggs bread"));

    let results = store.retrieve("deploy pipeline", 5);
    assert_eq!(results[0].entity_id, "a");
}

#[test]
fn documents_with_zero_overlap_are_excluded() {
    let mut store = RagContextStore::new();
    store.index(doc("a", "Grocery list", "milk eggs bread"));

    assert!(store.retrieve("deploy pipeline", 5).is_empty());
}

#[test]
fn limit_caps_the_number_of_results() {
    let mut store = RagContextStore::new();
    for i in 0..5 {
        store.index(doc(&format!("doc-{i}"), "deploy notes", "deploy deploy deploy"));
    }
    assert_eq!(store.retrieve("deploy", 2).len(), 2);
}
