// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::task::TaskStatus::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn input() -> TransitionInput {
    TransitionInput::default()
}

#[test]
fn todo_to_doing_requires_assignee_or_start_ts() {
    let err = transition(Todo, Doing, &input()).unwrap_err();
    assert_eq!(err, FsmGuardError::NeedsAssignment);

    let mut ok = input();
    ok.has_assignee = true;
    assert!(transition(Todo, Doing, &ok).is_ok());

    let mut ok2 = input();
    ok2.has_start_ts = true;
    assert!(transition(Todo, Doing, &ok2).is_ok());
}

#[test]
fn doing_to_done_freezes_estimate_and_sets_done_ts() {
    let mut i = input();
    i.has_estimate = true;
    let outcome = transition(Doing, Done, &i).unwrap();
    assert!(outcome.mutations.set_done_ts);
    assert!(outcome.mutations.set_estimate_frozen);
}

#[test]
fn done_to_doing_requires_reopen_reason() {
    let err = transition(Done, Doing, &input()).unwrap_err();
    assert_eq!(err, FsmGuardError::MissingReopenReason);

    let mut i = input();
    i.has_reopen_reason = true;
    let outcome = transition(Done, Doing, &i).unwrap();
    assert!(outcome.mutations.clear_done_ts);

    let mut i2 = input();
    i2.reason = Some("found a bug".to_string());
    assert!(transition(Done, Doing, &i2).is_ok());
}

#[test]
fn any_transition_to_blocked_requires_reason() {
    let err = transition(Todo, Blocked, &input()).unwrap_err();
    assert_eq!(err, FsmGuardError::MissingBlockReason);

    let mut i = input();
    i.reason = Some("waiting on design review".to_string());
    assert!(transition(Todo, Blocked, &i).is_ok());

    let mut blank = input();
    blank.reason = Some("   ".to_string());
    assert_eq!(
        transition(Todo, Blocked, &blank).unwrap_err(),
        FsmGuardError::MissingBlockReason
    );
}

#[test]
fn illegal_transitions_are_rejected() {
    assert_eq!(
        transition(Todo, Review, &input()).unwrap_err(),
        FsmGuardError::InvalidTransition {
            from: Todo,
            to: Review
        }
    );
    assert_eq!(
        transition(Done, Review, &input()).unwrap_err(),
        FsmGuardError::InvalidTransition {
            from: Done,
            to: Review
        }
    );
}

#[test]
fn force_bypasses_the_transition_table_but_not_guards() {
    let mut i = input();
    i.force = true;
    // Still illegal per table, but force skips that check; blocked guard still applies.
    assert_eq!(
        transition(Done, Blocked, &i).unwrap_err(),
        FsmGuardError::MissingBlockReason
    );
    i.reason = Some("migrating".to_string());
    assert!(transition(Done, Blocked, &i).is_ok());
}

#[test]
fn reachable_state_walk_matches_table_for_every_edge() {
    // P3: every edge in §4.7's table is reachable with the right input.
    let edges: &[(TaskStatus, TaskStatus)] = &[
        (Todo, Doing),
        (Todo, Blocked),
        (Todo, Done),
        (Doing, Review),
        (Doing, Blocked),
        (Doing, Done),
        (Review, Done),
        (Review, Doing),
        (Review, Blocked),
        (Done, Doing),
        (Blocked, Todo),
        (Blocked, Doing),
    ];
    for &(from, to) in edges {
        let mut i = input();
        i.has_assignee = true;
        i.has_reopen_reason = true;
        i.reason = Some("reason".to_string());
        assert!(
            transition(from, to, &i).is_ok(),
            "expected {from:?} -> {to:?} to be reachable"
        );
    }
}

#[test]
fn hook_registry_dispatches_in_registration_order() {
    let order = Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut registry = HookRegistry::new();
    let o1 = order.clone();
    registry.register(
        Doing,
        Box::new(move |_ctx| o1.lock().unwrap().push("first")),
    );
    let o2 = order.clone();
    registry.register(
        Doing,
        Box::new(move |_ctx| o2.lock().unwrap().push("second")),
    );

    let ctx = TransitionContext {
        entity_id: "task-1".to_string(),
        from: Todo,
        to: Doing,
        reason: None,
        correlation_id: None,
        mutations: GuardMutations::default(),
    };
    registry.dispatch(&ctx);
    assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn hook_panic_is_suppressed_and_later_hooks_still_run() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut registry = HookRegistry::new();
    registry.register(Done, Box::new(|_ctx| panic!("boom")));
    let c = count.clone();
    registry.register(Done, Box::new(move |_ctx| { c.fetch_add(1, Ordering::SeqCst); }));

    let ctx = TransitionContext {
        entity_id: "task-1".to_string(),
        from: Doing,
        to: Done,
        reason: None,
        correlation_id: None,
        mutations: GuardMutations::default(),
    };
    registry.dispatch(&ctx);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
