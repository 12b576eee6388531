// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_a_well_formed_plan() {
    let raw = r#"{"tool_calls":[{"tool":"task_create","args":{"title":"x"},"dry_run":false}],"reasoning":"create it"}"#;
    let plan = parse_plan(raw).unwrap();
    assert_eq!(plan.tool_calls.len(), 1);
    assert_eq!(plan.tool_calls[0].tool, "task_create");
}

#[test]
fn non_json_response_is_rejected() {
    let err = parse_plan("not json at all").unwrap_err();
    assert!(matches!(err, PlanningError::Unparseable(_)));
}

#[test]
fn missing_dry_run_defaults_to_false() {
    let raw = r#"{"tool_calls":[{"tool":"task_get","args":{"id":"task-1"}}]}"#;
    let plan = parse_plan(raw).unwrap();
    assert!(!plan.tool_calls[0].dry_run);
}

#[test]
fn empty_tool_calls_is_a_valid_plan() {
    let raw = r#"{"tool_calls":[],"reasoning":"nothing to do"}"#;
    let plan = parse_plan(raw).unwrap();
    assert!(plan.tool_calls.is_empty());
}
