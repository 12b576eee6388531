// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kira_agent::Message;

#[tokio::test]
async fn returns_queued_responses_in_order() {
    let provider = FakeLlmProvider::new("fake");
    provider.push_response("first");
    provider.push_response("second");

    assert_eq!(provider.complete(&[Message::user("a")]).await.unwrap(), "first");
    assert_eq!(provider.complete(&[Message::user("b")]).await.unwrap(), "second");
}

#[tokio::test]
async fn errs_with_nothing_queued() {
    let provider = FakeLlmProvider::new("fake");
    let err = provider.complete(&[Message::user("a")]).await.unwrap_err();
    assert!(matches!(err, LlmError::Unavailable(_)));
}

#[tokio::test]
async fn records_call_history() {
    let provider = FakeLlmProvider::new("fake");
    provider.push_response("ok");
    provider.complete(&[Message::system("sys"), Message::user("hi")]).await.unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[0][1].content, "hi");
}

#[test]
fn name_returns_constructed_label() {
    let provider = FakeLlmProvider::new("my-fake");
    assert_eq!(provider.name(), "my-fake");
}
