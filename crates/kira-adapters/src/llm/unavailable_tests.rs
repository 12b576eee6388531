// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use kira_agent::Message;

#[tokio::test]
async fn always_errs_unavailable() {
    let provider = UnavailableLlmProvider::new();
    let err = provider.complete(&[Message::user("hi")]).await.unwrap_err();
    assert!(matches!(err, LlmError::Unavailable(_)));
}
