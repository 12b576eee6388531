// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake LLM provider for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use kira_agent::{LlmError, LlmProvider, Message};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

struct FakeLlmState {
    responses: VecDeque<Result<String, LlmError>>,
    calls: Vec<Vec<Message>>,
}

/// Fake LLM provider that returns a queue of canned responses in order,
/// recording every call's message history for inspection.
#[derive(Clone)]
pub struct FakeLlmProvider {
    name: String,
    inner: Arc<Mutex<FakeLlmState>>,
}

impl FakeLlmProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(FakeLlmState { responses: VecDeque::new(), calls: Vec::new() })),
        }
    }

    /// Queue a response to be returned by the next `complete` call.
    pub fn push_response(&self, response: impl Into<String>) {
        self.inner.lock().responses.push_back(Ok(response.into()));
    }

    /// Queue an error to be returned by the next `complete` call.
    pub fn push_error(&self, error: LlmError) {
        self.inner.lock().responses.push_back(Err(error));
    }

    /// Message histories passed to every recorded call, in order.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl LlmProvider for FakeLlmProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let mut state = self.inner.lock();
        state.calls.push(messages.to_vec());
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Unavailable("no canned response queued".to_string())))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
