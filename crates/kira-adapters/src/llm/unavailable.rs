// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stand-in provider for a task type with no configured route.

use async_trait::async_trait;
use kira_agent::{LlmError, LlmProvider, Message};

/// Provider that always reports unavailable.
///
/// Wired in as the tail of an [`kira_agent::LlmRouter`] chain when an
/// operator hasn't configured a real provider for a task type, so callers
/// get a named error instead of an empty chain falling through silently.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableLlmProvider;

impl UnavailableLlmProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmProvider for UnavailableLlmProvider {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn complete(&self, _messages: &[Message]) -> Result<String, LlmError> {
        Err(LlmError::Unavailable("no provider configured for this task type".to_string()))
    }
}

#[cfg(test)]
#[path = "unavailable_tests.rs"]
mod tests;
