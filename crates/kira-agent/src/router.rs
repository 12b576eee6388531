// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routes calls across configured LLM providers by task type, with an
//! optional local fallback (§4.12 "Router across LLM providers").

use std::collections::HashMap;
use std::sync::Arc;

use crate::llm::{LlmError, LlmProvider, LlmTaskType, Message};

/// Priority-ordered provider chains, one per task type, plus an optional
/// local fallback consulted after every chain for that type is exhausted.
pub struct LlmRouter {
    chains: HashMap<LlmTaskType, Vec<Arc<dyn LlmProvider>>>,
    local_fallback: Option<Arc<dyn LlmProvider>>,
}

impl LlmRouter {
    pub fn new() -> Self {
        Self { chains: HashMap::new(), local_fallback: None }
    }

    pub fn with_local_fallback(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.local_fallback = Some(provider);
        self
    }

    /// Register `provider` at the end of `task_type`'s priority chain.
    pub fn register(&mut self, task_type: LlmTaskType, provider: Arc<dyn LlmProvider>) {
        self.chains.entry(task_type).or_default().push(provider);
    }

    /// Try each provider configured for `task_type` in priority order,
    /// falling through to the next on failure; fall back to the local
    /// provider (if any) once the chain is exhausted.
    pub async fn complete(
        &self,
        task_type: LlmTaskType,
        messages: &[Message],
    ) -> Result<String, LlmError> {
        let mut last_err = LlmError::Unavailable("no providers configured".to_string());

        if let Some(chain) = self.chains.get(&task_type) {
            for provider in chain {
                match provider.complete(messages).await {
                    Ok(response) => return Ok(response),
                    Err(e) => {
                        tracing::warn!(provider = provider.name(), error = %e, "provider failed, trying next");
                        last_err = e;
                    }
                }
            }
        }

        if let Some(fallback) = &self.local_fallback {
            return fallback.complete(messages).await;
        }

        Err(last_err)
    }
}

impl Default for LlmRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
