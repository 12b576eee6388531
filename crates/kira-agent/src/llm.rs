// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The LLM provider seam (§4.12 "Router across LLM providers"). Concrete
//! providers (remote HTTP clients, local fallback, fakes for tests) live
//! in `kira-adapters`; this crate only names the trait and task-routing
//! types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// The kind of call being routed (§4.12 "planning vs structuring vs default").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmTaskType {
    Planning,
    Structuring,
    Default,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("provider timed out")]
    Timeout,
}

/// An LLM backend. Implementations live in `kira-adapters`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError>;
}
