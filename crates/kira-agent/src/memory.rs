// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ephemeral per-session conversation memory (§4.12 "Session memory"),
//! grounded on `original_source/src/kira/agent/memory.py`'s
//! `collections.deque(maxlen=...)`: a bounded ring buffer keyed by
//! session ID, cleared on explicit request or process restart.

use kira_core::SessionId;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};

use crate::llm::Message;

#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub user_message: String,
    pub assistant_message: String,
}

/// Bounded per-session history. Never consulted for data facts (§4.12):
/// the planner still must invoke data-retrieval tools even if a prior
/// turn displayed the same data — this type only supplies prose context.
pub struct ConversationMemory {
    max_exchanges: usize,
    sessions: RwLock<HashMap<SessionId, VecDeque<ConversationTurn>>>,
}

impl ConversationMemory {
    pub fn new(max_exchanges: usize) -> Self {
        Self { max_exchanges, sessions: RwLock::new(HashMap::new()) }
    }

    pub fn add_turn(&self, session_id: &SessionId, user_message: String, assistant_message: String) {
        let mut sessions = self.sessions.write();
        let turns = sessions.entry(session_id.clone()).or_default();
        if turns.len() == self.max_exchanges {
            turns.pop_front();
        }
        turns.push_back(ConversationTurn { user_message, assistant_message });
    }

    /// Context messages in chronological order, supplied to the planner
    /// as prior turns (§4.12 "Plan").
    pub fn context_messages(&self, session_id: &SessionId) -> Vec<Message> {
        let sessions = self.sessions.read();
        let Some(turns) = sessions.get(session_id) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(turns.len() * 2);
        for turn in turns {
            out.push(Message::user(turn.user_message.clone()));
            out.push(Message::assistant(turn.assistant_message.clone()));
        }
        out
    }

    /// Drop a session's history (explicit clear request, §4.12).
    pub fn clear(&self, session_id: &SessionId) {
        self.sessions.write().remove(session_id);
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
