// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task finite-state machine with guarded transitions (§4.7, the third hard core).
//!
//! Grounded on `original_source/src/kira/core/task_fsm.py`: the valid-transition
//! table, the four guards (G1–G4), and the hook-dispatch-on-success shape are
//! carried over unchanged; the Python `dict[TaskState, list[TaskState]]` table
//! becomes a pure Rust match.

use crate::task::TaskStatus;
use std::collections::HashMap;
use thiserror::Error;

/// Errors a transition can fail with before any write happens (§4.7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsmGuardError {
    #[error("{from} -> {to} is not a legal transition")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },
    #[error("todo -> doing requires `assignee` or `start_ts` to be set")]
    NeedsAssignment,
    #[error("done -> doing requires a non-empty `reopen_reason`")]
    MissingReopenReason,
    #[error("transition to blocked requires a non-empty `reason`")]
    MissingBlockReason,
}

/// Inputs a caller supplies alongside the target state.
#[derive(Debug, Clone, Default)]
pub struct TransitionInput {
    /// Transition reason (used by G3/G4; also stored on the emitted event).
    pub reason: Option<String>,
    /// Whether the patch already carries `assignee`.
    pub has_assignee: bool,
    /// Whether the patch already carries `start_ts`.
    pub has_start_ts: bool,
    /// Whether the patch (or the entity) carries a non-empty `reopen_reason`.
    pub has_reopen_reason: bool,
    /// Whether the task has a non-empty `estimate` field.
    pub has_estimate: bool,
    /// Whether `done_ts` is already set on the entity.
    pub has_done_ts: bool,
    /// Bypass the transition table (reserved for migrations, §4.7).
    pub force: bool,
}

/// Fields the FSM contributes to the patch on a successful transition (G2/G3).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardMutations {
    pub set_done_ts: bool,
    pub clear_done_ts: bool,
    pub set_estimate_frozen: bool,
}

/// The accepted outcome of a transition: the mutations the caller must merge
/// into the patch before the vault store serializes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub mutations: GuardMutations,
}

/// Valid transition edges (§4.7 "State set and transitions").
fn allowed_targets(from: TaskStatus) -> &'static [TaskStatus] {
    use TaskStatus::*;
    match from {
        Todo => &[Doing, Blocked, Done],
        Doing => &[Review, Blocked, Done],
        Review => &[Done, Doing, Blocked],
        Done => &[Doing],
        Blocked => &[Todo, Doing],
    }
}

/// Check, and guard, a proposed transition. Performs no I/O and no mutation
/// of caller state — the returned [`TransitionOutcome`] tells the caller
/// (the vault store, §4.4) what to merge into the patch.
pub fn transition(
    from: TaskStatus,
    to: TaskStatus,
    input: &TransitionInput,
) -> Result<TransitionOutcome, FsmGuardError> {
    if !input.force && !allowed_targets(from).contains(&to) {
        return Err(FsmGuardError::InvalidTransition { from, to });
    }

    let mut mutations = GuardMutations::default();

    // G1: todo -> doing requires assignee or start_ts.
    if to == TaskStatus::Doing && !input.has_assignee && !input.has_start_ts {
        return Err(FsmGuardError::NeedsAssignment);
    }

    // G2: any -> done freezes the estimate and stamps done_ts.
    if to == TaskStatus::Done {
        if !input.has_done_ts {
            mutations.set_done_ts = true;
        }
        if input.has_estimate {
            mutations.set_estimate_frozen = true;
        }
    }

    // G3: done -> doing requires a reopen_reason and clears done_ts.
    if from == TaskStatus::Done && to == TaskStatus::Doing {
        let reason_present = input.has_reopen_reason
            || input
                .reason
                .as_deref()
                .map(|r| !r.trim().is_empty())
                .unwrap_or(false);
        if !reason_present {
            return Err(FsmGuardError::MissingReopenReason);
        }
        mutations.clear_done_ts = true;
    }

    // G4: any transition to blocked requires a non-empty reason.
    if to == TaskStatus::Blocked {
        let reason_present = input
            .reason
            .as_deref()
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false);
        if !reason_present {
            return Err(FsmGuardError::MissingBlockReason);
        }
    }

    Ok(TransitionOutcome {
        from,
        to,
        mutations,
    })
}

/// Transition context passed to hooks and carried on `task.enter_<state>` events.
#[derive(Debug, Clone)]
pub struct TransitionContext {
    pub entity_id: String,
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub reason: Option<String>,
    pub correlation_id: Option<String>,
    pub mutations: GuardMutations,
}

/// A hook callback invoked after a successful transition into its registered
/// state. Hook errors are logged and suppressed (§4.7 "Hooks").
pub type Hook = Box<dyn Fn(&TransitionContext) + Send + Sync>;

/// Per-target-state hook registry (§4.7 "Hooks").
///
/// Standard hooks (`enter_doing -> create_timebox`, `enter_done ->
/// update_rollup`) are owned by external collaborators and registered by
/// the daemon at startup; this registry only knows how to dispatch.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<TaskStatus, Vec<Hook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, state: TaskStatus, hook: Hook) {
        self.hooks.entry(state).or_default().push(hook);
    }

    /// Invoke every hook registered for `ctx.to`, in registration order.
    /// A panicking hook is caught and logged rather than propagated.
    pub fn dispatch(&self, ctx: &TransitionContext) {
        let Some(hooks) = self.hooks.get(&ctx.to) else {
            return;
        };
        for hook in hooks {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| hook(ctx)));
            if let Err(payload) = result {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(
                    entity_id = %ctx.entity_id,
                    to_state = %ctx.to,
                    error = %message,
                    "task FSM hook panicked; suppressing"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "task_fsm_tests.rs"]
mod tests;
