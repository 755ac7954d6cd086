//! Generation-counter debounce for edit-triggered pushes.
//!
//! Nothing is ever cancelled: a deferred push captures the token current at
//! scheduling time and, when it fires, proceeds only if no newer edit bumped
//! the counter in between. A stale callback still runs but does nothing.
//!
//! The counter restarts at 0 each session. Tokens also carry the session they
//! were issued in, so a timer left over from an earlier session never matches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PendingToken {
    session: u64,
    value: u64,
}

impl PendingToken {
    pub fn value(self) -> u64 {
        self.value
    }
}

/// What to do with a freshly registered edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushPlan {
    Immediate(PendingToken),
    Deferred { token: PendingToken, delay: Duration },
}

impl PushPlan {
    pub fn token(&self) -> PendingToken {
        match self {
            PushPlan::Immediate(token) => *token,
            PushPlan::Deferred { token, .. } => *token,
        }
    }
}

#[derive(Debug, Default)]
pub struct DebounceState {
    session: AtomicU64,
    pending: AtomicU64,
}

impl DebounceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session: the counter goes back to 0 and every token
    /// issued before is stale.
    pub fn reset(&self) {
        self.session.fetch_add(1, Ordering::AcqRel);
        self.pending.store(0, Ordering::Release);
    }

    /// Register a new edit, superseding any push still waiting.
    pub fn bump(&self) -> PendingToken {
        let value = self.pending.fetch_add(1, Ordering::AcqRel) + 1;
        PendingToken {
            session: self.session.load(Ordering::Acquire),
            value,
        }
    }

    /// Register an edit and decide whether it pushes now or after `delay_ms`.
    pub fn plan(&self, delay_ms: u64) -> PushPlan {
        let token = self.bump();
        if delay_ms == 0 {
            PushPlan::Immediate(token)
        } else {
            PushPlan::Deferred {
                token,
                delay: Duration::from_millis(delay_ms),
            }
        }
    }

    pub fn is_current(&self, token: PendingToken) -> bool {
        self.current() == token
    }

    pub fn current(&self) -> PendingToken {
        PendingToken {
            session: self.session.load(Ordering::Acquire),
            value: self.pending.load(Ordering::Acquire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_pushes_immediately() {
        let state = DebounceState::new();
        let plan = state.plan(0);
        assert_eq!(plan, PushPlan::Immediate(state.current()));
        assert_eq!(plan.token().value(), 1);
    }

    #[test]
    fn newer_edit_supersedes_older_token() {
        let state = DebounceState::new();
        let first = state.plan(250).token();
        let second = state.plan(250).token();

        assert!(!state.is_current(first));
        assert!(state.is_current(second));
        assert!(second > first);
    }

    #[test]
    fn deferred_plan_carries_delay() {
        let state = DebounceState::new();
        match state.plan(300) {
            PushPlan::Deferred { delay, .. } => assert_eq!(delay, Duration::from_millis(300)),
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn fresh_state_starts_at_zero() {
        assert_eq!(DebounceState::new().current().value(), 0);
    }

    #[test]
    fn reset_restarts_at_zero_and_stales_old_tokens() {
        let state = DebounceState::new();
        state.bump();
        let old = state.bump();

        state.reset();
        assert_eq!(state.current().value(), 0);
        assert!(!state.is_current(old));

        let fresh = state.bump();
        state.bump();
        assert_eq!(fresh.value(), 1);
        assert_eq!(state.current().value(), old.value());
        assert!(!state.is_current(old), "same counter, earlier session");
    }
}
