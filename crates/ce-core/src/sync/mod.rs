//! Sync policy primitives: reentrancy guard, debounce tokens and triggers.

pub mod debounce;
pub mod guard;
pub mod state;
pub mod trigger;

pub use debounce::{DebounceState, PendingToken, PushPlan};
pub use guard::{GuardToken, ReentrancyGuard};
pub use state::SyncPhase;
pub use trigger::{ManualButtons, Trigger, TriggerPolicy};
