//! Event dispatch for headless sessions.
//!
//! Clipboard notifications and elapsed debounce timers are posted to one
//! queue and run one at a time by [`DispatchLoop`], so the controller only
//! ever sees events in sequence.

mod dispatch;
mod scheduler;

pub use dispatch::{dispatch_channel, DispatchLoop, DispatchSender};
pub use scheduler::TokioDeferredScheduler;
