use std::time::Duration;

pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Delay-based callback on the event loop.
///
/// There is no cancellation: callers make stale tasks harmless instead.
pub trait DeferredTaskPort: Send + Sync {
    fn schedule(&self, delay: Duration, task: DeferredTask);
}
