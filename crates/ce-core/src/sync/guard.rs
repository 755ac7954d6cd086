//! Single suppression flag shared by both propagation directions.
//!
//! Writing to the local fields as part of a pull re-fires the local edit path
//! synchronously (and a push re-fires the store's change notification). The
//! guard makes each propagation one atomic step: whatever arrives while it is
//! held is dropped.

use std::sync::atomic::{AtomicBool, Ordering};

use super::SyncPhase;

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    held: AtomicBool,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the guard, or `None` if a propagation is already running.
    ///
    /// The flag is released when the returned token is dropped, including
    /// during unwinding.
    pub fn try_acquire(&self) -> Option<GuardToken<'_>> {
        self.held
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| GuardToken { guard: self })
    }

    /// Run `action` under the guard. Skipped entirely if the guard is held.
    pub fn with_guard<R>(&self, action: impl FnOnce() -> R) -> Option<R> {
        let _token = self.try_acquire()?;
        Some(action())
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    pub fn phase(&self) -> SyncPhase {
        if self.is_held() {
            SyncPhase::Propagating
        } else {
            SyncPhase::Idle
        }
    }
}

/// Proof that the guard is held; releases it on drop.
#[must_use = "the guard is released as soon as the token is dropped"]
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.held.store(false, Ordering::Release);
    }
}
