//! Process-local external store.
//!
//! Stands in for the system clipboard on headless machines and in tests.
//! Change notifications are delivered synchronously from the writing call,
//! after every internal lock has been released.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use ce_core::ports::{ExternalChangeHandler, ExternalStorePort, StoreError, SubscriptionId};
use ce_core::{ExternalClip, TextPair};
use tracing::trace;

#[derive(Default)]
pub struct InMemoryExternalStore {
    value: Mutex<Option<ExternalClip>>,
    subscribers: Mutex<Vec<(SubscriptionId, Arc<dyn ExternalChangeHandler>)>>,
    next_id: AtomicU64,
}

impl InMemoryExternalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(clip: ExternalClip) -> Self {
        Self {
            value: Mutex::new(Some(clip)),
            ..Self::default()
        }
    }

    /// Replace the value as another application would, notifying subscribers.
    pub fn set_external(&self, clip: Option<ExternalClip>) -> Result<(), StoreError> {
        *lock(&self.value)? = clip;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        let handlers: Vec<_> = match lock(&self.subscribers) {
            Ok(subscribers) => subscribers.iter().map(|(_, h)| h.clone()).collect(),
            Err(_) => return,
        };
        trace!(count = handlers.len(), "notifying external change subscribers");
        for handler in handlers {
            handler.on_external_change();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
}

impl ExternalStorePort for InMemoryExternalStore {
    fn read(&self) -> Result<Option<ExternalClip>, StoreError> {
        Ok(lock(&self.value)?.clone())
    }

    fn write(&self, pair: &TextPair) -> Result<(), StoreError> {
        *lock(&self.value)? = Some(ExternalClip::plain_text(pair.clone()));
        self.notify();
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *lock(&self.value)? = None;
        self.notify();
        Ok(())
    }

    fn subscribe(
        &self,
        handler: Arc<dyn ExternalChangeHandler>,
    ) -> Result<SubscriptionId, StoreError> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.subscribers)?.push((id, handler));
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut subscribers) = lock(&self.subscribers) {
            subscribers.retain(|(existing, _)| *existing != id);
        }
    }
}
