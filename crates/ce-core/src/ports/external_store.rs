//! External store port - abstracts the shared clipboard slot
//!
//! The store is the only state outside the editor. Writes made through this
//! port are echoed back as change notifications, which is why every caller
//! goes through the sync controller's guard.

use std::fmt;

use crate::clip::{ExternalClip, TextPair};
use crate::ports::StoreError;

/// Handle returned by [`ExternalStorePort::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Callback for store change notifications.
///
/// Called on the event-dispatch thread; the handler re-reads the store
/// itself, the notification carries no value.
pub trait ExternalChangeHandler: Send + Sync {
    fn on_external_change(&self);
}

pub trait ExternalStorePort: Send + Sync {
    /// Current value, or `None` when the store holds nothing.
    fn read(&self) -> Result<Option<ExternalClip>, StoreError>;

    /// Replace the store's value.
    ///
    /// A `read()` right after a successful `write(x)` returns `x`.
    fn write(&self, pair: &TextPair) -> Result<(), StoreError>;

    /// Empty the store. Stores that cannot do this report
    /// [`StoreError::Unsupported`].
    fn clear(&self) -> Result<(), StoreError>;

    fn subscribe(
        &self,
        handler: std::sync::Arc<dyn ExternalChangeHandler>,
    ) -> Result<SubscriptionId, StoreError>;

    fn unsubscribe(&self, id: SubscriptionId);
}
