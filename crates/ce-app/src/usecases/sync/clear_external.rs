use std::sync::Arc;

use ce_core::ports::{ExternalStorePort, LocalFieldHostPort, StoreError};
use ce_core::{Field, GuardToken, TextPair};
use tracing::{debug, info, info_span};

use super::apply_field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The store was emptied.
    Cleared,
    /// The store cannot be emptied; an empty pair was written instead and the
    /// fields blanked to match.
    Blanked,
}

/// User "clear" action.
pub struct ClearExternalUseCase {
    store: Arc<dyn ExternalStorePort>,
    fields: Arc<dyn LocalFieldHostPort>,
}

impl ClearExternalUseCase {
    pub fn new(store: Arc<dyn ExternalStorePort>, fields: Arc<dyn LocalFieldHostPort>) -> Self {
        Self { store, fields }
    }

    pub fn execute(&self, _guard: &GuardToken<'_>) -> Result<ClearOutcome, StoreError> {
        let _span = info_span!("usecase.sync.clear.execute").entered();

        match self.store.clear() {
            Ok(()) => {
                info!("external store cleared");
                Ok(ClearOutcome::Cleared)
            }
            Err(StoreError::Unsupported(op)) => {
                debug!(op, "store cannot clear; writing an empty pair instead");
                self.store.write(&TextPair::default())?;
                for field in Field::ALL {
                    apply_field(self.fields.as_ref(), field, "");
                }
                Ok(ClearOutcome::Blanked)
            }
            Err(err) => Err(err),
        }
    }
}
