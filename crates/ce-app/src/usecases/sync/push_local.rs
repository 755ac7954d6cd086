use std::sync::Arc;

use ce_core::ports::{ExternalStorePort, LocalFieldHostPort, StoreError};
use ce_core::{Field, GuardToken, TextPair, Trigger};
use tracing::{debug, info_span};

/// Local → external propagation ("push").
pub struct PushLocalUseCase {
    store: Arc<dyn ExternalStorePort>,
    fields: Arc<dyn LocalFieldHostPort>,
}

impl PushLocalUseCase {
    pub fn new(store: Arc<dyn ExternalStorePort>, fields: Arc<dyn LocalFieldHostPort>) -> Self {
        Self { store, fields }
    }

    /// Write the current field values to the store as one pair.
    pub fn execute(
        &self,
        _guard: &GuardToken<'_>,
        trigger: Trigger,
    ) -> Result<TextPair, StoreError> {
        let _span = info_span!("usecase.sync.push.execute", trigger = %trigger).entered();

        let pair = TextPair::new(
            self.fields.get_field(Field::Label),
            self.fields.get_field(Field::Content),
        );
        self.store.write(&pair)?;

        debug!(label = %pair.label, content = %pair.content, "push");
        Ok(pair)
    }
}
