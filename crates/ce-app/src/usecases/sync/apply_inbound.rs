use std::sync::Arc;

use ce_core::ports::{ExternalStorePort, LocalFieldHostPort};
use ce_core::{Field, GuardToken, TextPair};
use tracing::{info_span, warn};

use super::apply_field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundOutcome {
    /// The pair is now in the store; a pull will mirror it.
    Stored,
    /// The store refused the write; the pair went straight to the fields.
    AppliedLocally { changed: Vec<Field> },
}

/// Explicit pair handed over by another entry point (share target, "process
/// text" action, notification tap).
pub struct ApplyInboundRequestUseCase {
    store: Arc<dyn ExternalStorePort>,
    fields: Arc<dyn LocalFieldHostPort>,
}

impl ApplyInboundRequestUseCase {
    pub fn new(store: Arc<dyn ExternalStorePort>, fields: Arc<dyn LocalFieldHostPort>) -> Self {
        Self { store, fields }
    }

    pub fn execute(&self, _guard: &GuardToken<'_>, pair: &TextPair) -> InboundOutcome {
        let _span = info_span!("usecase.sync.apply_inbound.execute").entered();

        match self.store.write(pair) {
            Ok(()) => InboundOutcome::Stored,
            Err(err) => {
                warn!(error = %err, "failed to store inbound pair; showing it locally only");
                let changed = Field::ALL
                    .into_iter()
                    .filter(|field| apply_field(self.fields.as_ref(), *field, pair.get(*field)))
                    .collect();
                InboundOutcome::AppliedLocally { changed }
            }
        }
    }
}
