use std::sync::Arc;

use ce_core::ports::{ExternalStorePort, LocalFieldHostPort, StoreError};
use ce_core::{ClipSummary, ExternalClip, Field, GuardToken, TextPair, Trigger};
use tracing::{debug, info_span, warn};

use super::apply_field;

/// Result of copying the external store into the local fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullOutcome {
    /// The value read, `None` when the store was empty.
    pub pair: Option<TextPair>,
    pub summary: ClipSummary,
    /// Fields that were actually written.
    pub changed: Vec<Field>,
}

impl PullOutcome {
    pub fn changed_anything(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// External → local propagation ("pull").
pub struct PullExternalUseCase {
    store: Arc<dyn ExternalStorePort>,
    fields: Arc<dyn LocalFieldHostPort>,
}

impl PullExternalUseCase {
    pub fn new(store: Arc<dyn ExternalStorePort>, fields: Arc<dyn LocalFieldHostPort>) -> Self {
        Self { store, fields }
    }

    /// Read the store and mirror it into the fields.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] leaves the fields untouched. A malformed
    /// value is not an error: it reads as a present clip with empty content.
    pub fn execute(
        &self,
        _guard: &GuardToken<'_>,
        trigger: Trigger,
    ) -> Result<PullOutcome, StoreError> {
        let _span = info_span!("usecase.sync.pull.execute", trigger = %trigger).entered();

        let clip = match self.store.read() {
            Ok(clip) => clip,
            Err(StoreError::MalformedValue(reason)) => {
                warn!(%reason, "external value is not text; pulling empty content");
                Some(ExternalClip::new(TextPair::default(), Vec::new(), 1))
            }
            Err(err) => return Err(err),
        };

        let summary = ClipSummary::of(clip.as_ref());
        self.fields.show_clip_info(summary.as_str());

        let target = clip.map(|clip| clip.pair);
        let applied = target.clone().unwrap_or_default();

        let changed: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|field| apply_field(self.fields.as_ref(), *field, applied.get(*field)))
            .collect();

        match &target {
            None => debug!(changed = changed.len(), "pull: empty"),
            Some(pair) => debug!(
                label = %pair.label,
                content = %pair.content,
                changed = changed.len(),
                "pull"
            ),
        }

        Ok(PullOutcome {
            pair: target,
            summary,
            changed,
        })
    }
}
