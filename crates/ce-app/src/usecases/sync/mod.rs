mod apply_inbound;
mod clear_external;
mod pull_external;
mod push_local;

pub use apply_inbound::{ApplyInboundRequestUseCase, InboundOutcome};
pub use clear_external::{ClearExternalUseCase, ClearOutcome};
pub use pull_external::{PullExternalUseCase, PullOutcome};
pub use push_local::PushLocalUseCase;

use ce_core::ports::LocalFieldHostPort;
use ce_core::Field;

/// Set `field` to `value` only when it differs, keeping a focused field's
/// caret at the end of the new text.
///
/// Returns whether the field was written.
pub(crate) fn apply_field(fields: &dyn LocalFieldHostPort, field: Field, value: &str) -> bool {
    if fields.get_field(field) == value {
        return false;
    }

    fields.set_field(field, value);
    if fields.has_focus(field) {
        fields.set_focus_to_end(field);
    }
    true
}
