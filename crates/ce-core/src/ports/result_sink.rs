use crate::clip::TextPair;

/// Outbound channel for a caller that launched the editor expecting a value
/// back (e.g. a "process selected text" entry point).
pub trait ResultSinkPort: Send + Sync {
    fn publish(&self, pair: &TextPair);
}
