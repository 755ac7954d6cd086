use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{MimeType, TextPair};

/// The external store's current value when one is present.
///
/// Absence is modelled by the caller as `Option::<ExternalClip>::None`, never
/// as an empty pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalClip {
    pub pair: TextPair,
    pub mime_types: Vec<MimeType>,
    pub item_count: usize,
}

impl ExternalClip {
    pub fn new(pair: TextPair, mime_types: Vec<MimeType>, item_count: usize) -> Self {
        Self {
            pair,
            mime_types,
            item_count,
        }
    }

    /// A single-item `text/plain` clip, the shape every push produces.
    pub fn plain_text(pair: TextPair) -> Self {
        Self::new(pair, vec![MimeType::text_plain()], 1)
    }

    /// Build a clip from a raw first-item payload.
    ///
    /// A payload that is not valid UTF-8 is coerced to empty content; the
    /// metadata is kept so the clip still reads as present.
    pub fn from_raw(
        label: Option<String>,
        payload: Option<&[u8]>,
        mime_types: Vec<MimeType>,
        item_count: usize,
    ) -> Self {
        let content = match payload.map(std::str::from_utf8) {
            Some(Ok(text)) => text.to_string(),
            Some(Err(err)) => {
                warn!(
                    error = %err,
                    mime_count = mime_types.len(),
                    "clip payload is not text; treating content as empty"
                );
                String::new()
            }
            None => String::new(),
        };

        Self::new(
            TextPair::new(label.unwrap_or_default(), content),
            mime_types,
            item_count,
        )
    }

    pub fn label(&self) -> &str {
        &self.pair.label
    }

    pub fn content(&self) -> &str {
        &self.pair.content
    }
}
