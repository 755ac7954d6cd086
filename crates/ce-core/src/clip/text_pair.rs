use serde::{Deserialize, Serialize};

use super::Field;

/// The unit of data moved between the external store and the local fields.
///
/// Once captured a `TextPair` is never mutated; a newer value is a new pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextPair {
    pub label: String,
    pub content: String,
}

impl TextPair {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
        }
    }

    /// A pair with no label, as produced by a plain text copy.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(String::new(), content)
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Label => &self.label,
            Field::Content => &self.content,
        }
    }
}
