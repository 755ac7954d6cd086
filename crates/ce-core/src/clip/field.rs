use std::fmt;

use serde::{Deserialize, Serialize};

use super::TextPair;

/// One of the two editable fields of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Label,
    Content,
}

impl Field {
    /// Fields in the order a pull applies them.
    pub const ALL: [Field; 2] = [Field::Label, Field::Content];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Label => "label",
            Field::Content => "content",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the editor side: the two fields and which one holds focus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalState {
    pub label: String,
    pub content: String,
    pub focused: Option<Field>,
}

impl LocalState {
    pub fn to_pair(&self) -> TextPair {
        TextPair::new(self.label.clone(), self.content.clone())
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Label => &self.label,
            Field::Content => &self.content,
        }
    }

    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Label => self.label = value.to_string(),
            Field::Content => self.content = value.to_string(),
        }
    }

    pub fn has_focus(&self, field: Field) -> bool {
        self.focused == Some(field)
    }
}
