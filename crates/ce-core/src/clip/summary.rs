use super::ExternalClip;

/// Marker shown in the extra-info display when there is nothing to describe.
pub const EMPTY_MARKER: &str = "[empty]";

const MIME_SEPARATOR: &str = " - ";

/// Human readable description of the clip metadata, shown next to the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipSummary(String);

impl ClipSummary {
    /// Summary of an absent clip.
    pub fn empty() -> Self {
        Self(EMPTY_MARKER.to_string())
    }

    pub fn of(clip: Option<&ExternalClip>) -> Self {
        let Some(clip) = clip else {
            return Self::empty();
        };

        let mut text = if clip.mime_types.is_empty() {
            EMPTY_MARKER.to_string()
        } else {
            clip.mime_types
                .iter()
                .map(|mime| mime.as_str())
                .collect::<Vec<_>>()
                .join(MIME_SEPARATOR)
        };

        if clip.item_count > 1 {
            text.push_str(&format!("\nItem count = {}", clip.item_count));
        }

        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
