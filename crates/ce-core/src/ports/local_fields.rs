use crate::clip::Field;

/// The UI layer holding the two editable fields.
///
/// `set_field` followed by `get_field` on the same field returns the value
/// unchanged. Hosts typically re-enter the controller's local-edit handler
/// from inside `set_field`.
pub trait LocalFieldHostPort: Send + Sync {
    fn get_field(&self, field: Field) -> String;

    fn set_field(&self, field: Field, value: &str);

    fn has_focus(&self, field: Field) -> bool;

    /// Move the caret of a focused field to the end of its text.
    fn set_focus_to_end(&self, field: Field);

    /// Update the extra-info line describing the clip metadata.
    fn show_clip_info(&self, info: &str);
}
