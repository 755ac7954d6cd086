//! Clipboard value models shared by both sides of the mirror.

mod external;
mod field;
mod mime;
mod summary;
mod text_pair;

pub use external::ExternalClip;
pub use field::{Field, LocalState};
pub use mime::MimeType;
pub use summary::{ClipSummary, EMPTY_MARKER};
pub use text_pair::TextPair;
