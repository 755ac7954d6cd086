mod store;
mod watcher;

pub use store::{SystemClipboardStore, LABEL_FORMAT};
pub use watcher::{start_watching, ClipboardWatchHandle};
