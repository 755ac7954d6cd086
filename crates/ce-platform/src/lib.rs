//! # ce-platform
//!
//! Platform-specific implementations for ClipEditor.
//!
//! This crate contains the adapters that talk to the operating system: the
//! system clipboard, its change watcher, the single-threaded dispatch loop
//! and the per-user data directory.

pub mod app_dirs;
pub mod clipboard;
pub mod runtime;

pub use app_dirs::DirsAppDirsAdapter;
pub use clipboard::{ClipboardWatchHandle, SystemClipboardStore};
pub use runtime::{dispatch_channel, DispatchLoop, DispatchSender, TokioDeferredScheduler};
