//! # ce-core
//!
//! Core domain models and sync policy for ClipEditor.
//!
//! This crate contains the pure mirroring rules between the external clipboard
//! and the editor's local fields, without any infrastructure dependencies.

pub mod app_dirs;
pub mod clip;
pub mod config;
pub mod ports;
pub mod settings;
pub mod sync;

// Re-export commonly used types at the crate root
pub use clip::{ClipSummary, ExternalClip, Field, LocalState, MimeType, TextPair};
pub use config::AppConfig;
pub use settings::model::{Settings, SyncConfig};
pub use settings::SyncSwitch;
pub use sync::{
    DebounceState, GuardToken, ManualButtons, PendingToken, ReentrancyGuard, SyncPhase, Trigger,
    TriggerPolicy,
};
