//! User-facing settings: which triggers sync and how long pushes wait.

pub mod defaults;
pub mod model;
pub mod switch;
pub mod version;

pub use model::{Settings, SyncConfig, CURRENT_SCHEMA_VERSION};
pub use switch::{SyncSwitch, UnknownSwitch};
pub use version::SettingsVersion;
