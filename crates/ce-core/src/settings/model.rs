use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Independently toggleable sync triggers.
///
/// Read fresh on every event, so a change applies to the very next event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Pull when the external clipboard reports a change.
    pub sync_on_external_change: bool,

    /// Push when either local field is edited.
    pub sync_on_local_edit: bool,

    /// Pull on the first focus of the session.
    pub sync_on_app_start: bool,

    /// Push when the editor loses focus.
    pub sync_on_focus_lost: bool,

    pub show_manual_push_button: bool,
    pub show_manual_pull_button: bool,

    /// Debounce delay for edit-triggered pushes; `0` pushes immediately.
    pub push_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub sync: SyncConfig,

    /// Single on/off switch used by schema v1, before triggers were split.
    #[serde(default, rename = "auto_sync", skip_serializing_if = "Option::is_none")]
    pub legacy_auto_sync: Option<bool>,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
