use super::model::*;

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sync_on_external_change: true,
            sync_on_local_edit: true,
            sync_on_app_start: true,
            sync_on_focus_lost: false,
            show_manual_push_button: false,
            show_manual_pull_button: false,
            push_delay_ms: 0,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            sync: SyncConfig::default(),
            legacy_auto_sync: None,
        }
    }
}
