//! Use case for loading the sync settings at session start
//! 会话开始时加载同步设置的用例

use std::sync::Arc;

use ce_core::ports::SettingsPort;
use ce_core::settings::model::Settings;
use tracing::{info, info_span, warn, Instrument};

use crate::SyncConfigStore;

/// Loads persisted settings and installs their sync section as the session's
/// configuration.
///
/// ## Behavior / 行为
/// - A load failure is logged and replaced by [`Settings::default`]
/// - The in-memory [`SyncConfigStore`] always ends up holding what is returned
pub struct GetSyncSettings {
    settings: Arc<dyn SettingsPort>,
    config: Arc<SyncConfigStore>,
}

impl GetSyncSettings {
    pub fn new(settings: Arc<dyn SettingsPort>, config: Arc<SyncConfigStore>) -> Self {
        Self { settings, config }
    }

    pub async fn execute(&self) -> Settings {
        let span = info_span!("usecase.get_sync_settings.execute");

        async {
            let settings = match self.settings.load().await {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(error = %err, "Failed to load settings; using defaults");
                    Settings::default()
                }
            };

            self.config.replace(settings.sync.clone());
            info!(
                push_delay_ms = settings.sync.push_delay_ms,
                "Sync settings loaded"
            );
            settings
        }
        .instrument(span)
        .await
    }
}
