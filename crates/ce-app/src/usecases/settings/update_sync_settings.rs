//! Use case for updating the sync settings
//! 更新同步设置的用例

use std::sync::Arc;

use anyhow::{Context, Result};
use ce_core::ports::SettingsPort;
use ce_core::settings::model::{Settings, SyncConfig, CURRENT_SCHEMA_VERSION};
use ce_core::SyncSwitch;
use tracing::{info, info_span, warn, Instrument};

use crate::SyncConfigStore;

/// Use case for updating the sync settings.
///
/// ## Behavior / 行为
/// - Loads the persisted settings for comparison
/// - Rejects settings carrying a stale schema version
/// - Logs changed fields with old/new values
/// - Persists, then replaces the in-memory configuration
///
/// A failed save leaves the session running on its previous configuration.
pub struct UpdateSyncSettings {
    settings: Arc<dyn SettingsPort>,
    config: Arc<SyncConfigStore>,
}

impl UpdateSyncSettings {
    pub fn new(settings: Arc<dyn SettingsPort>, config: Arc<SyncConfigStore>) -> Self {
        Self { settings, config }
    }

    pub async fn execute(&self, settings: Settings) -> Result<()> {
        let span = info_span!("usecase.update_sync_settings.execute");

        async {
            if settings.schema_version != CURRENT_SCHEMA_VERSION {
                return Err(anyhow::anyhow!(
                    "Invalid schema version: expected {}, got {}",
                    CURRENT_SCHEMA_VERSION,
                    settings.schema_version
                ));
            }

            let old = self.load_for_diff().await;
            let changes = SyncConfigDiff::diff(&old.sync, &settings.sync);
            if changes.is_empty() {
                info!("Updating sync settings (no changes detected)");
            } else {
                info!(changed_fields = %changes.to_log_string("sync"), "Updating sync settings");
            }

            self.settings
                .save(&settings)
                .await
                .context("failed to persist sync settings")?;
            self.config.replace(settings.sync);

            info!("Sync settings updated successfully");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Flip a single switch, keeping everything else as persisted.
    pub async fn set_switch(&self, switch: SyncSwitch, value: bool) -> Result<Settings> {
        let mut settings = self.load_for_diff().await;
        settings.sync.set(switch, value);
        self.execute(settings.clone()).await?;
        Ok(settings)
    }

    pub async fn set_push_delay(&self, push_delay_ms: u64) -> Result<Settings> {
        let mut settings = self.load_for_diff().await;
        settings.sync.push_delay_ms = push_delay_ms;
        self.execute(settings.clone()).await?;
        Ok(settings)
    }

    /// Persisted settings, or the session's live configuration when the store
    /// cannot be read.
    async fn load_for_diff(&self) -> Settings {
        match self.settings.load().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    error = %err,
                    "Failed to load settings; diffing against the live configuration"
                );
                Settings {
                    sync: self.config.snapshot(),
                    ..Settings::default()
                }
            }
        }
    }
}

/// Changed entries of a [`SyncConfig`]
struct SyncConfigDiff {
    switches: Vec<(SyncSwitch, bool, bool)>,
    push_delay_ms: Option<(u64, u64)>,
}

impl SyncConfigDiff {
    fn diff(old: &SyncConfig, new: &SyncConfig) -> Self {
        let switches = SyncSwitch::ALL
            .into_iter()
            .filter(|switch| old.get(*switch) != new.get(*switch))
            .map(|switch| (switch, old.get(switch), new.get(switch)))
            .collect();
        let push_delay_ms = (old.push_delay_ms != new.push_delay_ms)
            .then_some((old.push_delay_ms, new.push_delay_ms));

        Self {
            switches,
            push_delay_ms,
        }
    }

    fn is_empty(&self) -> bool {
        self.switches.is_empty() && self.push_delay_ms.is_none()
    }

    fn to_log_string(&self, prefix: &str) -> String {
        let mut parts: Vec<String> = self
            .switches
            .iter()
            .map(|(switch, old, new)| format!("{}.{}: {} → {}", prefix, switch.key(), old, new))
            .collect();

        if let Some((old, new)) = &self.push_delay_ms {
            parts.push(format!("{}.push_delay_ms: {} → {}", prefix, old, new));
        }

        if parts.is_empty() {
            "(no changes)".to_string()
        } else {
            parts.join(", ")
        }
    }
}
