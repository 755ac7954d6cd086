use anyhow::{anyhow, Result};
use ce_core::ports::SettingsMigrationPort;
use ce_core::settings::model::{Settings, CURRENT_SCHEMA_VERSION};
use ce_core::settings::SettingsVersion;
use tracing::info;

pub struct SettingsMigrator {
    migrations: Vec<Box<dyn SettingsMigrationPort>>,
}

impl Default for SettingsMigrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsMigrator {
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(MigrationV1ToV2)],
        }
    }

    pub fn migrate_to_latest(&self, mut settings: Settings) -> Result<Settings> {
        loop {
            let current = settings.schema_version;

            if current >= CURRENT_SCHEMA_VERSION {
                break;
            }

            let migration = self
                .migrations
                .iter()
                .find(|m| m.from_version() == current)
                .ok_or_else(|| anyhow!("no migration found from version {}", current))?;

            settings = migration.migrate(settings);
            info!(
                from = current,
                to = migration.to_version(),
                "Settings schema migrated"
            );
        }

        Ok(settings)
    }
}

/// v1 had a single `auto_sync` switch driving every automatic trigger.
///
/// `auto_sync = false` turns off external change, local edit and app start.
/// Focus lost and the manual buttons did not exist and keep their defaults.
pub struct MigrationV1ToV2;

impl SettingsMigrationPort for MigrationV1ToV2 {
    fn from_version(&self) -> u32 {
        SettingsVersion::V1.as_u32()
    }

    fn to_version(&self) -> u32 {
        SettingsVersion::V2.as_u32()
    }

    fn migrate(&self, mut settings: Settings) -> Settings {
        if let Some(auto_sync) = settings.legacy_auto_sync.take() {
            settings.sync.sync_on_external_change = auto_sync;
            settings.sync.sync_on_local_edit = auto_sync;
            settings.sync.sync_on_app_start = auto_sync;
        }
        settings.schema_version = self.to_version();
        settings
    }
}
