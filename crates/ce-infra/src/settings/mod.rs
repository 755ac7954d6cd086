pub mod file_repo;
pub mod migration;

pub use file_repo::FileSettingsRepository;
pub use migration::{MigrationV1ToV2, SettingsMigrator};
