//! Sync settings use cases
//! 同步设置用例

mod get_sync_settings;
mod update_sync_settings;

pub use get_sync_settings::GetSyncSettings;
pub use update_sync_settings::UpdateSyncSettings;
