use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn settings_path(&self) -> PathBuf {
        self.app_data_root.join("settings.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }
}
