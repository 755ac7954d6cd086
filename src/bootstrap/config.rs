//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read the optional TOML configuration file / 读取可选的 TOML 配置文件
//! - Fill empty values with platform defaults / 用平台默认值补全空值
//!
//! Loading accepts whatever is in the file. Empty values are facts; only
//! [`resolve_app_config`] turns them into platform paths.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ce_core::config::AppConfig;
use ce_core::ports::AppDirsPort;
use ce_platform::DirsAppDirsAdapter;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Configuration for this run: the file when given, platform defaults for
/// anything it leaves empty.
pub fn resolve_app_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    resolve_with(config_path, &DirsAppDirsAdapter::new())
}

fn resolve_with(config_path: Option<&Path>, dirs: &dyn AppDirsPort) -> anyhow::Result<AppConfig> {
    let mut config = match config_path {
        Some(path) => load_config(path.to_path_buf())?,
        None => AppConfig::empty(),
    };

    if config.settings_path.as_os_str().is_empty() {
        let app_dirs = dirs
            .get_app_dirs()
            .context("Failed to resolve the application data directory")?;
        config.settings_path = app_dirs.settings_path();
    }

    Ok(config)
}
