//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - Define the process-level configuration read at startup
//! - Provide TOML → DTO mapping
//!
//! No validation and no default calculation happens here: an empty path is a
//! fact the bootstrap layer resolves, not an error.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Settings file path (may be empty - the caller picks the platform default)
    pub settings_path: PathBuf,

    /// Tracing filter directives, e.g. `debug,ce_platform=info` (may be empty)
    pub log_filter: String,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            settings_path: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("settings_path"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_filter: toml_value
                .get("logging")
                .and_then(|l| l.get("filter"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
        })
    }

    /// Create empty AppConfig (all empty values)
    pub fn empty() -> Self {
        Self {
            settings_path: PathBuf::new(),
            log_filter: String::new(),
        }
    }

    /// Create AppConfig with paths under a platform data directory.
    ///
    /// The base directory is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            settings_path: data_dir.join("settings.json"),
            log_filter: String::new(),
        }
    }
}
