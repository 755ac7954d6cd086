use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::model::SyncConfig;

/// A single boolean entry of [`SyncConfig`], addressable by its stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncSwitch {
    ExternalChange,
    LocalEdit,
    AppStart,
    FocusLost,
    ManualPushButton,
    ManualPullButton,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sync switch: {0}")]
pub struct UnknownSwitch(pub String);

impl SyncSwitch {
    pub const ALL: [SyncSwitch; 6] = [
        SyncSwitch::ExternalChange,
        SyncSwitch::LocalEdit,
        SyncSwitch::AppStart,
        SyncSwitch::FocusLost,
        SyncSwitch::ManualPushButton,
        SyncSwitch::ManualPullButton,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SyncSwitch::ExternalChange => "sync_on_external_change",
            SyncSwitch::LocalEdit => "sync_on_local_edit",
            SyncSwitch::AppStart => "sync_on_app_start",
            SyncSwitch::FocusLost => "sync_on_focus_lost",
            SyncSwitch::ManualPushButton => "show_manual_push_button",
            SyncSwitch::ManualPullButton => "show_manual_pull_button",
        }
    }
}

impl fmt::Display for SyncSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SyncSwitch {
    type Err = UnknownSwitch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyncSwitch::ALL
            .into_iter()
            .find(|switch| switch.key() == s.trim())
            .ok_or_else(|| UnknownSwitch(s.to_string()))
    }
}

impl SyncConfig {
    pub fn get(&self, switch: SyncSwitch) -> bool {
        match switch {
            SyncSwitch::ExternalChange => self.sync_on_external_change,
            SyncSwitch::LocalEdit => self.sync_on_local_edit,
            SyncSwitch::AppStart => self.sync_on_app_start,
            SyncSwitch::FocusLost => self.sync_on_focus_lost,
            SyncSwitch::ManualPushButton => self.show_manual_push_button,
            SyncSwitch::ManualPullButton => self.show_manual_pull_button,
        }
    }

    pub fn set(&mut self, switch: SyncSwitch, value: bool) {
        let slot = match switch {
            SyncSwitch::ExternalChange => &mut self.sync_on_external_change,
            SyncSwitch::LocalEdit => &mut self.sync_on_local_edit,
            SyncSwitch::AppStart => &mut self.sync_on_app_start,
            SyncSwitch::FocusLost => &mut self.sync_on_focus_lost,
            SyncSwitch::ManualPushButton => &mut self.show_manual_push_button,
            SyncSwitch::ManualPullButton => &mut self.show_manual_pull_button,
        };
        *slot = value;
    }
}
