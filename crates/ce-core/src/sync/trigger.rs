use std::fmt;

use crate::settings::SyncConfig;

/// A named event that may cause a pull or a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    ExternalChange,
    LocalEdit,
    /// First focus gained in a session.
    AppStart,
    FocusLost,
    ManualPush,
    ManualPull,
    /// Another entry point handed the editor an explicit pair.
    InboundRequest,
}

impl Trigger {
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::ExternalChange => "external_change",
            Trigger::LocalEdit => "local_edit",
            Trigger::AppStart => "app_start",
            Trigger::FocusLost => "focus_lost",
            Trigger::ManualPush => "manual_push",
            Trigger::ManualPull => "manual_pull",
            Trigger::InboundRequest => "inbound_request",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure lookup of whether a trigger is enabled under a configuration.
pub struct TriggerPolicy;

impl TriggerPolicy {
    /// Explicit user actions and inbound requests are always active; the
    /// `show_manual_*` switches only decide whether the buttons are shown.
    pub fn is_active(trigger: Trigger, config: &SyncConfig) -> bool {
        match trigger {
            Trigger::ExternalChange => config.sync_on_external_change,
            Trigger::LocalEdit => config.sync_on_local_edit,
            Trigger::AppStart => config.sync_on_app_start,
            Trigger::FocusLost => config.sync_on_focus_lost,
            Trigger::ManualPush | Trigger::ManualPull | Trigger::InboundRequest => true,
        }
    }
}

/// Visibility of the manual sync buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualButtons {
    pub push: bool,
    pub pull: bool,
}

impl From<&SyncConfig> for ManualButtons {
    fn from(config: &SyncConfig) -> Self {
        Self {
            push: config.show_manual_push_button,
            pull: config.show_manual_pull_button,
        }
    }
}
