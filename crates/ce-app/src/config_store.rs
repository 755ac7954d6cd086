//! In-memory holder of the session's sync configuration.
//!
//! Loaded once at session start and replaced only by explicit user
//! configuration actions; the controller reads a fresh snapshot on every event.

use std::sync::RwLock;

use ce_core::{ManualButtons, SyncConfig};

#[derive(Debug, Default)]
pub struct SyncConfigStore {
    current: RwLock<SyncConfig>,
}

impl SyncConfigStore {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            current: RwLock::new(config),
        }
    }

    pub fn snapshot(&self) -> SyncConfig {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn replace(&self, config: SyncConfig) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
    }

    pub fn manual_buttons(&self) -> ManualButtons {
        ManualButtons::from(&self.snapshot())
    }
}
