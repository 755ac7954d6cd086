//! Terminal stand-ins for the editor window.
//!
//! The two fields live in memory. With `echo` on, every change the sync
//! controller makes is printed, which is what `watch` shows the user.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use ce_app::{Propagation, SyncController};
use ce_core::ports::{LocalFieldHostPort, ResultSinkPort};
use ce_core::{Field, LocalState, TextPair};
use tracing::trace;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct TerminalFields {
    state: Mutex<LocalState>,
    info: Mutex<String>,
    echo: bool,
    controller: Mutex<Option<Weak<SyncController>>>,
}

impl TerminalFields {
    pub fn new(echo: bool) -> Self {
        Self {
            state: Mutex::new(LocalState::default()),
            info: Mutex::new(String::new()),
            echo,
            controller: Mutex::new(None),
        }
    }

    /// Route text-changed callbacks to `controller`.
    pub fn attach(&self, controller: &Arc<SyncController>) {
        *lock(&self.controller) = Some(Arc::downgrade(controller));
    }

    /// Fill the fields without raising change callbacks, as a window does
    /// when it is first populated.
    pub fn load(&self, pair: &TextPair) {
        let mut state = lock(&self.state);
        state.label = pair.label.clone();
        state.content = pair.content.clone();
    }

    /// The user typed `value` into `field`.
    pub fn user_edit(&self, field: Field, value: &str) -> Option<Propagation> {
        lock(&self.state).set(field, value);
        self.changed(field)
    }

    pub fn snapshot(&self) -> LocalState {
        lock(&self.state).clone()
    }

    pub fn info(&self) -> String {
        lock(&self.info).clone()
    }

    fn changed(&self, field: Field) -> Option<Propagation> {
        let controller = lock(&self.controller).as_ref().and_then(Weak::upgrade)?;
        Some(controller.on_local_edit(field))
    }
}

impl LocalFieldHostPort for TerminalFields {
    fn get_field(&self, field: Field) -> String {
        lock(&self.state).get(field).to_string()
    }

    fn set_field(&self, field: Field, value: &str) {
        lock(&self.state).set(field, value);
        if self.echo {
            println!("{field}: {value}");
        }
        self.changed(field);
    }

    fn has_focus(&self, field: Field) -> bool {
        lock(&self.state).has_focus(field)
    }

    fn set_focus_to_end(&self, field: Field) {
        trace!(%field, "caret moved to end");
    }

    fn show_clip_info(&self, info: &str) {
        *lock(&self.info) = info.to_string();
        if self.echo {
            println!("info: {}", info.replace('\n', " | "));
        }
    }
}

/// Keeps the latest published pair for a caller that wants one value back.
#[derive(Default)]
pub struct LastResultSink {
    last: Mutex<Option<TextPair>>,
}

impl LastResultSink {
    pub fn take(&self) -> Option<TextPair> {
        lock(&self.last).take()
    }
}

impl ResultSinkPort for LastResultSink {
    fn publish(&self, pair: &TextPair) {
        *lock(&self.last) = Some(pair.clone());
    }
}
