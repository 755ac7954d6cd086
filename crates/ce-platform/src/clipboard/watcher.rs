use std::sync::{Arc, Weak};

use anyhow::Result;
use clipboard_rs::{
    ClipboardHandler, ClipboardWatcher as RSClipboardWatcher, ClipboardWatcherContext,
    WatcherShutdown,
};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::SystemClipboardStore;
use crate::runtime::DispatchSender;

/// Forwards OS clipboard notifications onto the dispatch loop.
struct ClipboardWatcher {
    store: Weak<SystemClipboardStore>,
    dispatch: DispatchSender,
}

impl ClipboardHandler for ClipboardWatcher {
    fn on_clipboard_change(&mut self) {
        let store = self.store.clone();
        let posted = self.dispatch.post(Box::new(move || {
            if let Some(store) = store.upgrade() {
                store.notify_subscribers();
            }
        }));
        if !posted {
            debug!("clipboard change after dispatch loop closed; ignored");
        }
    }
}

pub struct ClipboardWatchHandle {
    shutdown: Option<WatcherShutdown>,
    join: Option<JoinHandle<()>>,
}

impl ClipboardWatchHandle {
    /// Stop the OS watcher and wait for its thread to finish.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.stop();
        }
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
        info!("Clipboard watcher stopped");
    }
}

/// Start watching the system clipboard on a blocking thread.
pub fn start_watching(
    store: &Arc<SystemClipboardStore>,
    dispatch: DispatchSender,
) -> Result<ClipboardWatchHandle> {
    let mut watcher_ctx = ClipboardWatcherContext::new()
        .map_err(|e| anyhow::anyhow!("Failed to create watcher context: {}", e))?;

    let handler = ClipboardWatcher {
        store: Arc::downgrade(store),
        dispatch,
    };
    let shutdown = watcher_ctx.add_handler(handler).get_shutdown_channel();

    let join = tokio::task::spawn_blocking(move || {
        info!("start clipboard watch");
        watcher_ctx.start_watch();
        info!("clipboard watch stopped");
    });

    Ok(ClipboardWatchHandle {
        shutdown: Some(shutdown),
        join: Some(join),
    })
}
