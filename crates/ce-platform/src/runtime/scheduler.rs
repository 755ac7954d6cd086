use std::time::Duration;

use ce_core::ports::{DeferredTask, DeferredTaskPort};
use tokio::runtime::Handle;

use super::DispatchSender;

/// Sleeps on the tokio runtime, then hands the task to the dispatch loop.
///
/// Timers are never cancelled; a superseded task still arrives and is
/// expected to check its own token.
pub struct TokioDeferredScheduler {
    handle: Handle,
    dispatch: DispatchSender,
}

impl TokioDeferredScheduler {
    pub fn new(handle: Handle, dispatch: DispatchSender) -> Self {
        Self { handle, dispatch }
    }
}

impl DeferredTaskPort for TokioDeferredScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        let dispatch = self.dispatch.clone();
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            dispatch.post(task);
        });
    }
}
