use ce_core::ports::DeferredTask;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Posting side of the dispatch queue. Cheap to clone.
#[derive(Clone)]
pub struct DispatchSender {
    tx: mpsc::UnboundedSender<DeferredTask>,
}

impl DispatchSender {
    /// Queue `task`. Returns `false` once the loop is gone.
    pub fn post(&self, task: DeferredTask) -> bool {
        if self.tx.send(task).is_err() {
            trace!("dispatch loop closed; task discarded");
            return false;
        }
        true
    }
}

pub struct DispatchLoop {
    rx: mpsc::UnboundedReceiver<DeferredTask>,
}

pub fn dispatch_channel() -> (DispatchSender, DispatchLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DispatchSender { tx }, DispatchLoop { rx })
}

impl DispatchLoop {
    /// Next queued task, for callers multiplexing the loop with other input.
    pub async fn recv(&mut self) -> Option<DeferredTask> {
        self.rx.recv().await
    }

    /// Wait for the next task and run it. `false` when every sender is gone.
    pub async fn run_next(&mut self) -> bool {
        match self.recv().await {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run whatever is queued right now without waiting.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Run tasks until every sender has been dropped.
    pub async fn run(mut self) {
        while self.run_next().await {}
        debug!("dispatch loop finished");
    }
}
