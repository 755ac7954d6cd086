//! Hand-written fakes shared by the controller integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use ce_app::{SyncConfigStore, SyncController, SyncDeps};
use ce_core::ports::{
    DeferredTask, DeferredTaskPort, ExternalChangeHandler, ExternalStorePort, LocalFieldHostPort,
    ResultSinkPort, StoreError, SubscriptionId,
};
use ce_core::{ExternalClip, Field, LocalState, SyncConfig, TextPair};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ------------------- external store -------------------

/// Clipboard stand-in. Writes notify subscribers synchronously, the way a
/// real clipboard echoes our own writes back.
#[derive(Default)]
pub struct FakeStore {
    value: Mutex<Option<ExternalClip>>,
    writes: Mutex<Vec<TextPair>>,
    handlers: Mutex<Vec<(SubscriptionId, Arc<dyn ExternalChangeHandler>)>>,
    next_id: AtomicU64,
    reads: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub malformed: AtomicBool,
    pub clear_unsupported: AtomicBool,
}

impl FakeStore {
    pub fn new(initial: Option<ExternalClip>) -> Self {
        Self {
            value: Mutex::new(initial),
            ..Self::default()
        }
    }

    /// Another application changed the clipboard.
    pub fn external_set(&self, clip: Option<ExternalClip>) {
        *self.value.lock().unwrap() = clip;
        self.notify();
    }

    /// Change the value without notifying, like a clipboard whose watcher
    /// missed an update.
    pub fn set_silently(&self, clip: Option<ExternalClip>) {
        *self.value.lock().unwrap() = clip;
    }

    pub fn value(&self) -> Option<ExternalClip> {
        self.value.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<TextPair> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    fn notify(&self) {
        let handlers: Vec<_> = self
            .handlers
            .lock()
            .unwrap()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler.on_external_change();
        }
    }
}

impl ExternalStorePort for FakeStore {
    fn read(&self) -> Result<Option<ExternalClip>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("clipboard locked".into()));
        }
        if self.malformed.load(Ordering::SeqCst) {
            return Err(StoreError::MalformedValue("image/png".into()));
        }
        Ok(self.value())
    }

    fn write(&self, pair: &TextPair) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("clipboard locked".into()));
        }
        *self.value.lock().unwrap() = Some(ExternalClip::plain_text(pair.clone()));
        self.writes.lock().unwrap().push(pair.clone());
        self.notify();
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.clear_unsupported.load(Ordering::SeqCst) {
            return Err(StoreError::Unsupported("clear"));
        }
        *self.value.lock().unwrap() = None;
        self.notify();
        Ok(())
    }

    fn subscribe(
        &self,
        handler: Arc<dyn ExternalChangeHandler>,
    ) -> Result<SubscriptionId, StoreError> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.handlers.lock().unwrap().push((id, handler));
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.handlers.lock().unwrap().retain(|(existing, _)| *existing != id);
    }
}

// ------------------- editor fields -------------------

/// Text widget host. Like a real widget, `set_field` fires the text-changed
/// callback into the controller, so pulls re-enter `on_local_edit`.
#[derive(Default)]
pub struct FakeFields {
    state: Mutex<LocalState>,
    sets: Mutex<Vec<(Field, String)>>,
    caret_moves: Mutex<Vec<Field>>,
    info: Mutex<Option<String>>,
    controller: Mutex<Option<Weak<SyncController>>>,
    pub panic_on_set: AtomicBool,
}

impl FakeFields {
    pub fn new(initial: LocalState) -> Self {
        Self {
            state: Mutex::new(initial),
            ..Self::default()
        }
    }

    pub fn attach(&self, controller: &Arc<SyncController>) {
        *self.controller.lock().unwrap() = Some(Arc::downgrade(controller));
    }

    /// The user typed `value` into `field`.
    pub fn user_types(&self, field: Field, value: &str) {
        self.state.lock().unwrap().set(field, value);
        self.fire_changed(field);
    }

    pub fn focus(&self, field: Option<Field>) {
        self.state.lock().unwrap().focused = field;
    }

    pub fn pair(&self) -> TextPair {
        self.state.lock().unwrap().to_pair()
    }

    /// Writes made by the controller, in order.
    pub fn sets(&self) -> Vec<(Field, String)> {
        self.sets.lock().unwrap().clone()
    }

    pub fn caret_moves(&self) -> Vec<Field> {
        self.caret_moves.lock().unwrap().clone()
    }

    pub fn info(&self) -> Option<String> {
        self.info.lock().unwrap().clone()
    }

    fn fire_changed(&self, field: Field) {
        let controller = self
            .controller
            .lock()
            .unwrap()
            .as_ref()
            .and_then(Weak::upgrade);
        if let Some(controller) = controller {
            controller.on_local_edit(field);
        }
    }
}

impl LocalFieldHostPort for FakeFields {
    fn get_field(&self, field: Field) -> String {
        self.state.lock().unwrap().get(field).to_string()
    }

    fn set_field(&self, field: Field, value: &str) {
        if self.panic_on_set.load(Ordering::SeqCst) {
            panic!("widget destroyed");
        }
        self.state.lock().unwrap().set(field, value);
        self.sets.lock().unwrap().push((field, value.to_string()));
        self.fire_changed(field);
    }

    fn has_focus(&self, field: Field) -> bool {
        self.state.lock().unwrap().has_focus(field)
    }

    fn set_focus_to_end(&self, field: Field) {
        self.caret_moves.lock().unwrap().push(field);
    }

    fn show_clip_info(&self, info: &str) {
        *self.info.lock().unwrap() = Some(info.to_string());
    }
}

// ------------------- scheduler -------------------

/// Deferred tasks on a virtual clock, run by [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    now: Mutex<Duration>,
    queue: Mutex<Vec<(Duration, u64, DeferredTask)>>,
    seq: AtomicU64,
    fired: AtomicUsize,
}

impl ManualScheduler {
    pub fn advance(&self, by: Duration) {
        let target = *self.now.lock().unwrap() + by;
        loop {
            let next = {
                let mut queue = self.queue.lock().unwrap();
                let due = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, seq, _))| (*at, *seq))
                    .map(|(index, _)| index);
                due.map(|index| queue.remove(index))
            };
            let Some((at, _, task)) = next else { break };
            *self.now.lock().unwrap() = at;
            task();
            self.fired.fetch_add(1, Ordering::SeqCst);
        }
        *self.now.lock().unwrap() = target;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    pub fn fired(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}

impl DeferredTaskPort for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        let due = *self.now.lock().unwrap() + delay;
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        self.queue.lock().unwrap().push((due, seq, task));
    }
}

// ------------------- result sink -------------------

#[derive(Default)]
pub struct RecordingSink {
    published: Mutex<Vec<TextPair>>,
}

impl RecordingSink {
    pub fn published(&self) -> Vec<TextPair> {
        self.published.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<TextPair> {
        self.published.lock().unwrap().last().cloned()
    }
}

impl ResultSinkPort for RecordingSink {
    fn publish(&self, pair: &TextPair) {
        self.published.lock().unwrap().push(pair.clone());
    }
}

// ------------------- harness -------------------

pub struct Harness {
    pub store: Arc<FakeStore>,
    pub fields: Arc<FakeFields>,
    pub scheduler: Arc<ManualScheduler>,
    pub config: Arc<SyncConfigStore>,
    pub sink: Arc<RecordingSink>,
    pub controller: Arc<SyncController>,
}

impl Harness {
    pub fn new(config: SyncConfig, external: Option<ExternalClip>, local: LocalState) -> Self {
        init_tracing();

        let store = Arc::new(FakeStore::new(external));
        let fields = Arc::new(FakeFields::new(local));
        let scheduler = Arc::new(ManualScheduler::default());
        let config = Arc::new(SyncConfigStore::new(config));
        let sink = Arc::new(RecordingSink::default());

        let controller = SyncController::new(SyncDeps {
            store: store.clone(),
            fields: fields.clone(),
            scheduler: scheduler.clone(),
            config: config.clone(),
            result_sink: Some(sink.clone()),
        });
        fields.attach(&controller);

        Self {
            store,
            fields,
            scheduler,
            config,
            sink,
            controller,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SyncConfig::default(), None, LocalState::default())
    }

    /// A session already subscribed to store changes.
    pub fn started(config: SyncConfig, external: Option<ExternalClip>, local: LocalState) -> Self {
        let harness = Self::new(config, external, local);
        harness.controller.start_session(None);
        harness
    }
}

pub fn local(label: &str, content: &str) -> LocalState {
    LocalState {
        label: label.to_string(),
        content: content.to_string(),
        focused: None,
    }
}
