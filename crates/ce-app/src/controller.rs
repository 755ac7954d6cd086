//! Sync controller
//!
//! Turns editor and store events into guarded propagations.
//!
//! # Architecture / 架构
//!
//! ```text
//! ExternalChange / AppStart / ManualPull / InboundRequest ──→ pull
//! LocalEdit (debounced) / FocusLost / ManualPush ──────────→ push
//!                        │
//!                 ReentrancyGuard: Idle ⇄ Propagating
//! ```
//!
//! Everything runs on the thread that dispatches UI events. The deferred push
//! is the only suspension point and is never cancelled: it carries the debounce
//! token it was scheduled with and does nothing if a newer edit came in since.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use ce_core::ports::{
    DeferredTaskPort, ExternalChangeHandler, ExternalStorePort, LocalFieldHostPort,
    ResultSinkPort, StoreError, SubscriptionId,
};
use ce_core::sync::PushPlan;
use ce_core::{
    DebounceState, Field, ManualButtons, PendingToken, ReentrancyGuard, SyncPhase, TextPair,
    Trigger, TriggerPolicy,
};
use tracing::{debug, info, trace, warn};

use crate::usecases::sync::{
    ApplyInboundRequestUseCase, ClearExternalUseCase, ClearOutcome, InboundOutcome,
    PullExternalUseCase, PullOutcome, PushLocalUseCase,
};
use crate::{SyncConfigStore, SyncDeps};

/// Why an event did not propagate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The trigger's switch is off.
    Disabled(Trigger),
    /// Another propagation holds the guard.
    Busy,
    /// A newer edit replaced this deferred push.
    Superseded,
    /// The app-start pull already ran this session.
    AlreadyStarted,
    /// No inbound pair was supplied.
    NoRequest,
}

/// What an event ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Propagation {
    Pulled(PullOutcome),
    Pushed(TextPair),
    Scheduled { token: PendingToken, delay: Duration },
    Cleared(ClearOutcome),
    Inbound(InboundOutcome),
    Skipped(SkipReason),
    Failed(StoreError),
}

pub struct SyncController {
    this: Weak<SyncController>,

    guard: ReentrancyGuard,
    debounce: DebounceState,
    config: Arc<SyncConfigStore>,

    /// One-shot: set by the first focus-gained event of the session, cleared
    /// by `start_session`.
    app_start_consumed: AtomicBool,
    subscription: Mutex<Option<SubscriptionId>>,

    store: Arc<dyn ExternalStorePort>,
    fields: Arc<dyn LocalFieldHostPort>,
    scheduler: Arc<dyn DeferredTaskPort>,
    result_sink: Option<Arc<dyn ResultSinkPort>>,

    pull: PullExternalUseCase,
    push: PushLocalUseCase,
    clear: ClearExternalUseCase,
    inbound: ApplyInboundRequestUseCase,
}

impl SyncController {
    pub fn new(deps: SyncDeps) -> Arc<Self> {
        let SyncDeps {
            store,
            fields,
            scheduler,
            config,
            result_sink,
        } = deps;

        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            guard: ReentrancyGuard::new(),
            debounce: DebounceState::new(),
            config,
            app_start_consumed: AtomicBool::new(false),
            subscription: Mutex::new(None),
            pull: PullExternalUseCase::new(store.clone(), fields.clone()),
            push: PushLocalUseCase::new(store.clone(), fields.clone()),
            clear: ClearExternalUseCase::new(store.clone(), fields.clone()),
            inbound: ApplyInboundRequestUseCase::new(store.clone(), fields.clone()),
            store,
            fields,
            scheduler,
            result_sink,
        })
    }

    // ------------------- session -------------------

    /// Subscribe to store notifications and handle the launch request.
    ///
    /// Session state starts fresh: the app-start pull is armed again and the
    /// debounce counter restarts, so timers from an earlier session are stale.
    /// A store that cannot deliver notifications is logged and tolerated; the
    /// manual and focus triggers keep working.
    pub fn start_session(&self, inbound: Option<TextPair>) -> Propagation {
        self.app_start_consumed.store(false, Ordering::Release);
        self.debounce.reset();

        let handler = Arc::new(ChangeSubscriber(self.this.clone()));
        match self.store.subscribe(handler) {
            Ok(id) => {
                if let Some(previous) = self.lock_subscription().replace(id) {
                    self.store.unsubscribe(previous);
                }
                info!(subscription = %id, "subscribed to external store changes");
            }
            Err(err) => warn!(error = %err, "external change notifications unavailable"),
        }

        self.handle_inbound_request(inbound)
    }

    pub fn end_session(&self) {
        if let Some(id) = self.lock_subscription().take() {
            self.store.unsubscribe(id);
            info!(subscription = %id, "unsubscribed from external store changes");
        }
    }

    /// A pair handed over at launch or on a later activation.
    ///
    /// `None` leaves startup to the regular app-start pull.
    pub fn handle_inbound_request(&self, request: Option<TextPair>) -> Propagation {
        let Some(pair) = request else {
            trace!("no inbound request");
            return Propagation::Skipped(SkipReason::NoRequest);
        };

        let Some(token) = self.guard.try_acquire() else {
            debug!(trigger = %Trigger::InboundRequest, "dropped; propagation in flight");
            return Propagation::Skipped(SkipReason::Busy);
        };

        let result = match self.inbound.execute(&token, &pair) {
            InboundOutcome::Stored => self
                .pull
                .execute(&token, Trigger::InboundRequest)
                .map(Propagation::Pulled),
            fallback => Ok(Propagation::Inbound(fallback)),
        };
        drop(token);

        self.settle(Trigger::InboundRequest, result)
    }

    // ------------------- external side -------------------

    pub fn on_external_change(&self) -> Propagation {
        if !self.is_active(Trigger::ExternalChange) {
            return Propagation::Skipped(SkipReason::Disabled(Trigger::ExternalChange));
        }
        self.pull_now(Trigger::ExternalChange)
    }

    // ------------------- local side -------------------

    /// A field was edited. Hosts call this from their text-changed callback,
    /// including when the change came from a pull.
    pub fn on_local_edit(&self, field: Field) -> Propagation {
        if self.guard.is_held() {
            trace!(%field, "edit written by an in-flight propagation; dropped");
            return Propagation::Skipped(SkipReason::Busy);
        }

        self.publish_result();

        let config = self.config.snapshot();
        if !TriggerPolicy::is_active(Trigger::LocalEdit, &config) {
            return Propagation::Skipped(SkipReason::Disabled(Trigger::LocalEdit));
        }

        match self.debounce.plan(config.push_delay_ms) {
            PushPlan::Immediate(_) => self.push_now(Trigger::LocalEdit),
            PushPlan::Deferred { token, delay } => {
                let this = self.this.clone();
                self.scheduler.schedule(
                    delay,
                    Box::new(move || {
                        if let Some(controller) = this.upgrade() {
                            controller.fire_deferred_push(token);
                        }
                    }),
                );
                debug!(
                    %field,
                    token = token.value(),
                    delay_ms = delay.as_millis() as u64,
                    "push deferred"
                );
                Propagation::Scheduled { token, delay }
            }
        }
    }

    pub fn on_focus_gained(&self) -> Propagation {
        if self.app_start_consumed.swap(true, Ordering::AcqRel) {
            trace!("refocus; app-start pull already consumed");
            return Propagation::Skipped(SkipReason::AlreadyStarted);
        }
        if !self.is_active(Trigger::AppStart) {
            return Propagation::Skipped(SkipReason::Disabled(Trigger::AppStart));
        }
        self.pull_now(Trigger::AppStart)
    }

    pub fn on_focus_lost(&self) -> Propagation {
        if !self.is_active(Trigger::FocusLost) {
            return Propagation::Skipped(SkipReason::Disabled(Trigger::FocusLost));
        }
        self.debounce.bump();
        self.push_now(Trigger::FocusLost)
    }

    // ------------------- buttons -------------------

    pub fn manual_push(&self) -> Propagation {
        self.debounce.bump();
        self.push_now(Trigger::ManualPush)
    }

    pub fn manual_pull(&self) -> Propagation {
        self.pull_now(Trigger::ManualPull)
    }

    /// Empty the store, then mirror the result into the fields.
    pub fn clear(&self) -> Propagation {
        let Some(token) = self.guard.try_acquire() else {
            debug!("clear dropped; propagation in flight");
            return Propagation::Skipped(SkipReason::Busy);
        };

        self.debounce.bump();
        let result = self.clear.execute(&token).and_then(|outcome| {
            if outcome == ClearOutcome::Cleared {
                self.pull.execute(&token, Trigger::ManualPull)?;
            }
            Ok(Propagation::Cleared(outcome))
        });
        drop(token);

        self.settle(Trigger::ManualPush, result)
    }

    // ------------------- queries -------------------

    pub fn phase(&self) -> SyncPhase {
        self.guard.phase()
    }

    pub fn manual_buttons(&self) -> ManualButtons {
        self.config.manual_buttons()
    }

    pub fn pending_token(&self) -> PendingToken {
        self.debounce.current()
    }

    pub fn local_pair(&self) -> TextPair {
        TextPair::new(
            self.fields.get_field(Field::Label),
            self.fields.get_field(Field::Content),
        )
    }

    // ------------------- internals -------------------

    fn is_active(&self, trigger: Trigger) -> bool {
        TriggerPolicy::is_active(trigger, &self.config.snapshot())
    }

    fn fire_deferred_push(&self, token: PendingToken) -> Propagation {
        if !self.debounce.is_current(token) {
            trace!(token = token.value(), "deferred push superseded");
            return Propagation::Skipped(SkipReason::Superseded);
        }
        if !self.is_active(Trigger::LocalEdit) {
            return Propagation::Skipped(SkipReason::Disabled(Trigger::LocalEdit));
        }
        self.push_now(Trigger::LocalEdit)
    }

    fn pull_now(&self, trigger: Trigger) -> Propagation {
        let Some(token) = self.guard.try_acquire() else {
            debug!(%trigger, "pull dropped; propagation in flight");
            return Propagation::Skipped(SkipReason::Busy);
        };
        let result = self.pull.execute(&token, trigger).map(Propagation::Pulled);
        drop(token);

        self.settle(trigger, result)
    }

    fn push_now(&self, trigger: Trigger) -> Propagation {
        let Some(token) = self.guard.try_acquire() else {
            debug!(%trigger, "push dropped; propagation in flight");
            return Propagation::Skipped(SkipReason::Busy);
        };
        let result = self.push.execute(&token, trigger).map(Propagation::Pushed);
        drop(token);

        self.settle(trigger, result)
    }

    /// Log failures. When a propagation rewrote the fields, publish the new
    /// pair and supersede any push still waiting: it would carry the values the
    /// propagation just wrote back to the store.
    fn settle(&self, trigger: Trigger, result: Result<Propagation, StoreError>) -> Propagation {
        match result {
            Ok(propagation) => {
                let fields_changed = match &propagation {
                    Propagation::Pulled(outcome) => outcome.changed_anything(),
                    Propagation::Inbound(InboundOutcome::AppliedLocally { changed }) => {
                        !changed.is_empty()
                    }
                    Propagation::Cleared(_) => true,
                    _ => false,
                };
                if fields_changed {
                    self.debounce.bump();
                    self.publish_result();
                }
                propagation
            }
            Err(err) => {
                warn!(%trigger, error = %err, "propagation aborted; keeping last known state");
                Propagation::Failed(err)
            }
        }
    }

    fn publish_result(&self) {
        if let Some(sink) = &self.result_sink {
            sink.publish(&self.local_pair());
        }
    }

    fn lock_subscription(&self) -> std::sync::MutexGuard<'_, Option<SubscriptionId>> {
        self.subscription
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Store subscription handle; holds the controller weakly so the store never
/// keeps a finished session alive.
struct ChangeSubscriber(Weak<SyncController>);

impl ExternalChangeHandler for ChangeSubscriber {
    fn on_external_change(&self) {
        if let Some(controller) = self.0.upgrade() {
            controller.on_external_change();
        }
    }
}
