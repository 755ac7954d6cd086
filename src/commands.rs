//! Command handlers.
//!
//! Each handler drives one session through the controller the way a window
//! would: start the session, feed it events, end it. `run` prints; the
//! handlers return what happened so they can be tested without a terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ce_app::usecases::settings::{GetSyncSettings, UpdateSyncSettings};
use ce_app::{Propagation, SyncConfigStore};
use ce_core::config::AppConfig;
use ce_core::ports::SettingsPort;
use ce_core::{Field, LocalState, Settings, TextPair};
use ce_infra::FileSettingsRepository;
use ce_platform::clipboard::start_watching;
use ce_platform::DispatchLoop;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{info, info_span, warn, Instrument};

use crate::bootstrap::{wire_session, Session, StoreBackend};
use crate::cli::{Cli, Commands, ConfigAction};

/// Grace period after the debounce delay for a deferred push to land.
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

pub async fn run(cli: Cli, app_config: AppConfig) -> Result<()> {
    let Cli { memory, command, .. } = cli;

    match command {
        Commands::Show => {
            let session = open_session(&app_config, memory, false).await?;
            let state = show(&session)?;
            print_fields(&state, &session.fields.info());
        }
        Commands::Edit { label, content } => {
            let mut session = open_session(&app_config, memory, false).await?;
            for outcome in &edit(&mut session, label, content).await? {
                println!("{}", describe(outcome));
            }
            print_fields(&session.fields.snapshot(), &session.fields.info());
        }
        Commands::Push { label, content } => {
            let session = open_session(&app_config, memory, false).await?;
            let pushed = push(&session, TextPair::new(label, content))?;
            println!("pushed: {}", serde_json::to_string(&pushed)?);
        }
        Commands::Clear => {
            let session = open_session(&app_config, memory, false).await?;
            let state = clear(&session)?;
            print_fields(&state, &session.fields.info());
        }
        Commands::Open { label, content } => {
            let session = open_session(&app_config, memory, false).await?;
            let result = open(&session, TextPair::new(label, content))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Watch { max_events } => {
            let session = open_session(&app_config, memory, true).await?;
            watch(session, max_events).await?;
        }
        Commands::Config { action } => {
            let settings = run_config(&app_config, action).await?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

async fn open_session(app_config: &AppConfig, memory: bool, echo: bool) -> Result<Session> {
    let backend = if memory {
        StoreBackend::memory()
    } else {
        StoreBackend::system().context("system clipboard unavailable (try --memory)")?
    };
    Ok(wire_session(app_config, backend, echo).await)
}

/// Pull the store into the fields.
pub fn show(session: &Session) -> Result<LocalState> {
    session.controller.start_session(None);
    let outcome = session.controller.manual_pull();
    session.controller.end_session();

    into_result(outcome)?;
    Ok(session.fields.snapshot())
}

/// Fill the fields from the store, then type the given values. Deferred
/// pushes are waited for, so the process does not exit before they fire.
pub async fn edit(
    session: &mut Session,
    label: Option<String>,
    content: Option<String>,
) -> Result<Vec<Propagation>> {
    let controller = session.controller.clone();
    controller.start_session(None);
    into_result(controller.on_focus_gained())?;

    let mut outcomes = Vec::new();
    for (field, value) in [(Field::Label, label), (Field::Content, content)] {
        let Some(value) = value else { continue };
        if let Some(outcome) = session.fields.user_edit(field, &value) {
            outcomes.push(outcome);
        }
    }

    let delay = Duration::from_millis(session.config.snapshot().push_delay_ms);
    if outcomes
        .iter()
        .any(|outcome| matches!(outcome, Propagation::Scheduled { .. }))
    {
        let ran = drain_until(&mut session.dispatch, Instant::now() + delay + SETTLE_MARGIN).await;
        info!(ran, "deferred tasks drained");
    }

    controller.end_session();
    for outcome in &outcomes {
        if let Propagation::Failed(err) = outcome {
            return Err(anyhow::Error::new(err.clone())).context("push failed");
        }
    }
    Ok(outcomes)
}

/// Write `pair` to the store, ignoring the sync switches.
pub fn push(session: &Session, pair: TextPair) -> Result<TextPair> {
    session.controller.start_session(None);
    session.fields.load(&pair);
    let outcome = session.controller.manual_push();
    session.controller.end_session();

    match into_result(outcome)? {
        Propagation::Pushed(pushed) => Ok(pushed),
        other => anyhow::bail!("push did not run: {}", describe(&other)),
    }
}

pub fn clear(session: &Session) -> Result<LocalState> {
    session.controller.start_session(None);
    let outcome = session.controller.clear();
    session.controller.end_session();

    into_result(outcome)?;
    Ok(session.fields.snapshot())
}

/// Launch with an inbound pair and hand back the pair the session ends with.
pub fn open(session: &Session, pair: TextPair) -> Result<TextPair> {
    let outcome = session.controller.start_session(Some(pair));
    session.controller.end_session();

    into_result(outcome)?;
    Ok(session
        .result
        .take()
        .unwrap_or_else(|| session.controller.local_pair()))
}

/// Live mirror until stdin closes, Ctrl+C, or `max_events` dispatched events.
pub async fn watch(session: Session, max_events: Option<usize>) -> Result<()> {
    let Session {
        controller,
        fields,
        backend,
        mut dispatch,
        dispatch_tx,
        ..
    } = session;

    let watcher = match &backend {
        StoreBackend::System(store) => Some(start_watching(store, dispatch_tx.clone())?),
        StoreBackend::Memory(_) => None,
    };

    controller.start_session(None);
    report(&controller.on_focus_gained());
    println!("watching; each input line replaces the content (Ctrl+C to stop)");

    let span = info_span!("command.watch", max_events = ?max_events);
    async {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut events = 0usize;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        loop {
            tokio::select! {
                task = dispatch.recv() => {
                    let Some(task) = task else { break };
                    task();
                    events += 1;
                    if max_events.is_some_and(|limit| events >= limit) {
                        info!(events, "max_events reached");
                        break;
                    }
                }
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if let Some(outcome) = fields.user_edit(Field::Content, &line) {
                            report(&outcome);
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        warn!(error = %err, "stdin read failed");
                        break;
                    }
                },
                _ = &mut ctrl_c => break,
            }
        }
    }
    .instrument(span)
    .await;

    report(&controller.on_focus_lost());
    controller.end_session();
    if let Some(watcher) = watcher {
        watcher.stop().await;
    }
    Ok(())
}

pub async fn run_config(app_config: &AppConfig, action: ConfigAction) -> Result<Settings> {
    let settings: Arc<dyn SettingsPort> =
        Arc::new(FileSettingsRepository::new(app_config.settings_path.clone()));
    let live = Arc::new(SyncConfigStore::default());

    match action {
        ConfigAction::Get => Ok(GetSyncSettings::new(settings, live).execute().await),
        ConfigAction::Set { switch, value } => {
            UpdateSyncSettings::new(settings, live)
                .set_switch(switch, value)
                .await
        }
        ConfigAction::Delay { ms } => {
            UpdateSyncSettings::new(settings, live)
                .set_push_delay(ms)
                .await
        }
    }
}

/// Run dispatched tasks until `deadline`.
async fn drain_until(dispatch: &mut DispatchLoop, deadline: Instant) -> usize {
    let mut ran = 0;
    while let Ok(true) = tokio::time::timeout_at(deadline, dispatch.run_next()).await {
        ran += 1;
    }
    ran
}

fn into_result(outcome: Propagation) -> Result<Propagation> {
    match outcome {
        Propagation::Failed(err) => {
            Err(anyhow::Error::new(err)).context("clipboard operation failed")
        }
        other => Ok(other),
    }
}

fn report(outcome: &Propagation) {
    if !matches!(outcome, Propagation::Skipped(_)) {
        println!("{}", describe(outcome));
    }
}

fn describe(outcome: &Propagation) -> String {
    match outcome {
        Propagation::Pulled(pull) if pull.changed_anything() => {
            let fields: Vec<&str> = pull.changed.iter().map(|f| f.as_str()).collect();
            format!("pulled: {} updated", fields.join(", "))
        }
        Propagation::Pulled(_) => "pulled: fields already current".to_string(),
        Propagation::Pushed(pair) => format!("pushed: {} / {}", pair.label, pair.content),
        Propagation::Scheduled { token, delay } => {
            format!("push #{} scheduled in {}ms", token.value(), delay.as_millis())
        }
        Propagation::Cleared(outcome) => format!("cleared: {outcome:?}"),
        Propagation::Inbound(outcome) => format!("inbound: {outcome:?}"),
        Propagation::Skipped(reason) => format!("skipped: {reason:?}"),
        Propagation::Failed(err) => format!("failed: {err}"),
    }
}

fn print_fields(state: &LocalState, info: &str) {
    println!("label:   {}", state.label);
    println!("content: {}", state.content);
    println!("info:    {}", info.replace('\n', " | "));
}
