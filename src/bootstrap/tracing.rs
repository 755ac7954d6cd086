//! Tracing configuration for ClipEditor
//!
//! ## Architecture / 架构
//!
//! - **stderr layer**: stdout belongs to command output
//! - **file layer**: `<app data>/logs/clipeditor.log`, skipped when unavailable
//! - **filter**: `RUST_LOG`, then `[logging] filter`, then build defaults

use std::{fs, io, sync::OnceLock};

use ce_core::ports::AppDirsPort;
use ce_platform::DirsAppDirsAdapter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug for everything
/// - **Production**: info for everything
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        if is_dev {
            "ce_platform=debug"
        } else {
            "ce_platform=info"
        }
        .to_string(),
        if is_dev {
            "ce_infra=debug"
        } else {
            "ce_infra=info"
        }
        .to_string(),
    ]
}

fn build_env_filter(config_filter: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    if !config_filter.trim().is_empty() {
        if let Ok(filter) = EnvFilter::try_new(config_filter) {
            return filter;
        }
        eprintln!("Invalid [logging] filter {config_filter:?}, using defaults");
    }
    EnvFilter::new(build_filter_directives(is_development()).join(","))
}

/// Initialize the tracing subscriber
///
/// Call once from `main`, after the app config is loaded and before any
/// session is wired.
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(config_filter: &str) -> anyhow::Result<()> {
    let env_filter = build_env_filter(config_filter);

    let stderr_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match build_file_writer() {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, logging to stderr only: {err}");
            None
        }
    };

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stderr_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let app_dirs = DirsAppDirsAdapter::new().get_app_dirs()?;
    let logs_dir = app_dirs.logs_dir();
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, "clipeditor.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
