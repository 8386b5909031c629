//! Tracing initialization.
//! Builds a subscriber with EnvFilter, compact or JSON stdout formatting, and
//! an optional non-blocking file layer.
//!
//! Behavior:
//! - The level is driven by the program's LogLevel (no RUST_LOG override).
//! - File logging is refused when any ancestor of the log path is a symlink.
//! - The returned WorkerGuard must be held until shutdown to flush the file.

use std::fmt as stdfmt;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

use file_mover::LogLevel;
use file_mover::config::path_has_symlink_ancestor;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_filter_directive(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "info",
        LogLevel::Info => "debug",
        LogLevel::Debug => "trace",
    }
}

/// Open a non-blocking append writer for the log file, or None (with a note
/// on stderr) when the path is unsafe or unopenable.
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            eprintln!(
                "Refusing file logging: an ancestor of {} is a symlink; logging to stdout only.",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!(
                "Error checking log path {}: {}; logging to stdout only.",
                path.display(),
                e
            );
            return None;
        }
        Ok(false) => {}
    }

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            Some((writer, guard))
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Initialize tracing. Returns the file appender guard when file logging is
/// active; the caller holds it until exit.
pub fn init_tracing(
    lvl: LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::new(to_filter_directive(lvl));

    let file = log_file.and_then(maybe_open_non_blocking_writer);

    // The json/file combinations produce distinct layer types, so each arm
    // initializes its own registry.
    match (json, file) {
        (true, Some((writer, guard))) => {
            let stdout_layer = tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime);
            let file_layer = tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_writer(writer);
            registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        (true, None) => {
            let stdout_layer = tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime);
            registry().with(env_filter).with(stdout_layer).init();
            Ok(None)
        }
        (false, Some((writer, guard))) => {
            let stdout_layer = tsfmt::layer().with_timer(LocalHumanTime).compact();
            let file_layer = tsfmt::layer()
                .with_timer(LocalHumanTime)
                .compact()
                .with_writer(writer);
            registry()
                .with(env_filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        (false, None) => {
            let stdout_layer = tsfmt::layer().with_timer(LocalHumanTime).compact();
            registry().with(env_filter).with(stdout_layer).init();
            Ok(None)
        }
    }
}
