//! Log subscriber setup
//!
//! Console output always; a daily rolling file when a log directory is
//! configured. The file writer is non-blocking, so its guard is parked here
//! and must be released through [`flush`] before the process exits.

use std::path::Path;
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static FILE_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Install the global subscriber.
///
/// Returns an error if a global subscriber is already set.
pub fn init(
    log_dir: Option<&Path>,
    file_prefix: &str,
    verbose: bool,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let log_level = if verbose { "debug" } else { "info" };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("notesd={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()?;

    if let Some(guard) = guard {
        park_guard(guard);
    }
    Ok(())
}

fn park_guard(guard: WorkerGuard) {
    let mut slot = FILE_GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Some(guard);
}

/// Drain queued file records to disk. Later records go to the console only.
pub fn flush() {
    let guard = FILE_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take();
    // Dropping the guard blocks until the writer thread has written everything queued
    drop(guard);
}
