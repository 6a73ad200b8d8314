//! Operation tracing
//!
//! Wraps every note operation with start/success/failure records. Unexpected
//! failures are logged with a backtrace of the tracing site and then handled
//! according to [`UnexpectedPolicy`]: by default the whole process exits with
//! code 1, after the log file writer has been flushed.

use crate::config::UnexpectedPolicy;
use crate::handlers::{NoteResult, Operation};
use crate::store::NoteStore;
use std::backtrace::Backtrace;
use std::time::Instant;

/// Cross-cutting wrapper applied uniformly to note operations
#[derive(Debug, Clone, Copy)]
pub struct OperationTracer {
    policy: UnexpectedPolicy,
}

impl OperationTracer {
    pub fn new(policy: UnexpectedPolicy) -> Self {
        OperationTracer { policy }
    }

    pub fn policy(&self) -> UnexpectedPolicy {
        self.policy
    }

    /// Run `f` as the operation `name`, tracing its outcome.
    pub fn trace<T, F>(&self, name: &'static str, f: F) -> NoteResult<T>
    where
        F: FnOnce() -> NoteResult<T>,
    {
        let started_at = chrono::Local::now();
        let clock = Instant::now();
        tracing::info!("   {} - Going to run the '{}' method", started_at, name);

        match f() {
            Ok(out) => {
                tracing::info!(
                    "   {} - Done successfully running the '{}' method ({:?})",
                    started_at,
                    name,
                    clock.elapsed()
                );
                Ok(out)
            }
            Err(err) if err.is_unexpected() => {
                tracing::error!("Error occurred in method '{}':", name);
                tracing::error!("Error Type: {}", err.kind());
                tracing::error!("Error Message: {}", err);
                tracing::error!(
                    "Backtrace (captured where '{}' was traced):\n{}",
                    name,
                    Backtrace::force_capture()
                );

                if self.policy == UnexpectedPolicy::Exit {
                    tracing::error!("Terminating process after unexpected error in '{}'", name);
                    crate::logging::flush();
                    std::process::exit(1);
                }
                Err(err)
            }
            Err(err) => {
                tracing::warn!(
                    "   {} - '{}' method failed: {} ({})",
                    started_at,
                    name,
                    err.kind(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Decode `body` as operation `O` and execute it against `store`, traced.
    pub fn run<O: Operation>(&self, store: &NoteStore, body: &[u8]) -> NoteResult<O::Output> {
        self.trace(O::NAME, || O::decode(body)?.execute(store))
    }
}
