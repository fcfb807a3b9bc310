#![forbid(unsafe_code)]

//! Deferred-task observability.
//!
//! - **Tracing spans**: every deferred task runs inside a `deferred.task`
//!   debug span recording `task`, `node`, `outcome` and `duration_us`.
//! - **Counters**: `deferred_scheduled_total` and `deferred_executed_total`.

use std::sync::atomic::{AtomicU64, Ordering};
use web_time::Instant;

// ---------------------------------------------------------------------------
// Monotonic counters
// ---------------------------------------------------------------------------

static DEFERRED_SCHEDULED_TOTAL: AtomicU64 = AtomicU64::new(0);
static DEFERRED_EXECUTED_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Total deferred tasks handed to any scheduler (monotonic counter).
#[must_use]
pub fn deferred_scheduled_total() -> u64 {
    DEFERRED_SCHEDULED_TOTAL.load(Ordering::Relaxed)
}

/// Total deferred tasks executed (monotonic counter).
#[must_use]
pub fn deferred_executed_total() -> u64 {
    DEFERRED_EXECUTED_TOTAL.load(Ordering::Relaxed)
}

/// Record one scheduled task. Called by [`crate::Scheduler`] implementations.
pub fn note_scheduled() {
    DEFERRED_SCHEDULED_TOTAL.fetch_add(1, Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// Task instrumentation
// ---------------------------------------------------------------------------

/// Run a deferred task inside a `deferred.task` span.
///
/// `f` returns whether the task found its target still attached; stale
/// targets are reported as `outcome = "stale"` at debug level and never
/// raise.
pub fn trace_deferred_task<F>(task: &str, node: &str, f: F) -> bool
where
    F: FnOnce() -> bool,
{
    DEFERRED_EXECUTED_TOTAL.fetch_add(1, Ordering::Relaxed);

    let start = Instant::now();
    let span = tracing::debug_span!(
        "deferred.task",
        task = task,
        node = node,
        outcome = tracing::field::Empty,
        duration_us = tracing::field::Empty,
    );
    let _guard = span.enter();

    let applied = f();
    let duration_us = start.elapsed().as_micros() as u64;
    let outcome = if applied { "applied" } else { "stale" };
    span.record("outcome", outcome);
    span.record("duration_us", duration_us);

    if applied {
        tracing::trace!(task, node, duration_us, "deferred task applied");
    } else {
        tracing::debug!(task, node, "deferred task target left the document");
    }
    applied
}
