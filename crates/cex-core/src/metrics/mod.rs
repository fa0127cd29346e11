//! Metrics collection abstraction for the task pipeline.
//!
//! Backends (prometheus, ...) implement [`MetricsBackend`] and are handed to the
//! [`crate::runner::TaskRunner`] at construction time.
mod backend;
pub use backend::{MetricsBackend, MetricsHandle, TaskOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
