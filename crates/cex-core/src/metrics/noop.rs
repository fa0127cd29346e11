use crate::metrics::backend::{MetricsBackend, TaskOutcome};

/// No-op metrics backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_task_started(&self, _: &str) {}

    #[inline(always)]
    fn record_task_completed(&self, _: &str, _: TaskOutcome, _: u64) {}

    #[inline(always)]
    fn record_image_pull(&self, _: &str, _: bool) {}

    #[inline(always)]
    fn record_runtime_error(&self, _: &str, _: &str) {}
}
