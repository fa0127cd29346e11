use std::sync::Arc;

/// Terminal classification of a task for metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Container exited with code 0.
    Finished,
    /// Container exited with a non-zero code.
    Errored,
    /// Pipeline failed before a normal exit.
    Failed,
}

impl TaskOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskOutcome::Finished => "finished",
            TaskOutcome::Errored => "errored",
            TaskOutcome::Failed => "failed",
        }
    }
}

/// Backend metrics collection interface.
///
/// Every method takes the runtime name (e.g. `"docker"`) as the first label.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a task accepted by the runner.
    fn record_task_started(&self, runtime: &str);
    /// Record a task reaching its terminal state.
    ///
    /// # Arguments
    /// - `runtime`: Runtime implementation
    /// - `outcome`: Terminal classification
    /// - `duration_ms`: Time from acceptance to terminal state
    fn record_task_completed(&self, runtime: &str, outcome: TaskOutcome, duration_ms: u64);
    /// Record an image pull triggered by a create miss.
    fn record_image_pull(&self, runtime: &str, success: bool);
    /// Record a container runtime failure by kind (a `FailureReason` label).
    fn record_runtime_error(&self, runtime: &str, error_kind: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
