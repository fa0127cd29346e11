//! Task runner: accepts launches and owns one independent unit per task.
//!
//! `launch` reports `Running` then `Starting`, spawns the unit (decode, locate,
//! plan, orchestrate) and returns. A supervising task awaits the unit and reports
//! exactly one terminal status, including when the unit panics.
use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::task::{JoinError, JoinHandle};
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use cex_model::{Labels, ModelResult, StatusUpdate, TaskId, decode_descriptor, locate_artifact};

use crate::{
    error::TaskError,
    metrics::MetricsHandle,
    orchestrator::{ExecutionOutcome, Orchestrator},
    plan::{LaunchPlan, build_plan},
    reporter::{ReporterHandle, StatusReporter, StatusSink},
    runtime::ContainerRuntime,
};

pub struct TaskRunner {
    orchestrator: Orchestrator,
    metrics: MetricsHandle,
    reporter: ReporterHandle,
    reporter_task: JoinHandle<usize>,
    tracker: TaskTracker,
}

impl TaskRunner {
    /// Create a runner and spawn its status reporter.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        sink: Arc<dyn StatusSink>,
        metrics: MetricsHandle,
    ) -> Self {
        let (reporter, reporter_task) = StatusReporter::spawn(sink);
        Self {
            orchestrator: Orchestrator::new(runtime, metrics.clone()),
            metrics,
            reporter,
            reporter_task,
            tracker: TaskTracker::new(),
        }
    }

    /// Accept a task and run it in the background.
    pub fn launch(&self, task_id: TaskId, labels: Labels) {
        info!(task = %task_id, labels = labels.len(), "launching task");
        self.reporter.report(StatusUpdate::running(task_id.clone()));
        self.reporter.report(StatusUpdate::starting(task_id.clone()));

        let runtime = self.orchestrator.runtime_name();
        self.metrics.record_task_started(runtime);
        let started = Instant::now();

        let unit = tokio::spawn(execute(
            self.orchestrator.clone(),
            task_id.clone(),
            labels,
        ));

        let reporter = self.reporter.clone();
        let metrics = self.metrics.clone();
        self.tracker.spawn(async move {
            let outcome = unit.await.unwrap_or_else(|e| {
                ExecutionOutcome::Failed(TaskError::ExecutorPanicked(join_failure(e)))
            });
            metrics.record_task_completed(
                runtime,
                outcome.classify(),
                whole_millis(started.elapsed()),
            );
            reporter.report(outcome.into_status(task_id));
        });
    }

    /// Acknowledge a kill request.
    ///
    /// Kill is not cancellable: the running unit is left to reach its terminal state.
    pub fn kill(&self, task_id: &TaskId) {
        warn!(task = %task_id, "kill requested; in-flight tasks are not cancellable, ignoring");
    }

    /// Log a scheduler-to-agent message.
    pub fn framework_message(&self, data: &[u8]) {
        info!(
            bytes = data.len(),
            payload = %String::from_utf8_lossy(data),
            "framework message received"
        );
    }

    /// Number of tasks that have not yet reported a terminal status.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for in-flight tasks, then drain the reporter.
    ///
    /// Returns the number of updates the sink accepted.
    pub async fn shutdown(self) -> usize {
        let TaskRunner {
            reporter,
            reporter_task,
            tracker,
            ..
        } = self;

        tracker.close();
        debug!(in_flight = tracker.len(), "waiting for in-flight tasks");
        tracker.wait().await;

        drop(reporter);
        match reporter_task.await {
            Ok(delivered) => delivered,
            Err(e) => {
                warn!(error = %e, "status reporter terminated abnormally");
                0
            }
        }
    }
}

async fn execute(orchestrator: Orchestrator, task_id: TaskId, labels: Labels) -> ExecutionOutcome {
    let plan = match prepare(&labels) {
        Ok(plan) => plan,
        Err(e) => return ExecutionOutcome::Failed(e.into()),
    };
    debug!(task = %task_id, image = %plan.image, env = plan.env.len(), "launch plan built");
    orchestrator.run(task_id.as_str(), &plan).await
}

fn prepare(labels: &Labels) -> ModelResult<LaunchPlan> {
    let descriptor = decode_descriptor(labels)?;
    let artifact: PathBuf = locate_artifact(&descriptor.message)?;
    Ok(build_plan(&descriptor.processor, labels, &artifact))
}

fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn join_failure(err: JoinError) -> String {
    if !err.is_panic() {
        return "task unit was cancelled".into();
    }
    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".into())
}
