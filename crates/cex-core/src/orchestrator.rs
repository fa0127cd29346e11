//! Container orchestration for a single task.
//!
//! ```text
//! create ──(image missing)──► pull ──► create ──► start ──► attach ──► wait
//!    │                          │         │          │         │         │
//!    └── Failed(create)         └── Failed(pull)     │         └─────────┴── Failed(runtime fault)
//!                                                    └── Failed(start)
//! ```
//! A normal exit yields `Finished` (code 0) or `Errored` (any other code), both
//! carrying the captured output.
use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};

use cex_model::{StatusUpdate, TaskId};

use crate::{
    error::TaskError,
    metrics::{MetricsHandle, TaskOutcome},
    plan::LaunchPlan,
    runtime::{ContainerId, ContainerRuntime, RuntimeError},
};

/// Result of one pipeline run. Produced once, consumed once.
#[derive(Debug)]
pub enum ExecutionOutcome {
    Failed(TaskError),
    Finished { output: Vec<u8> },
    Errored { exit_code: i64, output: Vec<u8> },
}

impl ExecutionOutcome {
    /// Metrics classification.
    pub fn classify(&self) -> TaskOutcome {
        match self {
            ExecutionOutcome::Failed(_) => TaskOutcome::Failed,
            ExecutionOutcome::Finished { .. } => TaskOutcome::Finished,
            ExecutionOutcome::Errored { .. } => TaskOutcome::Errored,
        }
    }

    /// Terminal status update for `task_id`.
    pub fn into_status(self, task_id: TaskId) -> StatusUpdate {
        match self {
            ExecutionOutcome::Failed(err) => {
                StatusUpdate::failed(task_id, err.reason(), err.to_string())
            }
            ExecutionOutcome::Finished { output } => StatusUpdate::finished(task_id, output),
            ExecutionOutcome::Errored { exit_code, output } => {
                StatusUpdate::errored(task_id, output, exit_code)
            }
        }
    }
}

impl From<TaskError> for ExecutionOutcome {
    fn from(e: TaskError) -> Self {
        ExecutionOutcome::Failed(e)
    }
}

/// Drives a [`LaunchPlan`] through the runtime.
#[derive(Clone)]
pub struct Orchestrator {
    runtime: Arc<dyn ContainerRuntime>,
    metrics: MetricsHandle,
}

impl Orchestrator {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, metrics: MetricsHandle) -> Self {
        Self { runtime, metrics }
    }

    pub fn runtime_name(&self) -> &'static str {
        self.runtime.name()
    }

    /// Run the container named `name` to completion.
    pub async fn run(&self, name: &str, plan: &LaunchPlan) -> ExecutionOutcome {
        match self.drive(name, plan).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.metrics
                    .record_runtime_error(self.runtime.name(), err.reason().as_label());
                ExecutionOutcome::Failed(err)
            }
        }
    }

    async fn drive(&self, name: &str, plan: &LaunchPlan) -> Result<ExecutionOutcome, TaskError> {
        let id = self.create_with_pull(name, plan).await?;

        self.runtime
            .start(&id)
            .await
            .map_err(|source| TaskError::ContainerStartFailed {
                container: name.to_string(),
                source,
            })?;
        debug!(container = %id, task = name, "container started");

        let output = self.collect_output(name, &id).await?;

        let exit_code =
            self.runtime
                .wait(&id)
                .await
                .map_err(|source| TaskError::ContainerRuntimeFault {
                    container: name.to_string(),
                    stage: "wait",
                    source,
                })?;
        debug!(container = %id, task = name, exit_code, "container exited");

        Ok(if exit_code == 0 {
            ExecutionOutcome::Finished { output }
        } else {
            ExecutionOutcome::Errored { exit_code, output }
        })
    }

    /// Create the container, pulling the image once if it is missing locally.
    async fn create_with_pull(
        &self,
        name: &str,
        plan: &LaunchPlan,
    ) -> Result<ContainerId, TaskError> {
        let create_failed = |source| TaskError::ContainerCreateFailed {
            container: name.to_string(),
            source,
        };

        let id = match self.runtime.create(name, plan).await {
            Ok(id) => id,
            Err(RuntimeError::ImageNotFound(_)) => {
                debug!(task = name, image = %plan.image, "image missing locally; pulling");
                let pulled = self.runtime.pull(&plan.image).await;
                self.metrics
                    .record_image_pull(self.runtime.name(), pulled.is_ok());
                pulled.map_err(|source| TaskError::ImagePullFailed {
                    image: plan.image.clone(),
                    source,
                })?;
                self.runtime
                    .create(name, plan)
                    .await
                    .map_err(create_failed)?
            }
            Err(e) => return Err(create_failed(e)),
        };

        debug!(
            container = %id,
            task = name,
            image = %plan.image,
            memory_bytes = plan.memory_bytes,
            cpu = plan.cpu,
            mounts = plan.mounts.len(),
            "container created"
        );
        Ok(id)
    }

    async fn collect_output(&self, name: &str, id: &ContainerId) -> Result<Vec<u8>, TaskError> {
        let fault = |source| TaskError::ContainerRuntimeFault {
            container: name.to_string(),
            stage: "attach",
            source,
        };

        let mut stream = self.runtime.attach(id).await.map_err(fault)?;
        let mut output = Vec::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => output.extend_from_slice(&bytes),
                Err(e) => {
                    warn!(container = %id, task = name, error = %e, "attach stream failed");
                    return Err(fault(e));
                }
            }
        }
        Ok(output)
    }
}
