use thiserror::Error;

use cex_model::{FailureReason, ModelError};

use crate::runtime::RuntimeError;

/// Everything that turns a task into `TASK_FAILED`.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to pull image '{image}': {source}")]
    ImagePullFailed {
        image: String,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to create container '{container}': {source}")]
    ContainerCreateFailed {
        container: String,
        #[source]
        source: RuntimeError,
    },

    #[error("failed to start container '{container}': {source}")]
    ContainerStartFailed {
        container: String,
        #[source]
        source: RuntimeError,
    },

    #[error("container '{container}' runtime fault during {stage}: {source}")]
    ContainerRuntimeFault {
        container: String,
        stage: &'static str,
        #[source]
        source: RuntimeError,
    },

    #[error("executor panicked: {0}")]
    ExecutorPanicked(String),
}

impl TaskError {
    /// Failure kind carried on the status update.
    pub fn reason(&self) -> FailureReason {
        match self {
            TaskError::Model(e) => e.reason(),
            TaskError::ImagePullFailed { .. } => FailureReason::ImagePullFailed,
            TaskError::ContainerCreateFailed { .. } => FailureReason::ContainerCreateFailed,
            TaskError::ContainerStartFailed { .. } => FailureReason::ContainerStartFailed,
            TaskError::ContainerRuntimeFault { .. } => FailureReason::ContainerRuntimeFault,
            TaskError::ExecutorPanicked(_) => FailureReason::ExecutorPanicked,
        }
    }
}
