use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state reported to the scheduler for a task.
///
/// Ordered as `Starting < Running < Finished < Failed < Errored`; the order only
/// groups terminal states after non-terminal ones. Emission order is a separate
/// contract owned by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    #[serde(rename = "TASK_STARTING")]
    Starting,
    #[serde(rename = "TASK_RUNNING")]
    Running,
    #[serde(rename = "TASK_FINISHED")]
    Finished,
    #[serde(rename = "TASK_FAILED")]
    Failed,
    #[serde(rename = "TASK_ERROR")]
    Errored,
}

impl LifecycleState {
    /// `true` for `Finished`, `Failed` and `Errored`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Errored)
    }

    /// Wire name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starting => "TASK_STARTING",
            Self::Running => "TASK_RUNNING",
            Self::Finished => "TASK_FINISHED",
            Self::Failed => "TASK_FAILED",
            Self::Errored => "TASK_ERROR",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
