pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod plan;
pub mod reporter;
pub mod runner;
pub mod runtime;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::error::TaskError;
    pub use crate::metrics::{MetricsBackend, MetricsHandle, TaskOutcome};
    pub use crate::orchestrator::{ExecutionOutcome, Orchestrator};
    pub use crate::plan::{LaunchPlan, Mount, build_plan};
    pub use crate::reporter::{ReporterHandle, SinkError, StatusReporter, StatusSink};
    pub use crate::runner::TaskRunner;
    pub use crate::runtime::{ContainerId, ContainerRuntime, OutputStream, RuntimeError};
}
