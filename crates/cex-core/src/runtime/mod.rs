//! Container runtime seam.
//!
//! The orchestrator drives a container through create, start, attach and wait
//! via [`ContainerRuntime`]. Engine adapters (Docker, test doubles) implement it;
//! the handle is injected as an `Arc<dyn ContainerRuntime>` and shared by all tasks.
mod error;
pub use error::RuntimeError;

mod id;
pub use id::ContainerId;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::plan::LaunchPlan;

/// Output chunks produced by an attached container (stdout and stderr interleaved).
pub type OutputStream = BoxStream<'static, Result<Vec<u8>, RuntimeError>>;

#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Runtime name used in logs and metrics labels.
    fn name(&self) -> &'static str;

    /// Create a container named `name` from `plan`.
    ///
    /// Must return [`RuntimeError::ImageNotFound`] when the image is not present
    /// locally, so the caller can pull and retry.
    async fn create(&self, name: &str, plan: &LaunchPlan) -> Result<ContainerId, RuntimeError>;

    /// Pull `image` into the local store.
    async fn pull(&self, image: &str) -> Result<(), RuntimeError>;

    async fn start(&self, id: &ContainerId) -> Result<(), RuntimeError>;

    /// Attach to stdout and stderr, including output produced before the call.
    async fn attach(&self, id: &ContainerId) -> Result<OutputStream, RuntimeError>;

    /// Block until the container exits and return its exit code.
    async fn wait(&self, id: &ContainerId) -> Result<i64, RuntimeError>;
}
