//! Docker Engine implementation of `cex_core::runtime::ContainerRuntime`.
mod error;
pub use error::DockerError;

mod config;
pub use config::DockerConfig;

mod image;
pub use image::split_image_ref;

mod runtime;
pub use runtime::{DockerRuntime, container_config};

/// Runtime identifier used in logs and metrics labels.
pub const RUNTIME_NAME: &str = "docker";
