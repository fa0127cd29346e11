use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    #[error("image not found locally: {0}")]
    ImageNotFound(String),

    #[error("container engine error: {0}")]
    Engine(String),
}
