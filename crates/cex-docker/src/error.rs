use thiserror::Error;

#[derive(Debug, Error)]
pub enum DockerError {
    #[error("unsupported docker endpoint '{0}': expected unix://, tcp:// or http://")]
    InvalidEndpoint(String),

    #[error("invalid docker configuration: {0}")]
    InvalidConfig(String),

    #[error("docker engine error: {0}")]
    Engine(#[from] bollard::errors::Error),
}
