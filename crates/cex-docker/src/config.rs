use serde::{Deserialize, Serialize};

use crate::DockerError;

/// Connection settings for the Docker Engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// `unix:///path`, `tcp://host:port` or `http://host:port`.
    /// When unset, the local defaults apply (`DOCKER_HOST` or the platform socket).
    pub endpoint: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 120,
        }
    }
}

impl DockerConfig {
    pub fn validate(&self) -> Result<(), DockerError> {
        if self.timeout_secs == 0 {
            return Err(DockerError::InvalidConfig(
                "timeout_secs cannot be zero".into(),
            ));
        }
        if let Some(ep) = &self.endpoint {
            if !["unix://", "tcp://", "http://"]
                .iter()
                .any(|scheme| ep.starts_with(scheme))
            {
                return Err(DockerError::InvalidEndpoint(ep.clone()));
            }
        }
        Ok(())
    }
}
