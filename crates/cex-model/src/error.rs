use thiserror::Error;

use crate::FailureReason;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing required label: {0}")]
    MissingField(&'static str),

    #[error("malformed '{field}' descriptor: {reason}")]
    MalformedDescriptor { field: &'static str, reason: String },

    #[error("no mountable artifact among {candidates} location(s)")]
    NoMountableArtifact { candidates: usize },

    #[error("invalid model: {0}")]
    Invalid(String),
}

impl ModelError {
    /// Scheduler-facing failure kind for this error.
    pub fn reason(&self) -> FailureReason {
        match self {
            ModelError::MissingField(_) => FailureReason::MissingField,
            ModelError::MalformedDescriptor { .. } | ModelError::Invalid(_) => {
                FailureReason::MalformedDescriptor
            }
            ModelError::NoMountableArtifact { .. } => FailureReason::NoMountableArtifact,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
