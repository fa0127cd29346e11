use serde::{Deserialize, Serialize};

/// Kind of fault attached to a `Failed` status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    MissingField,
    MalformedDescriptor,
    NoMountableArtifact,
    ImagePullFailed,
    ContainerCreateFailed,
    ContainerStartFailed,
    ContainerRuntimeFault,
    ExecutorPanicked,
}

impl FailureReason {
    /// Stable label value, identical to the serialized form.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            FailureReason::MissingField => "missing_field",
            FailureReason::MalformedDescriptor => "malformed_descriptor",
            FailureReason::NoMountableArtifact => "no_mountable_artifact",
            FailureReason::ImagePullFailed => "image_pull_failed",
            FailureReason::ContainerCreateFailed => "container_create_failed",
            FailureReason::ContainerStartFailed => "container_start_failed",
            FailureReason::ContainerRuntimeFault => "container_runtime_fault",
            FailureReason::ExecutorPanicked => "executor_panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_matches_serde() {
        for r in [
            FailureReason::MissingField,
            FailureReason::MalformedDescriptor,
            FailureReason::NoMountableArtifact,
            FailureReason::ImagePullFailed,
            FailureReason::ContainerCreateFailed,
            FailureReason::ContainerStartFailed,
            FailureReason::ContainerRuntimeFault,
            FailureReason::ExecutorPanicked,
        ] {
            let json = serde_json::to_string(&r).unwrap();
            assert_eq!(json, format!("\"{}\"", r.as_label()));
        }
    }
}
