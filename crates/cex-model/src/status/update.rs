use serde::{Deserialize, Serialize};

use crate::{FailureReason, LifecycleState, TaskId};

/// One status report for one task, as delivered to the scheduler.
///
/// `data` is present only on `Finished` and `Errored` and carries the captured
/// container output (base64 on the wire). `reason` is present only on `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub task_id: TaskId,
    pub state: LifecycleState,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_data")]
    pub data: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

impl StatusUpdate {
    fn bare(task_id: TaskId, state: LifecycleState) -> Self {
        Self {
            task_id,
            state,
            data: None,
            message: None,
            reason: None,
        }
    }

    pub fn running(task_id: TaskId) -> Self {
        Self::bare(task_id, LifecycleState::Running)
    }

    pub fn starting(task_id: TaskId) -> Self {
        Self::bare(task_id, LifecycleState::Starting)
    }

    /// Container exited with code 0.
    pub fn finished(task_id: TaskId, data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            ..Self::bare(task_id, LifecycleState::Finished)
        }
    }

    /// Container exited with a non-zero code.
    pub fn errored(task_id: TaskId, data: Vec<u8>, exit_code: i64) -> Self {
        Self {
            data: Some(data),
            message: Some(format!("container exited with code {exit_code}")),
            ..Self::bare(task_id, LifecycleState::Errored)
        }
    }

    /// The pipeline did not reach a normal container exit.
    pub fn failed(task_id: TaskId, reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            reason: Some(reason),
            ..Self::bare(task_id, LifecycleState::Failed)
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

mod base64_data {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => s.serialize_str(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
