use serde::Deserialize;

use cex_model::{Labels, TaskId};

/// One input line of the driver protocol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverEvent {
    Launch {
        #[serde(rename = "taskId")]
        task_id: TaskId,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        labels: Labels,
    },
    Kill {
        #[serde(rename = "taskId")]
        task_id: TaskId,
    },
    Message {
        data: String,
    },
    Shutdown,
}

impl DriverEvent {
    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, serde_json::Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(line).map(Some)
    }
}
