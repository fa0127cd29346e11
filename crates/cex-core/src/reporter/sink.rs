use async_trait::async_trait;
use thiserror::Error;

use cex_model::StatusUpdate;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("status sink closed")]
    Closed,

    #[error("status delivery failed: {0}")]
    Delivery(String),
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::BrokenPipe => SinkError::Closed,
            _ => SinkError::Delivery(e.to_string()),
        }
    }
}

/// Destination for status updates (the scheduler driver).
#[async_trait]
pub trait StatusSink: Send + Sync + 'static {
    async fn send(&self, update: &StatusUpdate) -> Result<(), SinkError>;
}
