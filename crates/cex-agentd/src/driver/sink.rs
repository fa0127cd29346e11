use async_trait::async_trait;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::Mutex,
};

use cex_core::reporter::{SinkError, StatusSink};
use cex_model::StatusUpdate;

/// Writes each status update as one JSON line.
pub struct LineSink<W> {
    writer: Mutex<W>,
}

impl<W> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> StatusSink for LineSink<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn send(&self, update: &StatusUpdate) -> Result<(), SinkError> {
        let mut line =
            serde_json::to_vec(update).map_err(|e| SinkError::Delivery(e.to_string()))?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        writer.flush().await?;
        Ok(())
    }
}
