//! Status delivery.
//!
//! Task units push [`StatusUpdate`]s into an unbounded channel through a
//! [`ReporterHandle`]; a single reporter task forwards them to the configured
//! [`StatusSink`] in arrival order. Delivery is fire-and-forget: a failed send
//! is logged and the update is dropped.
mod sink;
pub use sink::{SinkError, StatusSink};

use std::sync::Arc;

use cex_model::{LifecycleState, StatusUpdate};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, warn};

/// Cloneable producer side of the reporter channel.
#[derive(Clone, Debug)]
pub struct ReporterHandle {
    tx: mpsc::UnboundedSender<StatusUpdate>,
}

impl ReporterHandle {
    /// Enqueue an update. Never blocks.
    pub fn report(&self, update: StatusUpdate) {
        if let Err(mpsc::error::SendError(update)) = self.tx.send(update) {
            warn!(
                task = %update.task_id,
                state = %update.state,
                "status reporter is gone; update dropped"
            );
        }
    }
}

/// Reporter task factory.
pub struct StatusReporter;

impl StatusReporter {
    /// Spawn the reporter task.
    ///
    /// The task runs until every [`ReporterHandle`] is dropped and the queue is
    /// drained, then resolves to the number of updates the sink accepted.
    pub fn spawn(sink: Arc<dyn StatusSink>) -> (ReporterHandle, JoinHandle<usize>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<StatusUpdate>();

        let task = tokio::spawn(async move {
            let mut delivered = 0usize;
            while let Some(update) = rx.recv().await {
                log_transition(&update);
                match sink.send(&update).await {
                    Ok(()) => delivered += 1,
                    Err(e) => warn!(
                        task = %update.task_id,
                        state = %update.state,
                        error = %e,
                        "status delivery failed"
                    ),
                }
            }
            debug!(delivered, "status reporter drained");
            delivered
        });

        (ReporterHandle { tx }, task)
    }
}

fn log_transition(update: &StatusUpdate) {
    let task = &update.task_id;
    match update.state {
        LifecycleState::Running | LifecycleState::Starting => {
            debug!(task = %task, state = %update.state, "status");
        }
        LifecycleState::Finished => {
            let bytes = update.data.as_ref().map_or(0, Vec::len);
            info!(task = %task, output_bytes = bytes, "task finished");
        }
        LifecycleState::Errored => {
            let bytes = update.data.as_ref().map_or(0, Vec::len);
            warn!(
                task = %task,
                output_bytes = bytes,
                detail = update.message.as_deref().unwrap_or_default(),
                "task errored"
            );
        }
        LifecycleState::Failed => {
            error!(
                task = %task,
                reason = update.reason.map(|r| r.as_label()).unwrap_or_default(),
                detail = update.message.as_deref().unwrap_or_default(),
                "task failed"
            );
        }
    }
}
