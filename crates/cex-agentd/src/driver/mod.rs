//! Line-delimited JSON driver.
//!
//! Stands in for the scheduler connection: task events arrive on an input
//! stream, status updates leave through a [`LineSink`].
mod event;
pub use event::DriverEvent;

mod sink;
pub use sink::LineSink;

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error, info, warn};

use cex_core::runner::TaskRunner;

/// Feed events from `input` to `runner` until EOF, a `shutdown` event, or
/// `stop` resolves; then shut the runner down.
///
/// Returns the number of status updates the sink accepted.
pub async fn run<R, S>(input: R, runner: TaskRunner, stop: S) -> usize
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    tokio::pin!(stop);

    loop {
        let line = tokio::select! {
            _ = &mut stop => {
                info!("stop signal received");
                break;
            }
            next = lines.next_line() => match next {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("input closed");
                    break;
                }
                Err(e) => {
                    error!(error = %e, "reading input failed");
                    break;
                }
            },
        };

        match DriverEvent::parse(&line) {
            Ok(None) => {}
            Ok(Some(DriverEvent::Launch {
                task_id,
                name,
                labels,
            })) => {
                debug!(task = %task_id, name = name.as_deref().unwrap_or_default(), "launch event");
                runner.launch(task_id, labels);
            }
            Ok(Some(DriverEvent::Kill { task_id })) => runner.kill(&task_id),
            Ok(Some(DriverEvent::Message { data })) => runner.framework_message(data.as_bytes()),
            Ok(Some(DriverEvent::Shutdown)) => {
                info!("shutdown requested");
                break;
            }
            Err(e) => warn!(error = %e, "skipping malformed input line"),
        }
    }

    info!(in_flight = runner.in_flight(), "shutting down runner");
    runner.shutdown().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use cex_core::{
        metrics::noop_metrics,
        plan::LaunchPlan,
        reporter::{SinkError, StatusSink},
        runtime::{ContainerId, ContainerRuntime, OutputStream, RuntimeError},
    };
    use cex_model::{FailureReason, LifecycleState, StatusUpdate};
    use futures::{StreamExt, stream};

    /// Runs every container to exit 0 with fixed output.
    struct EchoRuntime;

    #[async_trait]
    impl ContainerRuntime for EchoRuntime {
        fn name(&self) -> &'static str {
            "echo"
        }
        async fn create(&self, name: &str, _: &LaunchPlan) -> Result<ContainerId, RuntimeError> {
            Ok(ContainerId::new(name))
        }
        async fn pull(&self, _: &str) -> Result<(), RuntimeError> {
            Ok(())
        }
        async fn start(&self, _: &ContainerId) -> Result<(), RuntimeError> {
            Ok(())
        }
        async fn attach(&self, _: &ContainerId) -> Result<OutputStream, RuntimeError> {
            Ok(stream::iter(vec![Ok(b"ok".to_vec())]).boxed())
        }
        async fn wait(&self, _: &ContainerId) -> Result<i64, RuntimeError> {
            Ok(0)
        }
    }

    #[derive(Default)]
    struct Collect(Mutex<Vec<StatusUpdate>>);

    #[async_trait]
    impl StatusSink for Collect {
        async fn send(&self, update: &StatusUpdate) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(update.clone());
            Ok(())
        }
    }

    const PROCESSOR: &str = r#"{\"docker\":\"alpine\",\"mem\":64}"#;
    const MESSAGE: &str = r#"{\"locations\":[{\"url\":\"file:///tmp/in\",\"type\":\"ingest\"}]}"#;

    fn launch_line(id: &str, message: &str) -> String {
        format!(
            r#"{{"type":"launch","taskId":"{id}","labels":[{{"key":"processor","value":"{PROCESSOR}"}},{{"key":"message","value":"{message}"}}]}}"#
        )
    }

    async fn drive(input: String) -> (usize, Vec<StatusUpdate>) {
        let sink = Arc::new(Collect::default());
        let runner = TaskRunner::new(Arc::new(EchoRuntime), sink.clone(), noop_metrics());
        let delivered = run(input.as_bytes(), runner, std::future::pending()).await;
        let updates = sink.0.lock().unwrap().clone();
        (delivered, updates)
    }

    #[tokio::test]
    async fn eof_drains_launched_tasks() {
        let input = format!("{}\n{}\n", launch_line("a", MESSAGE), launch_line("b", ""));
        let (delivered, updates) = drive(input).await;

        assert_eq!(delivered, 6);
        let terminal: Vec<_> = updates.iter().filter(|u| u.is_terminal()).collect();
        assert_eq!(terminal.len(), 2);

        let a = terminal.iter().find(|u| u.task_id.as_str() == "a").unwrap();
        assert_eq!(a.state, LifecycleState::Finished);
        assert_eq!(a.data.as_deref(), Some(&b"ok"[..]));

        let b = terminal.iter().find(|u| u.task_id.as_str() == "b").unwrap();
        assert_eq!(b.reason, Some(FailureReason::MissingField));
    }

    #[tokio::test]
    async fn shutdown_event_stops_reading() {
        let input = format!(
            "{}\n{{\"type\":\"shutdown\"}}\n{}\n",
            launch_line("a", MESSAGE),
            launch_line("ignored", MESSAGE)
        );
        let (delivered, updates) = drive(input).await;

        assert_eq!(delivered, 3);
        assert!(updates.iter().all(|u| u.task_id.as_str() == "a"));
    }

    #[tokio::test]
    async fn malformed_and_control_lines_are_tolerated() {
        let input = format!(
            "garbage\n\n{{\"type\":\"kill\",\"taskId\":\"a\"}}\n{{\"type\":\"message\",\"data\":\"hi\"}}\n{}\n",
            launch_line("a", MESSAGE)
        );
        let (delivered, updates) = drive(input).await;

        assert_eq!(delivered, 3);
        assert_eq!(updates.last().map(|u| u.state), Some(LifecycleState::Finished));
    }

    #[tokio::test]
    async fn stop_future_ends_the_loop() {
        let sink = Arc::new(Collect::default());
        let runner = TaskRunner::new(Arc::new(EchoRuntime), sink, noop_metrics());
        let (_tx, rx) = tokio::io::duplex(64);
        let delivered = run(tokio::io::BufReader::new(rx), runner, async {}).await;
        assert_eq!(delivered, 0);
    }
}
