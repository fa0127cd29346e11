mod cli;
mod config;
mod driver;

use std::{sync::Arc, time::Duration};

use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, info, warn};

use cex_core::runner::TaskRunner;
use cex_docker::DockerRuntime;
use cex_observe::{LoggerTimeZone, capture_local_offset, init_logger};
use cex_prometheus::PrometheusMetrics;

use crate::{cli::Cli, config::AgentConfig, driver::LineSink};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AgentConfig::load(cli.config.as_deref())?.with_overrides(&cli)?;

    // 1) logger; the local offset can only be read before any threads exist
    if cfg.logger.tz == LoggerTimeZone::Local {
        capture_local_offset();
    }
    init_logger(&cfg.logger)?;

    // 2) runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = rt.block_on(serve(cfg));

    // stdin reads park a blocking thread that never returns on its own
    rt.shutdown_timeout(Duration::from_secs(1));
    result
}

async fn serve(cfg: AgentConfig) -> anyhow::Result<()> {
    // 3) docker client
    let docker = DockerRuntime::connect(&cfg.docker)?;
    if let Err(e) = docker.ping().await {
        warn!(error = %e, "docker daemon not reachable; launches will fail until it is");
    }

    // 4) metrics + status sink + runner
    let metrics = PrometheusMetrics::new()?;
    let sink = Arc::new(LineSink::new(tokio::io::stdout()));
    let runner = TaskRunner::new(Arc::new(docker), sink, Arc::new(metrics.clone()));

    // 5) event loop
    info!("agent ready, reading task events from stdin");
    let stdin = BufReader::new(tokio::io::stdin());
    let delivered = driver::run(stdin, runner, shutdown_signal()).await;
    info!(delivered, "agent stopped");

    match metrics.encode_text() {
        Ok(text) => debug!(metrics = %text, "final metrics"),
        Err(e) => warn!(error = %e, "failed to encode metrics"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}
