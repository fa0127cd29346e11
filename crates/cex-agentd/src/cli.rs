use std::path::PathBuf;

use clap::Parser;

use cex_observe::{LoggerFormat, LoggerLevel};

/// Container task executor agent.
///
/// Reads task events as JSON lines on stdin and writes status updates as JSON
/// lines on stdout. Logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "cex-agentd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter expression, overrides `logger.level` (e.g. "cex_core=debug,info")
    #[arg(long)]
    pub log_level: Option<LoggerLevel>,

    /// Log format, overrides `logger.format` (text|json|journald)
    #[arg(long)]
    pub log_format: Option<LoggerFormat>,

    /// Docker endpoint, overrides `docker.endpoint` (unix://, tcp:// or http://)
    #[arg(long)]
    pub docker_endpoint: Option<String>,
}
