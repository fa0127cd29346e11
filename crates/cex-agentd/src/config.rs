use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use cex_docker::DockerConfig;
use cex_observe::LoggerConfig;

use crate::cli::Cli;

/// Agent configuration file.
///
/// ```json
/// {
///   "logger": { "format": "json", "level": "info" },
///   "docker": { "endpoint": "unix:///var/run/docker.sock", "timeout_secs": 120 }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub logger: LoggerConfig,
    pub docker: DockerConfig,
}

impl AgentConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.docker.validate()?;
        Ok(cfg)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(level) = &cli.log_level {
            self.logger.level = level.clone();
        }
        if let Some(format) = cli.log_format {
            self.logger.format = format;
        }
        if let Some(endpoint) = &cli.docker_endpoint {
            self.docker.endpoint = Some(endpoint.clone());
            self.docker.validate()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cex_observe::LoggerFormat;
    use clap::Parser;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = AgentConfig::parse("{}").unwrap();
        assert_eq!(cfg.docker, DockerConfig::default());
        assert_eq!(cfg.logger.level.as_str(), "info");
    }

    #[test]
    fn nested_sections_parse() {
        let cfg = AgentConfig::parse(
            r#"{
                "logger": {"format": "json", "level": "cex_core=debug,info", "use_color": false},
                "docker": {"endpoint": "tcp://10.0.0.5:2375", "timeout_secs": 30}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert!(!cfg.logger.use_color);
        assert_eq!(cfg.docker.endpoint.as_deref(), Some("tcp://10.0.0.5:2375"));
        assert_eq!(cfg.docker.timeout_secs, 30);
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        assert!(AgentConfig::parse(r#"{"dokcer": {}}"#).is_err());
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        assert!(AgentConfig::parse(r#"{"docker": {"endpoint": "ssh://x"}}"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AgentConfig::load(Some(Path::new("/nonexistent/cex.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cex.json"));
    }

    #[test]
    fn no_path_means_defaults() {
        let cfg = AgentConfig::load(None).unwrap();
        assert!(cfg.docker.endpoint.is_none());
    }

    #[test]
    fn cli_overrides_file() {
        let cli = Cli::try_parse_from([
            "cex-agentd",
            "--log-level",
            "warn",
            "--log-format",
            "json",
            "--docker-endpoint",
            "http://127.0.0.1:2375",
        ])
        .unwrap();

        let cfg = AgentConfig::parse(r#"{"logger": {"level": "debug"}}"#)
            .unwrap()
            .with_overrides(&cli)
            .unwrap();
        assert_eq!(cfg.logger.level.as_str(), "warn");
        assert_eq!(cfg.logger.format, LoggerFormat::Json);
        assert_eq!(cfg.docker.endpoint.as_deref(), Some("http://127.0.0.1:2375"));
    }
}
