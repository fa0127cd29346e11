use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger configuration, usually the `logger` section of the agent config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` expression, e.g. `"info"` or `"cex_core=debug,info"`.
    pub level: LoggerLevel,
    pub tz: LoggerTimeZone,
    /// Include the event target (module path).
    pub with_targets: bool,
    /// Use ANSI colors for text output when stderr is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::Utc,
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// Colors are enabled only for text output to a terminal.
    pub fn ansi_enabled(&self) -> bool {
        self.use_color && self.format == LoggerFormat::Text && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LoggerConfig::default();
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.tz, LoggerTimeZone::Utc);
        assert_eq!(cfg.level.as_str(), "info");
        assert!(cfg.with_targets);
        assert!(cfg.use_color);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: LoggerConfig = serde_json::from_str(r#"{"level":"cex_core=debug,warn"}"#).unwrap();
        assert_eq!(cfg.level.as_str(), "cex_core=debug,warn");
        assert_eq!(cfg.format, LoggerFormat::Text);
        assert!(cfg.use_color);
    }

    #[test]
    fn json_never_uses_color() {
        let cfg = LoggerConfig {
            format: LoggerFormat::Json,
            ..Default::default()
        };
        assert!(!cfg.ansi_enabled());
    }

    #[test]
    fn invalid_nested_values_fail_the_whole_config() {
        assert!(serde_json::from_str::<LoggerConfig>(r#"{"tz":"mars"}"#).is_err());
        assert!(serde_json::from_str::<LoggerConfig>(r#"{"format":"xml"}"#).is_err());
        assert!(serde_json::from_str::<LoggerConfig>(r#"{"level":"a=loud"}"#).is_err());
    }
}
