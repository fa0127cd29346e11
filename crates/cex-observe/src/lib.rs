//! Logger setup for the agent.
//!
//! Everything is written to stderr; stdout belongs to the status channel.
mod config;
pub use config::LoggerConfig;

mod error;
pub use error::{LoggerError, LoggerResult};

mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;

mod timezone;
pub use timezone::{LoggerTimeZone, capture_local_offset};

mod timer;
pub use timer::LoggerRfc3339;

mod init;
pub use init::init_logger;
