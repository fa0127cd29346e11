//! Well-known keys and paths shared by the decoder, locator and plan builder.
//!
//! These values form a contract with the scheduler (label keys) and with the
//! container images (mount path), so they live in one place.

/// Label carrying the processor spec as a JSON object.
pub const LABEL_PROCESSOR: &str = "processor";

/// Label carrying the artifact descriptor (message envelope) as a JSON object.
pub const LABEL_MESSAGE: &str = "message";

/// Container path the selected input artifact is always mounted at (read-only).
///
/// Downstream images read their input from here; it must not vary per processor.
pub const INGEST_MOUNT_PATH: &str = "/data/ingest_file";

/// Scheme prefix of location urls that point at the local filesystem.
pub const FILE_SCHEME: &str = "file://";

/// Processor memory is declared in megabytes; the runtime wants bytes.
pub const BYTES_PER_MB: i64 = 1_048_576;
