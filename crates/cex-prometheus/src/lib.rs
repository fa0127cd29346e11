//! Prometheus implementation of [`cex_core::metrics::MetricsBackend`].
//!
//! ## Metrics
//! - `cex_tasks_started_total{runtime}`
//! - `cex_tasks_completed_total{runtime, outcome}`
//! - `cex_task_duration_seconds{runtime}`
//! - `cex_image_pulls_total{runtime, result}`
//! - `cex_runtime_errors_total{runtime, kind}`
//!
//! No HTTP endpoint is provided; [`PrometheusMetrics::encode_text`] renders the
//! text exposition for whatever transport the host uses.
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::Registry;
