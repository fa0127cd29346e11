use std::sync::Arc;

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use cex_core::metrics::{MetricsBackend, TaskOutcome};

const NAMESPACE: &str = "cex";

/// Prometheus-backed task metrics.
///
/// Label values are bounded: `runtime` is the runtime name, `outcome` is one of
/// `finished|errored|failed`, `result` is `ok|error`, and `kind` is a failure
/// reason label.
#[derive(Clone)]
pub struct PrometheusMetrics {
    tasks_started: CounterVec,
    tasks_completed: CounterVec,
    task_duration: HistogramVec,
    image_pulls: CounterVec,
    runtime_errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Register all collectors on `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let tasks_started = CounterVec::new(
            Opts::new("tasks_started_total", "Tasks accepted by the runner").namespace(NAMESPACE),
            &["runtime"],
        )?;
        registry.register(Box::new(tasks_started.clone()))?;

        let tasks_completed = CounterVec::new(
            Opts::new("tasks_completed_total", "Tasks that reached a terminal state")
                .namespace(NAMESPACE),
            &["runtime", "outcome"],
        )?;
        registry.register(Box::new(tasks_completed.clone()))?;

        // Container tasks run from seconds to hours.
        let task_duration = HistogramVec::new(
            HistogramOpts::new(
                "task_duration_seconds",
                "Time from acceptance to terminal state",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.1, 0.5, 1.0, 5.0, 15.0, 60.0, 300.0, 900.0, 3600.0]),
            &["runtime"],
        )?;
        registry.register(Box::new(task_duration.clone()))?;

        let image_pulls = CounterVec::new(
            Opts::new("image_pulls_total", "Image pulls triggered by a missing image")
                .namespace(NAMESPACE),
            &["runtime", "result"],
        )?;
        registry.register(Box::new(image_pulls.clone()))?;

        let runtime_errors = CounterVec::new(
            Opts::new("runtime_errors_total", "Container runtime failures by kind")
                .namespace(NAMESPACE),
            &["runtime", "kind"],
        )?;
        registry.register(Box::new(runtime_errors.clone()))?;

        Ok(Self {
            tasks_started,
            tasks_completed,
            task_duration,
            image_pulls,
            runtime_errors,
            registry,
        })
    }

    /// Metrics on a private registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render the registry in the Prometheus text format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_task_started(&self, runtime: &str) {
        self.tasks_started.with_label_values(&[runtime]).inc();
    }

    fn record_task_completed(&self, runtime: &str, outcome: TaskOutcome, duration_ms: u64) {
        self.tasks_completed
            .with_label_values(&[runtime, outcome.as_label()])
            .inc();
        self.task_duration
            .with_label_values(&[runtime])
            .observe(duration_ms as f64 / 1000.0);
    }

    fn record_image_pull(&self, runtime: &str, success: bool) {
        let result = if success { "ok" } else { "error" };
        self.image_pulls.with_label_values(&[runtime, result]).inc();
    }

    fn record_runtime_error(&self, runtime: &str, error_kind: &str) {
        self.runtime_errors
            .with_label_values(&[runtime, error_kind])
            .inc();
    }
}
