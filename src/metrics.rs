//! Prometheus metrics for request outcomes and store latency.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

/// Requests counter metric name, labelled by operation and outcome.
pub const METRIC_REQUESTS: &str = "translation_requests_total";
/// Store operation latency metric name, labelled by operation.
pub const METRIC_STORE_LATENCY: &str = "store_operation_latency_ms";

/// Install the Prometheus recorder and return the handle used to render `/metrics`.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_REQUESTS,
        "Translation API requests by operation and outcome"
    );
    describe_histogram!(
        METRIC_STORE_LATENCY,
        "Page store operation latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Count one API request.
pub fn record_request(operation: &'static str, outcome: &'static str) {
    counter!(METRIC_REQUESTS, "operation" => operation, "outcome" => outcome).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
    operation: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric and operation label.
    pub fn new(metric_name: &'static str, operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
            operation,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.elapsed_ms();
        histogram!(self.metric_name, "operation" => self.operation).record(latency_ms);
    }
}

/// Create a latency timer for a store operation.
pub fn timer_store(operation: &'static str) -> LatencyTimer {
    LatencyTimer::new(METRIC_STORE_LATENCY, operation)
}
