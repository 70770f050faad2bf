//! Prometheus metrics for the journal service.
//!
//! # Example
//!
//! ```ignore
//! use journal_service::observability::{init_metrics, record_workflow, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::with_port(9090))?;
//! record_workflow("login", "success", 0.042);
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for workflow latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::with_port(9090)
    }
}

impl MetricsConfig {
    /// Listen on all interfaces at `port`.
    #[must_use]
    pub fn with_port(port: u16) -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            // Each workflow is one to four remote round-trips
            latency_buckets: vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// Starts an HTTP listener exposing `/metrics`.
///
/// # Errors
///
/// Returns an error if the exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Record a finished workflow.
///
/// # Arguments
///
/// * `workflow` - Workflow name (e.g., "register", "login")
/// * `outcome` - `"success"` or the error reason (e.g., `"USERNAME_TAKEN"`)
/// * `latency_seconds` - Wall time of the whole workflow
pub fn record_workflow(workflow: &str, outcome: &str, latency_seconds: f64) {
    counter!(
        "journal_workflow_total",
        "workflow" => workflow.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(
        "journal_workflow_duration_seconds",
        "workflow" => workflow.to_string()
    )
    .record(latency_seconds);
}

/// Record a call to the hosted backend.
///
/// # Arguments
///
/// * `target` - `"auth"` or `"rest"`
/// * `operation` - Operation name (e.g., "sign_up", "insert_profile")
/// * `status` - `"ok"`, `"rejected"` (the backend answered with an error) or
///   `"unavailable"` (no usable response)
pub fn record_backend_call(target: &str, operation: &str, status: &str) {
    counter!(
        "journal_backend_calls_total",
        "target" => target.to_string(),
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record an identity left without a profile by a failed registration.
pub fn record_orphan_identity() {
    counter!("journal_orphan_identities_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_9090() {
        let config = MetricsConfig::default();
        assert_eq!(config.listen_addr.port(), 9090);
        assert!(!config.latency_buckets.is_empty());
    }

    #[test]
    fn latency_buckets_ascending() {
        let config = MetricsConfig::with_port(9100);
        assert!(
            config.latency_buckets.windows(2).all(|w| w[0] < w[1]),
            "buckets must be strictly ascending"
        );
    }

    #[test]
    fn recording_without_recorder_is_noop() {
        // No recorder installed: recording is a no-op and must not panic
        record_workflow("login", "success", 0.015);
        record_backend_call("auth", "sign_in", "ok");
        record_orphan_identity();
    }
}
