//! Observability module for metrics.
//!
//! Prometheus counters and histograms for the journal workflows and the
//! backend calls they make. Tracing setup lives in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_backend_call, record_orphan_identity,
    record_workflow,
};
