//! Logging and Tracing Setup
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (`RUST_LOG`
//! overrides the configured level), a console layer in `json` or `pretty`
//! format, and, when enabled, an OpenTelemetry layer exporting spans over
//! OTLP gRPC.
//!
//! # Usage
//!
//! ```rust,ignore
//! use journal_service::telemetry::init_telemetry;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = journal_service::config::load_config(None)?;
//!     let _guard = init_telemetry(&config.observability);
//!     // ... application code
//! }
//! ```

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{BatchConfigBuilder, BatchSpanProcessor, SdkTracerProvider};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Guard that shuts down the tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Returns true if spans are being exported.
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Error shutting down tracer provider: {e:?}");
            }
        }
    }
}

/// Build the OTLP tracer provider, or `None` if export is disabled or the
/// exporter cannot be created.
fn build_tracer_provider(config: &ObservabilityConfig) -> Option<SdkTracerProvider> {
    if !config.otel.enabled {
        return None;
    }

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otel.endpoint)
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP exporter: {e:?}, falling back to console logging");
            return None;
        }
    };

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", config.otel.service_name.clone()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])
        .build();

    let batch_processor = BatchSpanProcessor::builder(exporter)
        .with_batch_config(
            BatchConfigBuilder::default()
                .with_scheduled_delay(Duration::from_secs(5))
                .build(),
        )
        .build();

    Some(
        SdkTracerProvider::builder()
            .with_resource(resource)
            .with_span_processor(batch_processor)
            .build(),
    )
}

/// Initialize logging and, if configured, OpenTelemetry span export.
///
/// Returns a guard that will shut down the tracer provider when dropped.
/// If a global subscriber is already installed the call only reports it.
#[must_use]
pub fn init_telemetry(config: &ObservabilityConfig) -> TelemetryGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let fmt_layer = if config.logging.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(false).boxed()
    };

    let provider = build_tracer_provider(config);
    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer().with_tracer(provider.tracer(config.otel.service_name.clone()))
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
    {
        eprintln!("Tracing subscriber already installed: {e}");
    }

    if provider.is_some() {
        tracing::info!(
            service_name = %config.otel.service_name,
            endpoint = %config.otel.endpoint,
            "OpenTelemetry initialized"
        );
    } else {
        tracing::info!(format = %config.logging.format, "Console logging initialized");
    }

    TelemetryGuard { provider }
}
