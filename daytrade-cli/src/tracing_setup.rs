//! Log output for the daytrade CLI
//!
//! Console logs always go through a compact fmt layer filtered by
//! `RUST_LOG` (default `info`, or `debug` with `--debug`). Builds with the
//! `telemetry` feature can add an OTLP span exporter with `--otel`, sent
//! to `OTEL_EXPORTER_OTLP_ENDPOINT` (default `http://localhost:4317`).

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConfig {
    pub debug: bool,
    pub otel: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Install the global subscriber. Fails if one is already set.
pub fn init(config: &TracingConfig) -> Result<()> {
    let console = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .compact();
    let registry = tracing_subscriber::registry()
        .with(config.filter())
        .with(console);

    #[cfg(feature = "telemetry")]
    {
        let spans = if config.otel {
            Some(otlp::layer()?)
        } else {
            None
        };
        registry.with(spans).try_init().map_err(|e| anyhow!(e))?;
    }

    #[cfg(not(feature = "telemetry"))]
    {
        registry.try_init().map_err(|e| anyhow!(e))?;
        if config.otel {
            tracing::warn!("--otel ignored: built without the `telemetry` feature");
        }
    }

    Ok(())
}

/// Flush pending spans before exit.
pub fn shutdown_otel() {
    #[cfg(feature = "telemetry")]
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(feature = "telemetry")]
mod otlp {
    use anyhow::{anyhow, Result};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::{Tracer, TracerProvider};
    use opentelemetry_sdk::{runtime, Resource};
    use tracing::Subscriber;
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    const DEFAULT_ENDPOINT: &str = "http://localhost:4317";

    /// Span layer exporting to the OTLP collector, registered globally
    /// so `shutdown_otel` can flush it.
    pub fn layer<S>() -> Result<OpenTelemetryLayer<S, Tracer>>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&endpoint)
            .build()
            .map_err(|e| anyhow!("OTLP exporter for {}: {}", endpoint, e))?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                "daytrade",
            )]))
            .build();
        let tracer = provider.tracer("daytrade");
        let _ = opentelemetry::global::set_tracer_provider(provider);

        Ok(tracing_opentelemetry::layer().with_tracer(tracer))
    }
}
