use anyhow::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::runtime::Tokio;
use opentelemetry_sdk::trace::TracerProvider;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::metrics;

pub struct Observability {
    pub registry: Registry,
    tracer_provider: TracerProvider,
}

impl Observability {
    pub fn init() -> Result<Self> {
        let registry = Registry::new_custom(Some("pokebe".into()), None)?;
        metrics::register_all(&registry)?;

        let otel_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4317".into());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&otel_endpoint)
            .build()?;

        let tracer_provider = TracerProvider::builder()
            .with_batch_exporter(exporter, Tokio)
            .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
                "service.name",
                "pokebe-api",
            )]))
            .build();

        let tracer = tracer_provider.tracer("pokebe");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "api=debug,tower_http=debug".into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(otel_layer)
            .init();

        tracing::info!(
            "Observability stack initialized (Prometheus + OTel → {})",
            otel_endpoint
        );
        Ok(Self {
            registry,
            tracer_provider,
        })
    }

    pub fn shutdown(&self) {
        for result in self.tracer_provider.force_flush() {
            if let Err(err) = result {
                tracing::warn!("span flush failed during shutdown: {err}");
            }
        }
        if let Err(err) = self.tracer_provider.shutdown() {
            tracing::warn!("tracer provider shutdown failed: {err}");
        }
    }
}
