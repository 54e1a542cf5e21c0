//! Tracing subscriber setup.
//!
//! Wires the `tracing` macros used throughout the crate into an
//! OpenTelemetry pipeline that exports to a local rotating trace file.
//! Observability is optional: every failure path here degrades to "no
//! traces" and never to a startup error.

use super::export;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// The filter level comes from `config.trace_level` (default `info`); spans
/// land in `<data dir>/clipstack-traces.json` as OTLP JSON lines.
///
/// Idempotent: only the first call installs a subscriber, later calls are
/// no-ops. Safe to call with the data directory missing or unwritable.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        "clipstack",
    )]);

    let provider = export::file_provider(data_dir.join("clipstack-traces.json"), resource);
    let tracer = provider.tracer("clipstack");

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(tracer));

    let _ = subscriber.try_init();
}
