//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` spans through `tracing-opentelemetry` into an SDK tracer
//! provider whose exporter appends OTLP JSON to a file in the plugin's data
//! directory. Nothing is installed unless a trace level is configured.

use super::{tracer, SERVICE_NAME, TRACE_FILE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber exporting spans to the trace file.
///
/// The pipeline is:
/// 1. `EnvFilter` built from the configured level (`info`, `galleria=debug`, ...)
/// 2. `OpenTelemetryLayer` turning spans into OpenTelemetry spans
/// 3. [`tracer::create_tracer_provider`], exporting each finished span
/// 4. A rotating [`FileWriter`](super::file_writer::FileWriter) on disk
///
/// # Parameters
///
/// * `config` - Plugin configuration; `trace_level` enables tracing and
///   `api_base_url` is recorded as a resource attribute
///
/// # File Location
///
/// Spans go to `galleria-otlp.json` inside the sandbox data directory, which
/// Zellij maps to `~/.local/share/zellij/galleria/` on the host.
///
/// # Initialization Behavior
///
/// - Returns immediately when `trace_level` is unset
/// - Gives up quietly if the data directory cannot be created
/// - Only the first successful call installs a subscriber; later calls are no-ops
///
/// # Example
///
/// ```rust
/// use galleria::observability::init_tracing;
/// use galleria::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let Some(level) = config.trace_level.clone() else {
        return;
    };

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("galleria.api_base_url", config.api_base_url.clone()),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
