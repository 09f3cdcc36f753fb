//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON Files
//! ```
//!
//! Spans are written as OTLP JSON lines to
//! `~/.local/share/zellij/galleria/galleria-otlp.json`, rotating at 10MB with
//! three backups kept. Tracing is only enabled when `trace_level` is set in
//! the plugin configuration.
//!
//! Spans started while handling a key event are carried across the
//! `web_request` round trip through the request context map, so a search and
//! the response that completes it share one trace.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// Service and instrumentation scope name attached to every span.
pub const SERVICE_NAME: &str = "Galleria";

/// File name of the active trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "galleria-otlp.json";
