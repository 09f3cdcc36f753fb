//! Tracer provider backed by a file span exporter.
//!
//! Plugins run sandboxed without a collector to talk to, so finished spans are
//! appended to a local file instead of being sent over the network.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Span exporter that writes each exported batch as one OTLP JSON line.
///
/// Every line is a self-contained `resourceSpans` document, so the file can
/// be tailed or split without losing resource attributes.
#[derive(Debug)]
struct FileSpanExporter {
    /// Rotating output file.
    writer: FileWriter,
    /// Carries the resource stamped onto every batch.
    formatter: SpanFormatter,
    /// Set once the provider shuts down; later exports fail.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// # Parameters
    ///
    /// * `file_path` - Trace file, created on the first export
    /// * `resource` - Service name, version and API base URL attributes
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Formats and appends one batch.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed
    /// - `Err(TraceError)` after shutdown, or when the write or rotation fails
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("exporter is shut down"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    /// Stops accepting batches. The file handle is closed on drop.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// Replaces the resource when the provider supplies its final one.
    fn set_resource(&mut self, res: &Resource) {
        self.formatter = SpanFormatter::new(res.clone());
    }
}

/// Builds a provider that exports every span immediately to `file_path`.
///
/// Uses the simple (synchronous) span processor, since the plugin has no async
/// runtime to drive a batch processor.
///
/// # Parameters
///
/// * `file_path` - Destination trace file
/// * `resource` - Resource attached to the provider and to every exported line
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
