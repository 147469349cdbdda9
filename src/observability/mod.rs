//! OpenTelemetry-based observability with file-based trace export.
//!
//! Zellij plugins run inside a WASM sandbox with no network access of
//! their own for telemetry, so spans are exported to a rotating JSON
//! file instead of an OTLP collector endpoint:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON file
//! ```
//!
//! Traces land in `/host/.local/share/zellij/zinema/zinema-otlp.json`,
//! one OTLP JSON document per line, rotating at 10MB with three backups
//! retained. The trace level comes from the `trace_level` plugin config
//! option, defaulting to `info`.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
