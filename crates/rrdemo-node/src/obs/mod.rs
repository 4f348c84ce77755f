//! Observability: structured event log and in-process metrics.
//!
//! The structured log is the product output consumed by the log shipper.
//! Operator diagnostics go through `tracing` instead.

pub mod logger;
pub mod metrics;

pub use logger::{FileSink, LogSink, MemorySink, StdoutSink, StructuredLogger};
pub use metrics::NodeMetrics;
