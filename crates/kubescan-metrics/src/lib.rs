//! Prometheus metric export for kubescan.
//!
//! The scanner is a batch tool, so metrics are encoded to text after a scan
//! and written wherever the caller points them (typically a file picked up
//! by a node exporter's textfile collector) rather than served over HTTP.

pub mod prometheus;

pub use prometheus::{IssueLabels, ScanMetrics};
