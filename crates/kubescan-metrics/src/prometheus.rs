//! Prometheus metrics for scan results.
//!
//! Exposes the per-namespace severity summary of the latest scan:
//! - `kubescan_issues_total` gauge labelled by namespace and severity
//! - `kubescan_namespace_count` gauge counting namespaces with issues
//! - `kubescan_last_scan_timestamp` gauge with the Unix time of the run
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use kubescan_core::SeveritySummary;
//! use kubescan_metrics::ScanMetrics;
//!
//! let metrics = ScanMetrics::new();
//! let mut summary = HashMap::new();
//! summary.insert(
//!     "ns1".to_string(),
//!     SeveritySummary { critical: 1, high: 2, medium: 0, low: 0 },
//! );
//! metrics.record_summary(&summary);
//!
//! let output = metrics.encode();
//! assert!(output.contains("kubescan_issues_total"));
//! assert!(output.contains("kubescan_namespace_count 1"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kubescan_core::{Severity, SeveritySummary};
use parking_lot::RwLock;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

/// Label set for per-namespace issue gauges.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct IssueLabels {
    /// The namespace the issues were found in.
    pub namespace: String,
    /// The severity bucket ("critical", "high", "medium", "low").
    pub severity: String,
}

/// Registry of scan metrics.
///
/// Each scan replaces the previous scan's gauges wholesale, so a namespace
/// that recovered stops being reported rather than lingering at its old
/// value.
#[derive(Clone)]
pub struct ScanMetrics {
    registry: Arc<RwLock<Registry>>,
    issues_total: Family<IssueLabels, Gauge>,
    namespace_count: Gauge,
    last_scan_timestamp: Gauge,
}

impl std::fmt::Debug for ScanMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanMetrics")
            .field("namespace_count", &self.namespace_count.get())
            .finish_non_exhaustive()
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanMetrics {
    /// Creates the registry with all scan metrics registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let issues_total = Family::<IssueLabels, Gauge>::default();
        registry.register(
            "kubescan_issues_total",
            "Number of workload issues by namespace and severity",
            issues_total.clone(),
        );

        let namespace_count = Gauge::default();
        registry.register(
            "kubescan_namespace_count",
            "Number of namespaces with at least one issue",
            namespace_count.clone(),
        );

        let last_scan_timestamp = Gauge::default();
        registry.register(
            "kubescan_last_scan_timestamp",
            "Unix timestamp of the last completed scan",
            last_scan_timestamp.clone(),
        );

        Self {
            registry: Arc::new(RwLock::new(registry)),
            issues_total,
            namespace_count,
            last_scan_timestamp,
        }
    }

    /// Replaces the exported gauges with a fresh scan summary.
    #[allow(clippy::cast_possible_wrap)] // Namespace counts won't exceed i64::MAX
    pub fn record_summary(&self, summary: &HashMap<String, SeveritySummary>) {
        self.issues_total.clear();

        for (namespace, counts) in summary {
            for (severity, count) in [
                (Severity::Critical, counts.critical),
                (Severity::High, counts.high),
                (Severity::Medium, counts.medium),
                (Severity::Low, counts.low),
            ] {
                let labels = IssueLabels {
                    namespace: namespace.clone(),
                    severity: severity.to_string(),
                };
                self.issues_total.get_or_create(&labels).set(i64::from(count));
            }
        }

        self.namespace_count.set(summary.len() as i64);
        self.last_scan_timestamp.set(Utc::now().timestamp());
    }

    /// Encodes all metrics in Prometheus text format.
    #[must_use]
    pub fn encode(&self) -> String {
        let registry = self.registry.read();
        let mut buffer = String::new();
        if encode(&mut buffer, &registry).is_err() {
            tracing::error!("failed to encode prometheus metrics");
            return String::new();
        }
        buffer
    }
}
