//! Scan command implementation.
//!
//! Runs the full pipeline: connect, list workloads, index events, classify
//! and deduplicate issues, summarize, then print and optionally export.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use kubescan_cluster::{ClusterSource, connect, current_context, sanitize_cluster_name};
use kubescan_core::{
    Classifier, EventIndex, ScanConfig, WORKLOAD_KIND, WorkloadSource, scan_and_deduplicate,
    summarize_by_namespace,
};
use kubescan_metrics::ScanMetrics;
use kubescan_report::{ExportKind, Snapshot, write_all};
use tracing::info;

use crate::cli::ScanArgs;
use crate::error::Result;
use crate::output::{OutputFormat, ScanReport};

/// Scan command executor.
pub struct ScanCommand {
    outdir: PathBuf,
}

impl ScanCommand {
    /// Create a new scan command writing exports into `outdir`.
    #[must_use]
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    /// Execute the scan command.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &ScanArgs,
    ) -> Result<()> {
        let client = connect(args.kubeconfig.as_deref()).await?;
        let cluster_name = args
            .cluster_name
            .clone()
            .or_else(|| current_context(args.kubeconfig.as_deref()));

        let namespaces = normalize_names(&args.namespace);
        let ignored: HashSet<String> = normalize_names(&args.ignore_ns).into_iter().collect();

        let source = ClusterSource::new(client);
        let workloads = source.list_workloads(&namespaces, &ignored).await?;
        info!(workloads = workloads.len(), "workloads listed");

        // Events are only fetched for namespaces that actually hold workloads.
        let mut event_namespaces: Vec<String> =
            workloads.iter().map(|w| w.namespace.clone()).collect();
        event_namespaces.sort();
        event_namespaces.dedup();

        let events = EventIndex::build(&source, &event_namespaces, WORKLOAD_KIND).await;
        let config = ScanConfig::new(args.restart_threshold);
        let classifier = Classifier::default();

        let issues = scan_and_deduplicate(workloads, &config, &events, &classifier).await;
        let summary = summarize_by_namespace(&issues);

        if let Some(path) = &args.metrics_file {
            let metrics = ScanMetrics::new();
            metrics.record_summary(&summary);
            fs::write(path, metrics.encode())?;
            info!(path = %path.display(), "metrics written");
        }

        let snapshot = Snapshot::new(issues, summary);

        if args.count {
            writeln!(writer, "{} issues", snapshot.issues.len())?;
        } else {
            let report = ScanReport {
                issues: snapshot.issues.clone(),
                summary: snapshot.summary.clone(),
            };
            format.write(writer, &report)?;
        }

        if let Some(spec) = &args.export {
            let kinds = ExportKind::parse_list(spec);
            if !kinds.is_empty() {
                let base = report_base_name(cluster_name.as_deref(), snapshot.generated_at);
                let written = write_all(&self.outdir, &base, &snapshot, &kinds)?;
                if !format.is_json() {
                    writeln!(writer)?;
                    for path in written {
                        writeln!(writer, "Exported {}", path.display())?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Trims entries and drops empties from a comma-split name list.
fn normalize_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Builds the report file base name: `[<cluster>-]scan-report-YYYYMMDD-HHMMSS`.
fn report_base_name(cluster_name: Option<&str>, generated_at: DateTime<Utc>) -> String {
    let timestamp = generated_at.format("%Y%m%d-%H%M%S");
    match cluster_name.map(sanitize_cluster_name) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}-scan-report-{timestamp}"),
        _ => format!("scan-report-{timestamp}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn base_name_without_cluster() {
        let at = Utc.with_ymd_and_hms(2026, 8, 23, 15, 30, 0).single().expect("valid time");
        assert_eq!(report_base_name(None, at), "scan-report-20260823-153000");
    }

    #[test]
    fn base_name_with_cluster_prefix() {
        let at = Utc.with_ymd_and_hms(2026, 8, 23, 15, 30, 0).single().expect("valid time");
        assert_eq!(
            report_base_name(Some("gke_proj/europe:west1"), at),
            "gke_proj-europe-west1-scan-report-20260823-153000"
        );
    }

    #[test]
    fn base_name_ignores_all_invalid_cluster_names() {
        let at = Utc.with_ymd_and_hms(2026, 8, 23, 15, 30, 0).single().expect("valid time");
        assert_eq!(
            report_base_name(Some("///"), at),
            "scan-report-20260823-153000"
        );
    }

    #[test]
    fn normalize_trims_and_drops_empty() {
        let names = vec![
            " ns1 ".to_string(),
            String::new(),
            "ns2".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_names(&names), vec!["ns1", "ns2"]);
    }
}
