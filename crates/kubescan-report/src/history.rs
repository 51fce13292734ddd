//! Historical report listing and snapshot path resolution.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kubescan_core::SeveritySummary;
use serde::Serialize;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::snapshot::Snapshot;

/// Metadata about one historical report snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ReportInfo {
    /// Full path of the snapshot file.
    pub path: PathBuf,
    /// File name within the reports directory.
    pub file_name: String,
    /// When the snapshot was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of issues in the snapshot.
    pub issue_count: usize,
    /// Per-namespace severity summary of the snapshot.
    pub summary: HashMap<String, SeveritySummary>,
}

impl ReportInfo {
    /// Severity totals across all namespaces.
    #[must_use]
    pub fn totals(&self) -> SeveritySummary {
        let mut totals = SeveritySummary::default();
        for summary in self.summary.values() {
            totals.critical += summary.critical;
            totals.high += summary.high;
            totals.medium += summary.medium;
            totals.low += summary.low;
        }
        totals
    }
}

/// Lists all report snapshots in `outdir`, newest first.
///
/// Files that are not readable snapshots are skipped, not errors; only a
/// missing or unreadable directory fails.
pub fn list_history(outdir: &Path) -> Result<Vec<ReportInfo>> {
    let mut reports = Vec::new();

    for entry in fs::read_dir(outdir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let Ok(snapshot) = Snapshot::load(&path) else {
            debug!(path = %path.display(), "skipping unreadable snapshot");
            continue;
        };

        let file_name = entry.file_name().to_string_lossy().into_owned();
        reports.push(ReportInfo {
            path,
            file_name,
            generated_at: snapshot.generated_at,
            issue_count: snapshot.issues.len(),
            summary: snapshot.summary,
        });
    }

    reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
    Ok(reports)
}

/// Resolves a snapshot spec to a file path.
///
/// Accepts, in order: an existing path (absolute or relative), a file name
/// inside `outdir`, or a bare `YYYYMMDD-HHMMSS` timestamp matched against
/// the exporter's `*scan-report-<timestamp>.json` naming scheme (report
/// files may carry a cluster-name prefix).
pub fn resolve_snapshot_path(outdir: &Path, spec: &str) -> Result<PathBuf> {
    let as_path = PathBuf::from(spec);
    if as_path.exists() {
        return Ok(as_path);
    }

    let in_outdir = outdir.join(spec);
    if in_outdir.exists() {
        return Ok(in_outdir);
    }

    if !spec.ends_with(".json") {
        let suffix = format!("scan-report-{spec}.json");
        if let Ok(entries) = fs::read_dir(outdir) {
            for entry in entries.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.ends_with(&suffix) {
                    return Ok(entry.path());
                }
            }
        }
    }

    Err(ReportError::SnapshotNotFound {
        spec: spec.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn write_snapshot(dir: &Path, name: &str, generated_secs: i64, issues: usize) {
        let mut snapshot = Snapshot::new(Vec::new(), HashMap::new());
        snapshot.generated_at = Utc.timestamp_opt(generated_secs, 0).single().expect("ts");
        for i in 0..issues {
            snapshot.issues.push(kubescan_core::Issue {
                kind: "Pod".to_string(),
                namespace: "ns".to_string(),
                name: format!("pod-{i}"),
                severity: kubescan_core::Severity::Low,
                reason: "Weird".to_string(),
                root_cause: String::new(),
                status: String::new(),
                node_name: String::new(),
                timestamp: snapshot.generated_at,
                restart_count: 0,
                last_event: String::new(),
            });
        }
        snapshot.save(&dir.join(name)).expect("save snapshot");
    }

    #[test]
    fn history_is_sorted_newest_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_snapshot(dir.path(), "scan-report-20260101-000000.json", 100, 1);
        write_snapshot(dir.path(), "scan-report-20260102-000000.json", 300, 2);
        write_snapshot(dir.path(), "scan-report-20260101-120000.json", 200, 0);

        let reports = list_history(dir.path()).expect("list history");
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].file_name, "scan-report-20260102-000000.json");
        assert_eq!(reports[0].issue_count, 2);
        assert_eq!(reports[2].file_name, "scan-report-20260101-000000.json");
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_snapshot(dir.path(), "scan-report-20260101-000000.json", 100, 1);
        fs::write(dir.path().join("garbage.json"), "not json").expect("write");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let reports = list_history(dir.path()).expect("list history");
        assert_eq!(reports.len(), 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("does-not-exist");
        assert!(list_history(&missing).is_err());
    }

    #[test]
    fn resolve_by_file_name_and_timestamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_snapshot(dir.path(), "prod-scan-report-20260101-120000.json", 100, 0);

        let by_name = resolve_snapshot_path(dir.path(), "prod-scan-report-20260101-120000.json")
            .expect("resolve by file name");
        assert!(by_name.exists());

        // Bare timestamp matches despite the cluster-name prefix.
        let by_timestamp =
            resolve_snapshot_path(dir.path(), "20260101-120000").expect("resolve by timestamp");
        assert_eq!(by_timestamp, by_name);
    }

    #[test]
    fn resolve_unknown_spec_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = resolve_snapshot_path(dir.path(), "20990101-000000")
            .expect_err("unknown spec must fail");
        assert!(matches!(err, ReportError::SnapshotNotFound { .. }));
    }

    #[test]
    fn totals_sum_across_namespaces() {
        let mut summary = HashMap::new();
        summary.insert(
            "a".to_string(),
            SeveritySummary {
                critical: 1,
                high: 2,
                ..SeveritySummary::default()
            },
        );
        summary.insert(
            "b".to_string(),
            SeveritySummary {
                high: 1,
                low: 4,
                ..SeveritySummary::default()
            },
        );
        let info = ReportInfo {
            path: PathBuf::new(),
            file_name: String::new(),
            generated_at: Utc::now(),
            issue_count: 8,
            summary,
        };
        let totals = info.totals();
        assert_eq!(
            (totals.critical, totals.high, totals.medium, totals.low),
            (1, 3, 0, 4)
        );
    }
}
