//! Point-in-time report snapshots persisted as JSON.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use kubescan_core::{Issue, SeveritySummary};
use serde::{Deserialize, Serialize};

/// A persisted scan result: generation time, the deduplicated issue list,
/// and the per-namespace summary derived from it.
///
/// The diff engine only requires the issue lists of two snapshots; the rest
/// is metadata for history listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the scan that produced this snapshot ran.
    pub generated_at: DateTime<Utc>,
    /// Deduplicated issues found by the scan.
    pub issues: Vec<Issue>,
    /// Per-namespace severity summary for the same issue set.
    pub summary: HashMap<String, SeveritySummary>,
}

impl Snapshot {
    /// Creates a snapshot stamped with the current time.
    #[must_use]
    pub fn new(issues: Vec<Issue>, summary: HashMap<String, SeveritySummary>) -> Self {
        Self {
            generated_at: Utc::now(),
            issues,
            summary,
        }
    }

    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the snapshot to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Loads a snapshot from a JSON file.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubescan_core::Severity;

    fn sample_issue() -> Issue {
        Issue {
            kind: "Pod".to_string(),
            namespace: "ns1".to_string(),
            name: "crasher".to_string(),
            severity: Severity::High,
            reason: "CrashLoopBackOff".to_string(),
            root_cause: "app keeps crashing".to_string(),
            status: "Running".to_string(),
            node_name: "node-1".to_string(),
            timestamp: Utc::now(),
            restart_count: 3,
            last_event: String::new(),
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scan-report-20260101-120000.json");

        let mut summary = HashMap::new();
        summary.insert(
            "ns1".to_string(),
            SeveritySummary {
                high: 1,
                ..SeveritySummary::default()
            },
        );
        let snapshot = Snapshot::new(vec![sample_issue()], summary);
        snapshot.save(&path).expect("save snapshot");

        let loaded = Snapshot::load(&path).expect("load snapshot");
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").expect("write file");

        let err = Snapshot::load(&path).expect_err("malformed JSON must fail");
        assert!(matches!(err, crate::error::ReportError::Json(_)));
    }

    #[test]
    fn json_uses_lowercase_severity() {
        let snapshot = Snapshot::new(vec![sample_issue()], HashMap::new());
        let json = snapshot.to_json().expect("serialize");
        assert!(json.contains("\"severity\": \"high\""));
    }
}
