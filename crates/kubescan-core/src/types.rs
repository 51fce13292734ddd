//! Core data model for the scan pipeline.
//!
//! Inputs (`Workload`, `ClusterEvent`) are read-only views of cluster state
//! supplied by a source implementation; the pipeline never mutates them.
//! Outputs (`Issue`, `SeveritySummary`) are plain data owned by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity tier assigned to an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Workload is broken and needs immediate action.
    Critical,
    /// Workload is failing or about to fail.
    High,
    /// Degraded but recoverable condition.
    Medium,
    /// Informational; everything else maps here.
    Low,
}

impl Severity {
    /// Numeric priority used for deduplication (higher wins).
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// State of a single container within a workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    /// Container is waiting to start, with the reason reported by the runtime.
    Waiting {
        /// Wait reason, e.g. `CrashLoopBackOff` or `ImagePullBackOff`.
        reason: String,
    },
    /// Container has terminated, with the reason reported by the runtime.
    Terminated {
        /// Termination reason, e.g. `OOMKilled`. May be empty.
        reason: String,
    },
    /// Running or otherwise unremarkable.
    Other,
}

/// Status record for one container of a workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    /// Container name.
    pub name: String,
    /// Number of times the container has restarted.
    pub restart_count: i32,
    /// Current state of the container.
    pub state: ContainerState,
}

/// One running unit under observation (a pod), as reported by the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Namespace the workload lives in.
    pub namespace: String,
    /// Workload name.
    pub name: String,
    /// Current phase (e.g. `Running`, `Pending`, `Failed`). May be empty.
    pub phase: String,
    /// Workload-level status reason (e.g. `Evicted`). May be empty.
    pub reason: String,
    /// Node the workload is scheduled on.
    pub node_name: String,
    /// Per-container status records.
    pub containers: Vec<ContainerStatus>,
}

impl Workload {
    /// Maximum restart count across all containers.
    #[must_use]
    pub fn max_restart_count(&self) -> i32 {
        self.containers
            .iter()
            .map(|c| c.restart_count)
            .max()
            .unwrap_or(0)
    }
}

/// A recent cluster event referencing an involved object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterEvent {
    /// Namespace the event was recorded in.
    pub namespace: String,
    /// Kind of the involved object (e.g. `Pod`).
    pub object_kind: String,
    /// Name of the involved object.
    pub object_name: String,
    /// Free-text event message.
    pub message: String,
    /// When the event was last observed.
    pub last_timestamp: DateTime<Utc>,
}

/// A detected issue for one workload. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Kind of the workload the issue refers to (always `Pod` here).
    pub kind: String,
    /// Namespace of the workload.
    pub namespace: String,
    /// Name of the workload.
    pub name: String,
    /// Severity tier.
    pub severity: Severity,
    /// Short machine reason, e.g. `CrashLoopBackOff` or `HighRestartCount`.
    pub reason: String,
    /// Human-readable root cause looked up from the reason.
    pub root_cause: String,
    /// Normalized workload status string at detection time.
    pub status: String,
    /// Node the workload was scheduled on.
    pub node_name: String,
    /// Detection timestamp; shared by all issues of one workload per scan.
    pub timestamp: DateTime<Utc>,
    /// Restart count that triggered or accompanied the issue.
    pub restart_count: i32,
    /// Latest correlated event message, empty when none was indexed.
    pub last_event: String,
}

impl Issue {
    /// Identity key used by deduplication: one issue per workload.
    #[must_use]
    pub fn workload_key(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// Per-namespace issue counts by severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeveritySummary {
    /// Number of critical issues.
    pub critical: u32,
    /// Number of high issues.
    pub high: u32,
    /// Number of medium issues.
    pub medium: u32,
    /// Number of low issues.
    pub low: u32,
}

impl SeveritySummary {
    /// Increments the counter matching the given severity.
    pub const fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    /// Total issue count across all tiers.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}
