//! Reason classification: severity tiers, root-cause text, specificity ranks.
//!
//! The lookup tables are immutable instance state built once at startup and
//! passed by reference, so tests can substitute their own tables without
//! touching global state.

use std::collections::HashMap;

use crate::types::Severity;

/// Synthetic reason emitted when a container's restart count exceeds the
/// configured threshold.
pub const HIGH_RESTART_REASON: &str = "HighRestartCount";

/// Root cause attached to every `HighRestartCount` issue.
pub const HIGH_RESTART_ROOT_CAUSE: &str = "Container is unstable: excessive restarts.";

/// Fallback root cause for reasons with no table entry.
pub const UNKNOWN_ROOT_CAUSE: &str = "Cause unknown: inspect container logs.";

/// Specificity rank for a reason present in no table: more specific than
/// the generic restart signal, less specific than a known failure reason.
const DEFAULT_REASON_RANK: u8 = 5;

/// Immutable classification tables mapping failure reasons to severity
/// tiers, root-cause explanations and deduplication ranks.
#[derive(Debug, Clone)]
pub struct Classifier {
    severity_by_reason: HashMap<String, Severity>,
    root_cause_by_reason: HashMap<String, String>,
    rank_by_reason: HashMap<String, u8>,
}

impl Classifier {
    /// Creates a classifier with caller-supplied tables.
    ///
    /// Primarily useful in tests; production code uses [`Classifier::default`].
    #[must_use]
    pub fn new(
        severity_by_reason: HashMap<String, Severity>,
        root_cause_by_reason: HashMap<String, String>,
        rank_by_reason: HashMap<String, u8>,
    ) -> Self {
        Self {
            severity_by_reason,
            root_cause_by_reason,
            rank_by_reason,
        }
    }

    /// Maps a failure reason to its severity tier. Unknown reasons are low.
    #[must_use]
    pub fn severity_from_reason(&self, reason: &str) -> Severity {
        self.severity_by_reason
            .get(reason)
            .copied()
            .unwrap_or(Severity::Low)
    }

    /// Maps a failure reason to a short root-cause explanation.
    #[must_use]
    pub fn root_cause_from_reason(&self, reason: &str) -> String {
        self.root_cause_by_reason
            .get(reason)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_ROOT_CAUSE.to_string())
    }

    /// Specificity rank of a reason for deduplication tie-breaks.
    ///
    /// A specific container failure (e.g. `CrashLoopBackOff`) outranks the
    /// generic `HighRestartCount` signal at equal severity.
    #[must_use]
    pub fn reason_rank(&self, reason: &str) -> u8 {
        self.rank_by_reason
            .get(reason)
            .copied()
            .unwrap_or(DEFAULT_REASON_RANK)
    }

    /// Severity signal for a restart count against a caller-supplied threshold.
    #[must_use]
    pub const fn restart_severity(count: i32, threshold: i32) -> Severity {
        if count > threshold {
            Severity::High
        } else {
            Severity::Low
        }
    }

    /// Severity and root cause for a reason, with the `HighRestartCount`
    /// override applied: the synthetic reason is always high severity with
    /// a fixed root cause, bypassing the tables.
    #[must_use]
    pub fn classify(&self, reason: &str) -> (Severity, String) {
        if reason == HIGH_RESTART_REASON {
            return (Severity::High, HIGH_RESTART_ROOT_CAUSE.to_string());
        }
        (
            self.severity_from_reason(reason),
            self.root_cause_from_reason(reason),
        )
    }
}

impl Default for Classifier {
    fn default() -> Self {
        let severity_by_reason = [
            ("ImagePullBackOff", Severity::Critical),
            ("ErrImagePull", Severity::Critical),
            ("CrashLoopBackOff", Severity::High),
            ("Pending", Severity::High),
            ("Evicted", Severity::Medium),
            ("OOMKilled", Severity::Medium),
        ]
        .into_iter()
        .map(|(reason, severity)| (reason.to_string(), severity))
        .collect();

        let root_cause_by_reason = [
            (
                "ImagePullBackOff",
                "Image could not be pulled: wrong tag, private registry, or missing pull credentials.",
            ),
            (
                "ErrImagePull",
                "Image could not be pulled: wrong tag, private registry, or missing pull credentials.",
            ),
            (
                "CrashLoopBackOff",
                "Container starts and then crashes repeatedly, usually an application error or bad configuration.",
            ),
            (
                "Evicted",
                "Pod was evicted because the node ran short of resources (disk or memory pressure); check node resources.",
            ),
            (
                "OOMKilled",
                "Container was killed after exceeding its memory limit (out of memory).",
            ),
            (
                "Pending",
                "Insufficient resources (CPU/RAM) or no node matches the selector/taints.",
            ),
        ]
        .into_iter()
        .map(|(reason, cause)| (reason.to_string(), cause.to_string()))
        .collect();

        // Fixed contract; the exact values are reproduced, not tuned.
        let rank_by_reason = [
            ("ImagePullBackOff", 10),
            ("ErrImagePull", 10),
            ("CrashLoopBackOff", 9),
            ("OOMKilled", 8),
            ("Evicted", 7),
            ("Pending", 6),
            (HIGH_RESTART_REASON, 1),
        ]
        .into_iter()
        .map(|(reason, rank)| (reason.to_string(), rank))
        .collect();

        Self {
            severity_by_reason,
            root_cause_by_reason,
            rank_by_reason,
        }
    }
}
