//! Structural diffing between two issue snapshots.
//!
//! Identity for matching is the `namespace/kind/name` triple, deliberately
//! excluding severity and reason: a workload whose reason changed between
//! scans is reported as changed, not as resolved-plus-new.

use std::collections::HashMap;

use kubescan_core::Issue;
use serde::Serialize;

/// A matched issue pair whose observable fields differ.
#[derive(Debug, Clone, Serialize)]
pub struct IssueChange {
    /// The issue as it appeared in the older snapshot.
    pub old: Issue,
    /// The issue as it appears in the newer snapshot.
    pub new: Issue,
    /// One human-readable line per differing field,
    /// formatted `"<Field>: <old> → <new>"`.
    pub changes: Vec<String>,
}

/// Differences between two issue snapshots.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiffResult {
    /// Issues present only in the newer snapshot.
    pub new_issues: Vec<Issue>,
    /// Issues present only in the older snapshot.
    pub resolved_issues: Vec<Issue>,
    /// Issues present in both with at least one differing field.
    pub changed_issues: Vec<IssueChange>,
}

impl DiffResult {
    /// True when the two snapshots are observably identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_issues.is_empty()
            && self.resolved_issues.is_empty()
            && self.changed_issues.is_empty()
    }
}

fn identity_key(issue: &Issue) -> String {
    format!("{}/{}/{}", issue.namespace, issue.kind, issue.name)
}

/// Compares two snapshots' issue lists.
///
/// Total function: absence of a key on either side is a normal branch.
/// Result collections are sorted by identity key for deterministic output.
#[must_use]
pub fn diff(old: &[Issue], new: &[Issue]) -> DiffResult {
    let old_by_key: HashMap<String, &Issue> =
        old.iter().map(|i| (identity_key(i), i)).collect();
    let new_by_key: HashMap<String, &Issue> =
        new.iter().map(|i| (identity_key(i), i)).collect();

    let mut result = DiffResult::default();

    for (key, new_issue) in &new_by_key {
        match old_by_key.get(key) {
            None => result.new_issues.push((*new_issue).clone()),
            Some(old_issue) => {
                let changes = compare_issues(old_issue, new_issue);
                if !changes.is_empty() {
                    result.changed_issues.push(IssueChange {
                        old: (*old_issue).clone(),
                        new: (*new_issue).clone(),
                        changes,
                    });
                }
            }
        }
    }

    for (key, old_issue) in &old_by_key {
        if !new_by_key.contains_key(key) {
            result.resolved_issues.push((*old_issue).clone());
        }
    }

    result.new_issues.sort_by_key(identity_key);
    result.resolved_issues.sort_by_key(identity_key);
    result.changed_issues.sort_by_key(|c| identity_key(&c.new));
    result
}

/// Compares the six observable fields of a matched issue pair.
fn compare_issues(old: &Issue, new: &Issue) -> Vec<String> {
    let mut changes = Vec::new();

    if old.severity != new.severity {
        changes.push(format!("Severity: {} → {}", old.severity, new.severity));
    }
    if old.reason != new.reason {
        changes.push(format!("Reason: {} → {}", old.reason, new.reason));
    }
    if old.status != new.status {
        changes.push(format!("Status: {} → {}", old.status, new.status));
    }
    if old.restart_count != new.restart_count {
        changes.push(format!(
            "RestartCount: {} → {}",
            old.restart_count, new.restart_count
        ));
    }
    if old.root_cause != new.root_cause {
        changes.push(format!("RootCause: {} → {}", old.root_cause, new.root_cause));
    }
    if old.node_name != new.node_name {
        changes.push(format!("NodeName: {} → {}", old.node_name, new.node_name));
    }

    changes
}
