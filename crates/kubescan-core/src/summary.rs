//! Per-namespace severity aggregation.

use std::collections::HashMap;

use crate::types::{Issue, SeveritySummary};

/// Aggregates deduplicated issues into per-namespace severity tallies.
///
/// Namespaces with no issues are absent from the result. Recomputed fresh
/// on every scan; never persisted independently of the issue set that
/// produced it.
#[must_use]
pub fn summarize_by_namespace(issues: &[Issue]) -> HashMap<String, SeveritySummary> {
    let mut summaries: HashMap<String, SeveritySummary> = HashMap::new();

    for issue in issues {
        summaries
            .entry(issue.namespace.clone())
            .or_default()
            .record(issue.severity);
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use chrono::Utc;

    fn issue(ns: &str, severity: Severity) -> Issue {
        Issue {
            kind: "Pod".to_string(),
            namespace: ns.to_string(),
            name: "pod".to_string(),
            severity,
            reason: String::new(),
            root_cause: String::new(),
            status: String::new(),
            node_name: String::new(),
            timestamp: Utc::now(),
            restart_count: 0,
            last_event: String::new(),
        }
    }

    #[test]
    fn counts_group_by_namespace() {
        let issues = vec![
            issue("ns1", Severity::Critical),
            issue("ns1", Severity::High),
            issue("ns1", Severity::High),
            issue("ns2", Severity::Low),
        ];
        let summaries = summarize_by_namespace(&issues);

        assert_eq!(summaries.len(), 2);
        let ns1 = &summaries["ns1"];
        assert_eq!((ns1.critical, ns1.high, ns1.medium, ns1.low), (1, 2, 0, 0));
        let ns2 = &summaries["ns2"];
        assert_eq!((ns2.critical, ns2.high, ns2.medium, ns2.low), (0, 0, 0, 1));
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(summarize_by_namespace(&[]).is_empty());
    }
}
