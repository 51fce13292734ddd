//! Scan orchestrator and deduplicator.
//!
//! The orchestrator fans out over workload instances with a bounded pool of
//! concurrent workers. Each worker is infallible and fully local: it derives
//! the workload status, looks up the correlated event, and emits zero or
//! more raw issues. Worker results are joined after completion rather than
//! merged through a shared accumulator, so no lock is held anywhere in the
//! scan path. The deduplicator then collapses raw issues to one per
//! workload.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};
use tracing::debug;

use crate::classify::{Classifier, HIGH_RESTART_REASON};
use crate::events::EventIndex;
use crate::status::workload_status;
use crate::types::{ContainerState, Issue, Severity, Workload};

/// Workload kind covered by this scanner.
pub const WORKLOAD_KIND: &str = "Pod";

/// Default upper bound on simultaneously in-flight scan workers.
pub const DEFAULT_MAX_CONCURRENCY: usize = 50;

/// Configuration for one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Restart count above which a `HighRestartCount` issue is emitted.
    pub restart_threshold: i32,
    /// Upper bound on in-flight workers, independent of input size.
    pub max_concurrency: usize,
}

impl ScanConfig {
    /// Creates a config with the given restart threshold and the default
    /// worker bound.
    #[must_use]
    pub const fn new(restart_threshold: i32) -> Self {
        Self {
            restart_threshold,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Overrides the worker bound.
    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Scans all workloads and returns the raw, non-deduplicated issue list.
///
/// Workers are independent; the output order is unspecified and downstream
/// consumers (deduplication, summarization) do not depend on it.
pub async fn scan(
    workloads: Vec<Workload>,
    config: &ScanConfig,
    events: &EventIndex,
    classifier: &Classifier,
) -> Vec<Issue> {
    let detected_at = Utc::now();
    let worker_bound = config.max_concurrency.max(1);

    let per_workload: Vec<Vec<Issue>> = stream::iter(workloads)
        .map(|workload| async move {
            process_workload(&workload, config, events, classifier, detected_at)
        })
        .buffer_unordered(worker_bound)
        .collect()
        .await;

    let issues: Vec<Issue> = per_workload.into_iter().flatten().collect();
    debug!(raw_issues = issues.len(), "scan complete");
    issues
}

/// Scans all workloads and collapses the result to one issue per workload.
pub async fn scan_and_deduplicate(
    workloads: Vec<Workload>,
    config: &ScanConfig,
    events: &EventIndex,
    classifier: &Classifier,
) -> Vec<Issue> {
    let raw = scan(workloads, config, events, classifier).await;
    deduplicate(raw, classifier)
}

/// Emits the raw issues for a single workload instance.
///
/// All issues of one workload carry the same detection timestamp and the
/// same correlated event message.
fn process_workload(
    workload: &Workload,
    config: &ScanConfig,
    events: &EventIndex,
    classifier: &Classifier,
    detected_at: DateTime<Utc>,
) -> Vec<Issue> {
    let status = workload_status(workload);
    let last_event = events.lookup(&workload.namespace, &workload.name).to_string();

    let mut issues = Vec::new();
    let mut emit = |reason: &str, restart_count: i32| {
        issues.push(make_issue(
            workload,
            classifier,
            reason,
            &status,
            &last_event,
            detected_at,
            restart_count,
        ));
    };

    // Workload-level eviction.
    if workload.phase == "Failed" && workload.reason == "Evicted" {
        emit("Evicted", workload.max_restart_count());
    }

    for container in &workload.containers {
        match &container.state {
            ContainerState::Waiting { reason } => emit(reason, container.restart_count),
            ContainerState::Terminated { reason } if !reason.is_empty() => {
                emit(reason, container.restart_count);
            }
            _ => {}
        }

        // Independent of the container state above.
        let restart_severity =
            Classifier::restart_severity(container.restart_count, config.restart_threshold);
        if restart_severity == Severity::High {
            emit(HIGH_RESTART_REASON, container.restart_count);
        }
    }

    issues
}

fn make_issue(
    workload: &Workload,
    classifier: &Classifier,
    reason: &str,
    status: &str,
    last_event: &str,
    detected_at: DateTime<Utc>,
    restart_count: i32,
) -> Issue {
    let (severity, root_cause) = classifier.classify(reason);
    Issue {
        kind: WORKLOAD_KIND.to_string(),
        namespace: workload.namespace.clone(),
        name: workload.name.clone(),
        severity,
        reason: reason.to_string(),
        root_cause,
        status: status.to_string(),
        node_name: workload.node_name.clone(),
        timestamp: detected_at,
        restart_count,
        last_event: last_event.to_string(),
    }
}

/// Collapses raw issues to at most one per `(namespace, name)` key.
///
/// The surviving issue has the highest severity priority; at equal severity
/// the higher reason-specificity rank wins, so a concrete container failure
/// is surfaced over the generic restart signal. Output is sorted by
/// namespace and name for deterministic downstream behavior.
#[must_use]
pub fn deduplicate(issues: Vec<Issue>, classifier: &Classifier) -> Vec<Issue> {
    let mut best: HashMap<(String, String), Issue> = HashMap::new();

    for issue in issues {
        let key = (issue.namespace.clone(), issue.name.clone());
        match best.get(&key) {
            Some(current) if !replaces(current, &issue, classifier) => {}
            _ => {
                best.insert(key, issue);
            }
        }
    }

    let mut deduplicated: Vec<Issue> = best.into_values().collect();
    deduplicated.sort_by(|a, b| {
        (a.namespace.as_str(), a.name.as_str()).cmp(&(b.namespace.as_str(), b.name.as_str()))
    });
    deduplicated
}

/// True when `candidate` should replace `current` for the same workload.
fn replaces(current: &Issue, candidate: &Issue, classifier: &Classifier) -> bool {
    let current_priority = current.severity.priority();
    let candidate_priority = candidate.severity.priority();

    if candidate_priority != current_priority {
        return candidate_priority > current_priority;
    }
    classifier.reason_rank(&candidate.reason) > classifier.reason_rank(&current.reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::HIGH_RESTART_ROOT_CAUSE;
    use crate::types::ContainerStatus;
    use proptest::prelude::*;

    fn container(name: &str, restart_count: i32, state: ContainerState) -> ContainerStatus {
        ContainerStatus {
            name: name.to_string(),
            restart_count,
            state,
        }
    }

    fn workload(ns: &str, name: &str, phase: &str, containers: Vec<ContainerStatus>) -> Workload {
        Workload {
            namespace: ns.to_string(),
            name: name.to_string(),
            phase: phase.to_string(),
            reason: String::new(),
            node_name: "node-1".to_string(),
            containers,
        }
    }

    async fn scan_one(workload: Workload, threshold: i32) -> Vec<Issue> {
        scan(
            vec![workload],
            &ScanConfig::new(threshold),
            &EventIndex::empty(),
            &Classifier::default(),
        )
        .await
    }

    mod orchestrator {
        use super::*;

        #[tokio::test]
        async fn healthy_workload_emits_nothing() {
            let w = workload(
                "ns1",
                "ok",
                "Running",
                vec![container("app", 0, ContainerState::Other)],
            );
            assert!(scan_one(w, 10).await.is_empty());
        }

        #[tokio::test]
        async fn evicted_workload_carries_max_restart_count() {
            let mut w = workload(
                "ns1",
                "evicted",
                "Failed",
                vec![
                    container("a", 2, ContainerState::Other),
                    container("b", 5, ContainerState::Other),
                ],
            );
            w.reason = "Evicted".to_string();

            let issues = scan_one(w, 10).await;
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].reason, "Evicted");
            assert_eq!(issues[0].severity, Severity::Medium);
            assert_eq!(issues[0].restart_count, 5);
        }

        #[tokio::test]
        async fn failed_without_evicted_reason_is_not_an_eviction() {
            let w = workload("ns1", "failed", "Failed", vec![]);
            assert!(scan_one(w, 10).await.is_empty());
        }

        #[tokio::test]
        async fn waiting_container_emits_issue() {
            let w = workload(
                "ns1",
                "crasher",
                "Running",
                vec![container(
                    "app",
                    3,
                    ContainerState::Waiting {
                        reason: "CrashLoopBackOff".to_string(),
                    },
                )],
            );
            let issues = scan_one(w, 10).await;
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].reason, "CrashLoopBackOff");
            assert_eq!(issues[0].severity, Severity::High);
            assert_eq!(issues[0].restart_count, 3);
            assert_eq!(issues[0].kind, WORKLOAD_KIND);
        }

        #[tokio::test]
        async fn terminated_with_empty_reason_is_skipped() {
            let w = workload(
                "ns1",
                "quiet",
                "Running",
                vec![container(
                    "app",
                    0,
                    ContainerState::Terminated {
                        reason: String::new(),
                    },
                )],
            );
            assert!(scan_one(w, 10).await.is_empty());
        }

        #[tokio::test]
        async fn high_restart_count_is_an_independent_issue() {
            let w = workload(
                "ns1",
                "restarter",
                "Running",
                vec![container(
                    "app",
                    11,
                    ContainerState::Waiting {
                        reason: "CrashLoopBackOff".to_string(),
                    },
                )],
            );
            let issues = scan_one(w, 10).await;
            assert_eq!(issues.len(), 2);

            let high_restart = issues
                .iter()
                .find(|i| i.reason == HIGH_RESTART_REASON)
                .expect("high restart issue present");
            assert_eq!(high_restart.severity, Severity::High);
            assert_eq!(high_restart.root_cause, HIGH_RESTART_ROOT_CAUSE);
        }

        #[tokio::test]
        async fn restart_count_at_threshold_emits_nothing() {
            let w = workload(
                "ns1",
                "borderline",
                "Running",
                vec![container("app", 10, ContainerState::Other)],
            );
            assert!(scan_one(w, 10).await.is_empty());
        }

        #[tokio::test]
        async fn issues_of_one_workload_share_timestamp_and_event() {
            let events = {
                struct OneEvent;
                impl crate::source::EventSource for OneEvent {
                    async fn list_events(
                        &self,
                        namespace: &str,
                    ) -> crate::error::Result<Vec<crate::types::ClusterEvent>> {
                        Ok(vec![crate::types::ClusterEvent {
                            namespace: namespace.to_string(),
                            object_kind: "Pod".to_string(),
                            object_name: "restarter".to_string(),
                            message: "Back-off restarting failed container".to_string(),
                            last_timestamp: Utc::now(),
                        }])
                    }
                }
                EventIndex::build(&OneEvent, &["ns1".to_string()], "Pod").await
            };

            let w = workload(
                "ns1",
                "restarter",
                "Running",
                vec![container(
                    "app",
                    20,
                    ContainerState::Waiting {
                        reason: "CrashLoopBackOff".to_string(),
                    },
                )],
            );
            let issues = scan(
                vec![w],
                &ScanConfig::new(10),
                &events,
                &Classifier::default(),
            )
            .await;

            assert_eq!(issues.len(), 2);
            assert_eq!(issues[0].timestamp, issues[1].timestamp);
            assert_eq!(issues[0].last_event, issues[1].last_event);
            assert_eq!(issues[0].last_event, "Back-off restarting failed container");
        }

        #[tokio::test]
        async fn worker_bound_smaller_than_input_still_scans_everything() {
            let workloads: Vec<Workload> = (0..20)
                .map(|i| {
                    workload(
                        "ns1",
                        &format!("pod-{i}"),
                        "",
                        vec![container(
                            "app",
                            0,
                            ContainerState::Waiting {
                                reason: "ImagePullBackOff".to_string(),
                            },
                        )],
                    )
                })
                .collect();

            let config = ScanConfig::new(10).with_max_concurrency(3);
            let issues = scan(
                workloads,
                &config,
                &EventIndex::empty(),
                &Classifier::default(),
            )
            .await;
            assert_eq!(issues.len(), 20);
        }
    }

    mod dedup {
        use super::*;

        fn issue(ns: &str, name: &str, severity: Severity, reason: &str) -> Issue {
            Issue {
                kind: WORKLOAD_KIND.to_string(),
                namespace: ns.to_string(),
                name: name.to_string(),
                severity,
                reason: reason.to_string(),
                root_cause: String::new(),
                status: String::new(),
                node_name: String::new(),
                timestamp: Utc::now(),
                restart_count: 0,
                last_event: String::new(),
            }
        }

        #[test]
        fn higher_severity_wins() {
            let classifier = Classifier::default();
            let issues = vec![
                issue("ns1", "pod", Severity::Medium, "Evicted"),
                issue("ns1", "pod", Severity::Critical, "ImagePullBackOff"),
            ];
            let kept = deduplicate(issues, &classifier);
            assert_eq!(kept.len(), 1);
            assert_eq!(kept[0].reason, "ImagePullBackOff");
        }

        #[test]
        fn severity_tie_falls_back_to_reason_rank() {
            let classifier = Classifier::default();
            // Both high severity; CrashLoopBackOff (rank 9) must beat the
            // generic HighRestartCount (rank 1) regardless of input order.
            let issues = vec![
                issue("ns1", "pod", Severity::High, HIGH_RESTART_REASON),
                issue("ns1", "pod", Severity::High, "CrashLoopBackOff"),
            ];
            let kept = deduplicate(issues, &classifier);
            assert_eq!(kept.len(), 1);
            assert_eq!(kept[0].reason, "CrashLoopBackOff");

            let reversed = vec![
                issue("ns1", "pod", Severity::High, "CrashLoopBackOff"),
                issue("ns1", "pod", Severity::High, HIGH_RESTART_REASON),
            ];
            let kept = deduplicate(reversed, &classifier);
            assert_eq!(kept[0].reason, "CrashLoopBackOff");
        }

        #[test]
        fn distinct_workloads_are_kept_apart() {
            let classifier = Classifier::default();
            let issues = vec![
                issue("ns1", "pod-a", Severity::Low, "Weird"),
                issue("ns2", "pod-a", Severity::Low, "Weird"),
                issue("ns1", "pod-b", Severity::Low, "Weird"),
            ];
            let kept = deduplicate(issues, &classifier);
            assert_eq!(kept.len(), 3);
        }

        #[test]
        fn output_is_sorted_by_namespace_and_name() {
            let classifier = Classifier::default();
            let issues = vec![
                issue("zeta", "b", Severity::Low, "X"),
                issue("alpha", "z", Severity::Low, "X"),
                issue("alpha", "a", Severity::Low, "X"),
            ];
            let kept = deduplicate(issues, &classifier);
            let keys: Vec<String> = kept.iter().map(Issue::workload_key).collect();
            assert_eq!(keys, vec!["alpha/a", "alpha/z", "zeta/b"]);
        }

        fn arb_issue() -> impl Strategy<Value = Issue> {
            let severities = prop_oneof![
                Just(Severity::Critical),
                Just(Severity::High),
                Just(Severity::Medium),
                Just(Severity::Low),
            ];
            let reasons = prop_oneof![
                Just("ImagePullBackOff"),
                Just("CrashLoopBackOff"),
                Just("OOMKilled"),
                Just("Evicted"),
                Just("Pending"),
                Just("SomethingElse"),
                Just(HIGH_RESTART_REASON),
            ];
            ("ns[0-2]", "pod-[0-3]", severities, reasons).prop_map(
                |(ns, name, severity, reason)| issue(&ns, &name, severity, reason),
            )
        }

        proptest! {
            #[test]
            fn deduplicate_is_idempotent(issues in proptest::collection::vec(arb_issue(), 0..40)) {
                let classifier = Classifier::default();
                let once = deduplicate(issues, &classifier);
                let twice = deduplicate(once.clone(), &classifier);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn at_most_one_issue_per_workload(issues in proptest::collection::vec(arb_issue(), 0..40)) {
                let classifier = Classifier::default();
                let kept = deduplicate(issues, &classifier);
                let mut keys: Vec<String> = kept.iter().map(Issue::workload_key).collect();
                keys.sort();
                keys.dedup();
                prop_assert_eq!(keys.len(), kept.len());
            }
        }
    }
}
