//! Cleanup of evicted pods and completed jobs.

use k8s_openapi::api::core::v1::Pod;
use kube::Client;
use kube::api::{Api, DeleteParams};
use kubescan_core::Severity;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::source::list_pods;

/// A pod selected for cleanup.
#[derive(Debug, Clone, Serialize)]
pub struct CleanedPod {
    /// Namespace of the pod.
    pub namespace: String,
    /// Pod name.
    pub name: String,
    /// Why the pod was selected (`Evicted`-style reason or `Completed`).
    pub reason: String,
    /// Severity of the condition that made it a cleanup candidate.
    pub severity: Severity,
}

/// Result of a cleanup run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanOutcome {
    /// Pods deleted, or that would be deleted under dry-run.
    pub deleted: Vec<CleanedPod>,
    /// True when no deletion was actually performed.
    pub dry_run: bool,
    /// Per-pod deletion failures; a failure never aborts the run.
    pub errors: Vec<String>,
}

/// Identifies and optionally deletes evicted pods and completed jobs.
///
/// Candidates are pods in phase `Failed` whose status reason contains
/// "evicted" (case-insensitive) and pods in phase `Succeeded`. With
/// `dry_run` the candidates are only reported.
pub async fn clean_workloads(
    client: &Client,
    namespaces: &[String],
    ignored: &std::collections::HashSet<String>,
    dry_run: bool,
) -> Result<CleanOutcome> {
    let pods = list_pods(client, namespaces).await?;
    let candidates: Vec<CleanedPod> = identify_cleanup_candidates(&pods)
        .into_iter()
        .filter(|pod| !ignored.contains(&pod.namespace))
        .collect();

    let mut outcome = CleanOutcome {
        deleted: Vec::with_capacity(candidates.len()),
        dry_run,
        errors: Vec::new(),
    };

    for candidate in candidates {
        if dry_run {
            outcome.deleted.push(candidate);
            continue;
        }

        let api: Api<Pod> = Api::namespaced(client.clone(), &candidate.namespace);
        match api.delete(&candidate.name, &DeleteParams::default()).await {
            Ok(_) => {
                info!(
                    namespace = %candidate.namespace,
                    name = %candidate.name,
                    reason = %candidate.reason,
                    "pod deleted"
                );
                outcome.deleted.push(candidate);
            }
            Err(err) => {
                outcome.errors.push(format!(
                    "failed to delete pod {}/{}: {err}",
                    candidate.namespace, candidate.name
                ));
            }
        }
    }

    Ok(outcome)
}

/// Pure selection step: evicted pods and completed jobs.
fn identify_cleanup_candidates(pods: &[Pod]) -> Vec<CleanedPod> {
    let mut candidates = Vec::new();

    for pod in pods {
        let namespace = pod.metadata.namespace.clone().unwrap_or_default();
        let name = pod.metadata.name.clone().unwrap_or_default();
        let status = pod.status.clone().unwrap_or_default();
        let phase = status.phase.unwrap_or_default();
        let reason = status.reason.unwrap_or_default();

        if phase == "Failed" && reason.to_lowercase().contains("evicted") {
            candidates.push(CleanedPod {
                namespace,
                name,
                reason,
                severity: Severity::Medium,
            });
        } else if phase == "Succeeded" {
            candidates.push(CleanedPod {
                namespace,
                name,
                reason: "Completed".to_string(),
                severity: Severity::Low,
            });
        }
    }

    candidates
}
