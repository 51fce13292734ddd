//! Kubernetes-backed implementations of the core source traits.

use std::collections::HashSet;

use k8s_openapi::api::core::v1::{Event, Pod};
use kube::api::{Api, ListParams};
use kube::Client;
use kubescan_core::{
    ClusterEvent, ContainerState, ContainerStatus, EventSource, ScanError, Workload,
    WorkloadSource,
};
use tracing::warn;

use crate::error::Result;

/// Workload and event source backed by the Kubernetes API.
#[derive(Clone)]
pub struct ClusterSource {
    client: Client,
}

impl ClusterSource {
    /// Wraps a connected client.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl WorkloadSource for ClusterSource {
    async fn list_workloads(
        &self,
        namespaces: &[String],
        ignored: &HashSet<String>,
    ) -> kubescan_core::Result<Vec<Workload>> {
        let pods = list_pods(&self.client, namespaces)
            .await
            .map_err(|err| ScanError::WorkloadList {
                reason: err.to_string(),
            })?;

        Ok(pods
            .into_iter()
            .map(pod_to_workload)
            .filter(|w| !ignored.contains(&w.namespace))
            .collect())
    }
}

impl EventSource for ClusterSource {
    async fn list_events(&self, namespace: &str) -> kubescan_core::Result<Vec<ClusterEvent>> {
        let api: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let events = api
            .list(&ListParams::default())
            .await
            .map_err(|err| ScanError::EventList {
                namespace: namespace.to_string(),
                reason: err.to_string(),
            })?;

        Ok(events
            .items
            .into_iter()
            .filter_map(|event| event_to_cluster_event(namespace, event))
            .collect())
    }
}

/// Lists pods across all namespaces or each named namespace.
///
/// When listing all namespaces, a failure is fatal. When specific
/// namespaces are named, a failing namespace is logged and skipped so the
/// remaining namespaces still get scanned.
pub(crate) async fn list_pods(client: &Client, namespaces: &[String]) -> Result<Vec<Pod>> {
    let params = ListParams::default();

    if namespaces.is_empty() {
        let api: Api<Pod> = Api::all(client.clone());
        return Ok(api.list(&params).await?.items);
    }

    let mut pods = Vec::new();
    for namespace in namespaces {
        let namespace = namespace.trim();
        if namespace.is_empty() {
            continue;
        }
        let api: Api<Pod> = Api::namespaced(client.clone(), namespace);
        match api.list(&params).await {
            Ok(list) => pods.extend(list.items),
            Err(err) => {
                warn!(namespace = %namespace, error = %err, "skipping namespace pods");
            }
        }
    }
    Ok(pods)
}

/// Converts an API pod into the core's read-only workload view.
pub(crate) fn pod_to_workload(pod: Pod) -> Workload {
    let namespace = pod.metadata.namespace.unwrap_or_default();
    let name = pod.metadata.name.unwrap_or_default();
    let node_name = pod
        .spec
        .and_then(|spec| spec.node_name)
        .unwrap_or_default();

    let status = pod.status.unwrap_or_default();
    let phase = status.phase.unwrap_or_default();
    let reason = status.reason.unwrap_or_default();

    let containers = status
        .container_statuses
        .unwrap_or_default()
        .into_iter()
        .map(|cs| {
            let state = match cs.state {
                Some(state) => {
                    if let Some(waiting) = state.waiting {
                        ContainerState::Waiting {
                            reason: waiting.reason.unwrap_or_default(),
                        }
                    } else if let Some(terminated) = state.terminated {
                        ContainerState::Terminated {
                            reason: terminated.reason.unwrap_or_default(),
                        }
                    } else {
                        ContainerState::Other
                    }
                }
                None => ContainerState::Other,
            };
            ContainerStatus {
                name: cs.name,
                restart_count: cs.restart_count,
                state,
            }
        })
        .collect();

    Workload {
        namespace,
        name,
        phase,
        reason,
        node_name,
        containers,
    }
}

/// Converts an API event into the core's event view.
///
/// Events without an involved object name carry no correlation value and
/// are dropped here.
pub(crate) fn event_to_cluster_event(namespace: &str, event: Event) -> Option<ClusterEvent> {
    let object_name = event.involved_object.name?;
    let last_timestamp = event
        .last_timestamp
        .map_or(chrono::DateTime::UNIX_EPOCH, |time| time.0);

    Some(ClusterEvent {
        namespace: namespace.to_string(),
        object_kind: event.involved_object.kind.unwrap_or_default(),
        object_name,
        message: event.message.unwrap_or_default(),
        last_timestamp,
    })
}
