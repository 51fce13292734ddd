//! Source traits for the external collaborators supplying cluster state.
//!
//! The pipeline consumes workloads and events through these seams; the
//! `kubescan-cluster` crate provides the Kubernetes-backed implementation,
//! and tests substitute in-memory sources.

use std::collections::HashSet;

use crate::error::Result;
use crate::types::{ClusterEvent, Workload};

/// Supplies the list of workload instances to scan.
#[allow(async_fn_in_trait)]
pub trait WorkloadSource {
    /// Lists workloads in the given namespaces.
    ///
    /// An empty `namespaces` filter means all namespaces. Workloads in
    /// `ignored` namespaces are removed after listing. A failure here is a
    /// hard failure: the scan cannot proceed without workload data.
    async fn list_workloads(
        &self,
        namespaces: &[String],
        ignored: &HashSet<String>,
    ) -> Result<Vec<Workload>>;
}

/// Supplies recent cluster events, one namespace at a time.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    /// Lists recent events in one namespace.
    ///
    /// Failures are absorbed by the event index build: the namespace simply
    /// contributes no event correlation for that scan.
    async fn list_events(&self, namespace: &str) -> Result<Vec<ClusterEvent>>;
}
