//! Event index: latest event message per workload, built once per scan.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::source::EventSource;

/// Namespace-scoped lookup from `namespace/name` to the most recent event
/// message observed for that workload.
///
/// Built once per scan and shared read-only afterward. Lookups never fail;
/// an absent key yields an empty message.
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    entries: HashMap<String, String>,
}

impl EventIndex {
    /// Creates an empty index (no event correlation).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index by fetching events for each namespace concurrently.
    ///
    /// Only events whose involved object is of `object_kind` are indexed.
    /// For each workload the message with the maximum timestamp wins; an
    /// event with a timestamp equal to the retained one does not replace it,
    /// so same-timestamp ties are merge-order dependent. A namespace whose
    /// fetch fails contributes nothing and does not abort the build.
    pub async fn build<S: EventSource>(
        source: &S,
        namespaces: &[String],
        object_kind: &str,
    ) -> Self {
        // One in-flight fetch per namespace; namespace counts are small
        // relative to workload counts, so no cap is applied here.
        let fetches = namespaces.iter().map(|namespace| async move {
            match source.list_events(namespace).await {
                Ok(events) => index_namespace(namespace, object_kind, &events),
                Err(err) => {
                    warn!(namespace = %namespace, error = %err, "skipping namespace events");
                    HashMap::new()
                }
            }
        });

        // Worker-local maps are joined only after every fetch completes;
        // keys are namespace-prefixed, so partial maps never collide.
        let mut entries = HashMap::new();
        for partial in join_all(fetches).await {
            for (key, (_, message)) in partial {
                entries.insert(key, message);
            }
        }

        debug!(indexed = entries.len(), "event index built");
        Self { entries }
    }

    /// Returns the latest indexed event message for a workload, or the
    /// empty string if none was observed.
    #[must_use]
    pub fn lookup(&self, namespace: &str, name: &str) -> &str {
        self.entries
            .get(&format!("{namespace}/{name}"))
            .map_or("", String::as_str)
    }

    /// Number of workloads with an indexed event.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no events were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Reduces one namespace's event list to the latest message per workload.
fn index_namespace(
    namespace: &str,
    object_kind: &str,
    events: &[crate::types::ClusterEvent],
) -> HashMap<String, (DateTime<Utc>, String)> {
    let mut latest: HashMap<String, (DateTime<Utc>, String)> = HashMap::new();

    for event in events {
        if event.object_kind != object_kind {
            continue;
        }
        let key = format!("{namespace}/{}", event.object_name);
        match latest.get(&key) {
            Some((retained, _)) if event.last_timestamp <= *retained => {}
            _ => {
                latest.insert(key, (event.last_timestamp, event.message.clone()));
            }
        }
    }

    latest
}
