//! Kubernetes client construction and context detection.

use std::path::Path;

use kube::Client;
use kube::config::{KubeConfigOptions, Kubeconfig};
use tracing::debug;

use crate::error::Result;

/// Connects to the cluster.
///
/// With an explicit kubeconfig path that file is used; otherwise the client
/// is built from the inferred configuration (in-cluster service account or
/// the default kubeconfig chain, in the client library's discovery order).
pub async fn connect(kubeconfig: Option<&Path>) -> Result<Client> {
    match kubeconfig {
        Some(path) => {
            debug!(path = %path.display(), "using explicit kubeconfig");
            let config = Kubeconfig::read_from(path)?;
            let config =
                kube::Config::from_custom_kubeconfig(config, &KubeConfigOptions::default())
                    .await?;
            Ok(Client::try_from(config)?)
        }
        None => Ok(Client::try_default().await?),
    }
}

/// Best-effort current-context name, used to prefix report file names.
///
/// Returns `None` when no kubeconfig is readable or no context is set;
/// callers fall back to an unprefixed file name.
#[must_use]
pub fn current_context(kubeconfig: Option<&Path>) -> Option<String> {
    let config = match kubeconfig {
        Some(path) => Kubeconfig::read_from(path).ok()?,
        None => Kubeconfig::read().ok()?,
    };
    config.current_context.filter(|name| !name.is_empty())
}

/// Sanitizes a cluster name for use in a file name.
///
/// Invalid characters become hyphens; runs of hyphens are collapsed and
/// leading/trailing hyphens removed.
#[must_use]
pub fn sanitize_cluster_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut last_was_hyphen = false;
    for ch in name.chars() {
        let mapped = match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '-',
            other => other,
        };
        if mapped == '-' {
            if !last_was_hyphen {
                sanitized.push('-');
            }
            last_was_hyphen = true;
        } else {
            sanitized.push(mapped);
            last_was_hyphen = false;
        }
    }
    sanitized.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_invalid_characters() {
        assert_eq!(sanitize_cluster_name("gke_proj/europe:west1"), "gke_proj-europe-west1");
        assert_eq!(sanitize_cluster_name("my cluster"), "my-cluster");
    }

    #[test]
    fn sanitize_collapses_and_trims_hyphens() {
        assert_eq!(sanitize_cluster_name("//prod//"), "prod");
        assert_eq!(sanitize_cluster_name("a  b"), "a-b");
        assert_eq!(sanitize_cluster_name("---"), "");
    }

    #[test]
    fn sanitize_keeps_clean_names() {
        assert_eq!(sanitize_cluster_name("production"), "production");
    }
}
