//! Clean command implementation.

use std::collections::HashSet;
use std::io::Write;

use kubescan_cluster::{clean_workloads, connect};

use crate::cli::CleanArgs;
use crate::error::Result;
use crate::output::{CleanReport, OutputFormat};

/// Clean command executor.
pub struct CleanCommand;

impl CleanCommand {
    /// Create a new clean command.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Execute the clean command.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &CleanArgs,
    ) -> Result<()> {
        let client = connect(args.kubeconfig.as_deref()).await?;

        let namespaces: Vec<String> = args
            .namespace
            .iter()
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty())
            .collect();
        let ignored: HashSet<String> = args
            .ignore_ns
            .iter()
            .map(|ns| ns.trim().to_string())
            .filter(|ns| !ns.is_empty())
            .collect();

        let outcome = clean_workloads(&client, &namespaces, &ignored, args.dry_run).await?;
        format.write(writer, &CleanReport { outcome })?;
        Ok(())
    }
}

impl Default for CleanCommand {
    fn default() -> Self {
        Self::new()
    }
}
