//! Diff command implementation.
//!
//! Loads two snapshots, resolved from paths, file names, or timestamps
//! relative to the reports directory, and prints their differences.

use std::io::Write;
use std::path::PathBuf;

use kubescan_report::{Snapshot, diff, resolve_snapshot_path};

use crate::cli::DiffArgs;
use crate::error::Result;
use crate::output::{DiffReport, OutputFormat};

/// Diff command executor.
pub struct DiffCommand {
    outdir: PathBuf,
}

impl DiffCommand {
    /// Create a new diff command resolving snapshots against `outdir`.
    #[must_use]
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    /// Execute the diff command.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        args: &DiffArgs,
    ) -> Result<()> {
        let old_path = resolve_snapshot_path(&self.outdir, &args.old)?;
        let new_path = resolve_snapshot_path(&self.outdir, &args.new)?;

        let old = Snapshot::load(&old_path)?;
        let new = Snapshot::load(&new_path)?;

        let report = DiffReport {
            old_generated_at: old.generated_at,
            old_issue_count: old.issues.len(),
            new_generated_at: new.generated_at,
            new_issue_count: new.issues.len(),
            result: diff(&old.issues, &new.issues),
        };
        format.write(writer, &report)?;
        Ok(())
    }
}
