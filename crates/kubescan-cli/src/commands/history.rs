//! History command implementation.

use std::io::Write;
use std::path::PathBuf;

use kubescan_report::list_history;

use crate::error::Result;
use crate::output::{HistoryList, OutputFormat};

/// History command executor.
pub struct HistoryCommand {
    outdir: PathBuf,
}

impl HistoryCommand {
    /// Create a new history command reading from `outdir`.
    #[must_use]
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    /// Execute the history command.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<()> {
        let reports = list_history(&self.outdir)?;
        format.write(writer, &HistoryList { reports })?;
        Ok(())
    }
}
