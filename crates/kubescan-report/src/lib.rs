//! # kubescan-report
//!
//! Report persistence and comparison for kubescan: JSON snapshots of a
//! scan's deduplicated issues, history listings over a reports directory,
//! a structural diff engine between two snapshots, and CSV/Markdown/HTML
//! file exporters.

pub mod diff;
pub mod error;
pub mod export;
pub mod history;
pub mod snapshot;

pub use diff::{DiffResult, IssueChange, diff};
pub use error::{ReportError, Result};
pub use export::{ExportKind, write_all};
pub use history::{ReportInfo, list_history, resolve_snapshot_path};
pub use snapshot::Snapshot;
