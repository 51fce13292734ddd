//! CLI command implementations.
//!
//! Each submodule implements one subcommand:
//! - [`scan`] - Workload issue scanning and export
//! - [`history`] - Reports directory listing
//! - [`diff`] - Snapshot comparison
//! - [`clean`] - Evicted/completed pod cleanup

pub mod clean;
pub mod diff;
pub mod history;
pub mod scan;

pub use clean::CleanCommand;
pub use diff::DiffCommand;
pub use history::HistoryCommand;
pub use scan::ScanCommand;
