//! # kubescan-cli
//!
//! Command-line interface for the kubescan workload issue scanner.
//!
//! Provides commands for:
//! - Scanning cluster workloads and exporting reports
//! - Listing historical report snapshots
//! - Comparing two snapshots
//! - Cleaning up evicted and completed pods

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, CleanArgs, Commands, DiffArgs, Format, ScanArgs};
pub use error::CliError;
pub use output::OutputFormat;
