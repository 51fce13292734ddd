//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::collections::HashMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use kubescan_cluster::CleanOutcome;
use kubescan_core::{Issue, SeveritySummary};
use kubescan_report::{DiffResult, ReportInfo};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Console view of one scan: the deduplicated issues and their summary.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Deduplicated issues, sorted by namespace and name.
    pub issues: Vec<Issue>,
    /// Per-namespace severity summary.
    pub summary: HashMap<String, SeveritySummary>,
}

impl TableDisplay for ScanReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer)?;
        writeln!(writer, "=== Issues ===")?;
        writeln!(
            writer,
            "TIME                | NAMESPACE | KIND | NAME                 | SEV  | STATUS       | REASON             | NODE       | RESTARTS"
        )?;
        writeln!(writer, "{}", "-".repeat(120))?;
        for issue in &self.issues {
            let time = issue.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
            writeln!(
                writer,
                "{:<19} | {:<9} | {:<4} | {:<20} | {:<4} | {:<12} | {:<18} | {:<10} | {:<3}",
                trunc(&time, 19),
                trunc(&issue.namespace, 9),
                trunc(&issue.kind, 4),
                trunc(&issue.name, 20),
                trunc(&issue.severity.to_string().to_uppercase(), 4),
                trunc(&issue.status, 12),
                trunc(&issue.reason, 18),
                trunc(&issue.node_name, 10),
                issue.restart_count,
            )?;
        }

        writeln!(writer)?;
        writeln!(writer, "=== Summary by Namespace ===")?;
        writeln!(writer, "NAMESPACE | CRITICAL | HIGH | MEDIUM | LOW")?;
        writeln!(writer, "{}", "-".repeat(43))?;
        let mut namespaces: Vec<&String> = self.summary.keys().collect();
        namespaces.sort();
        for namespace in namespaces {
            let counts = &self.summary[namespace];
            writeln!(
                writer,
                "{:<9} | {:<8} | {:<4} | {:<6} | {:<3}",
                trunc(namespace, 9),
                counts.critical,
                counts.high,
                counts.medium,
                counts.low,
            )?;
        }
        Ok(())
    }
}

/// Console view of the reports directory listing.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryList {
    /// Snapshot metadata, newest first.
    pub reports: Vec<ReportInfo>,
}

impl TableDisplay for HistoryList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.reports.is_empty() {
            writeln!(writer, "No historical reports found.")?;
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(writer, "=== Historical Reports ===")?;
        writeln!(
            writer,
            "{:<40} | {:<20} | {:<8} | SUMMARY",
            "FILE", "GENERATED AT", "ISSUES"
        )?;
        writeln!(writer, "{}", "-".repeat(100))?;
        for report in &self.reports {
            let totals = report.totals();
            writeln!(
                writer,
                "{:<40} | {:<20} | {:<8} | C:{} H:{} M:{} L:{}",
                trunc(&report.file_name, 40),
                report.generated_at.format("%Y-%m-%d %H:%M:%S"),
                report.issue_count,
                totals.critical,
                totals.high,
                totals.medium,
                totals.low,
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

/// Console view of a snapshot comparison.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    /// Generation time of the older snapshot.
    pub old_generated_at: DateTime<Utc>,
    /// Issue count of the older snapshot.
    pub old_issue_count: usize,
    /// Generation time of the newer snapshot.
    pub new_generated_at: DateTime<Utc>,
    /// Issue count of the newer snapshot.
    pub new_issue_count: usize,
    /// The comparison itself.
    pub result: DiffResult,
}

impl TableDisplay for DiffReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer)?;
        writeln!(writer, "=== Report Comparison ===")?;
        writeln!(
            writer,
            "Old Report: {} ({} issues)",
            self.old_generated_at.format("%Y-%m-%d %H:%M:%S"),
            self.old_issue_count,
        )?;
        writeln!(
            writer,
            "New Report: {} ({} issues)",
            self.new_generated_at.format("%Y-%m-%d %H:%M:%S"),
            self.new_issue_count,
        )?;
        writeln!(writer)?;

        writeln!(writer, "=== Summary ===")?;
        writeln!(writer, "New Issues:      {}", self.result.new_issues.len())?;
        writeln!(
            writer,
            "Resolved Issues: {}",
            self.result.resolved_issues.len()
        )?;
        writeln!(
            writer,
            "Changed Issues:  {}",
            self.result.changed_issues.len()
        )?;
        writeln!(writer)?;

        if !self.result.new_issues.is_empty() {
            writeln!(writer, "=== New Issues ===")?;
            for issue in &self.result.new_issues {
                writeln!(
                    writer,
                    "  [{}] {}/{}/{} - {}: {}",
                    issue.severity.to_string().to_uppercase(),
                    issue.namespace,
                    issue.kind,
                    issue.name,
                    issue.reason,
                    issue.root_cause,
                )?;
            }
            writeln!(writer)?;
        }

        if !self.result.resolved_issues.is_empty() {
            writeln!(writer, "=== Resolved Issues ===")?;
            for issue in &self.result.resolved_issues {
                writeln!(
                    writer,
                    "  [{}] {}/{}/{} - {}",
                    issue.severity.to_string().to_uppercase(),
                    issue.namespace,
                    issue.kind,
                    issue.name,
                    issue.reason,
                )?;
            }
            writeln!(writer)?;
        }

        if !self.result.changed_issues.is_empty() {
            writeln!(writer, "=== Changed Issues ===")?;
            for change in &self.result.changed_issues {
                writeln!(
                    writer,
                    "  {}/{}/{}:",
                    change.new.namespace, change.new.kind, change.new.name,
                )?;
                for line in &change.changes {
                    writeln!(writer, "    - {line}")?;
                }
            }
            writeln!(writer)?;
        }

        if self.result.is_empty() {
            writeln!(writer, "No differences found between reports.")?;
        }
        Ok(())
    }
}

/// Console view of a cleanup run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// The cleanup outcome.
    pub outcome: CleanOutcome,
}

impl TableDisplay for CleanReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.outcome.deleted.is_empty() {
            writeln!(writer, "No evicted or completed pods found.")?;
        } else {
            let verb = if self.outcome.dry_run {
                "Would delete"
            } else {
                "Deleted"
            };
            writeln!(writer, "{} {} pod(s):", verb, self.outcome.deleted.len())?;
            for pod in &self.outcome.deleted {
                writeln!(
                    writer,
                    "  [{}] {}/{} - {}",
                    pod.severity.to_string().to_uppercase(),
                    pod.namespace,
                    pod.name,
                    pod.reason,
                )?;
            }
        }

        for error in &self.outcome.errors {
            writeln!(writer, "  warning: {error}")?;
        }
        Ok(())
    }
}

/// Truncates to at most `max` characters, marking cut-off with an ellipsis.
fn trunc(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubescan_core::Severity;

    fn sample_issue() -> Issue {
        Issue {
            kind: "Pod".to_string(),
            namespace: "ns1".to_string(),
            name: "crasher".to_string(),
            severity: Severity::High,
            reason: "CrashLoopBackOff".to_string(),
            root_cause: "Application crashes right after start.".to_string(),
            status: "CrashLoopBackOff".to_string(),
            node_name: "node-1".to_string(),
            timestamp: Utc::now(),
            restart_count: 5,
            last_event: String::new(),
        }
    }

    #[test]
    fn trunc_keeps_short_strings() {
        assert_eq!(trunc("short", 9), "short");
    }

    #[test]
    fn trunc_marks_cut_strings() {
        let cut = trunc("a-very-long-namespace", 9);
        assert_eq!(cut.chars().count(), 9);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn scan_report_table_contains_issue_row() {
        let mut summary = HashMap::new();
        summary.insert(
            "ns1".to_string(),
            SeveritySummary {
                critical: 0,
                high: 1,
                medium: 0,
                low: 0,
            },
        );
        let report = ScanReport {
            issues: vec![sample_issue()],
            summary,
        };

        let mut buf = Vec::new();
        report.write_table(&mut buf).expect("table renders");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("crasher"));
        assert!(text.contains("HIGH"));
        assert!(text.contains("=== Summary by Namespace ==="));
    }

    #[test]
    fn json_output_is_valid() {
        let report = ScanReport {
            issues: vec![sample_issue()],
            summary: HashMap::new(),
        };
        let format = OutputFormat::new(Format::Json);
        let mut buf = Vec::new();
        format.write(&mut buf, &report).expect("json renders");

        let parsed: serde_json::Value =
            serde_json::from_slice(&buf).expect("output parses as json");
        assert_eq!(parsed["issues"][0]["name"], "crasher");
        assert_eq!(parsed["issues"][0]["severity"], "high");
    }

    #[test]
    fn empty_history_prints_placeholder() {
        let list = HistoryList { reports: vec![] };
        let mut buf = Vec::new();
        list.write_table(&mut buf).expect("table renders");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("No historical reports found."));
    }

    #[test]
    fn empty_diff_prints_placeholder() {
        let report = DiffReport {
            old_generated_at: Utc::now(),
            old_issue_count: 0,
            new_generated_at: Utc::now(),
            new_issue_count: 0,
            result: DiffResult::default(),
        };
        let mut buf = Vec::new();
        report.write_table(&mut buf).expect("table renders");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("No differences found between reports."));
    }
}
