//! File exporters: JSON, CSV, Markdown and HTML renditions of a snapshot.
//!
//! Output is well-formed but the exact escaping byte layout is not a
//! contract; consumers parse the JSON snapshot, not these files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::snapshot::Snapshot;

/// Supported export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Machine-readable snapshot; the format history and diff read back.
    Json,
    /// Spreadsheet-friendly issue rows with a UTF-8 BOM.
    Csv,
    /// Markdown summary and issue tables.
    Markdown,
    /// Self-contained HTML page with severity badges.
    Html,
}

impl ExportKind {
    /// File extension for this kind.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Parses a comma-separated list of export kinds.
    ///
    /// Unrecognized entries are skipped; `markdown` is accepted as an alias
    /// for `md`. Duplicates are collapsed, first occurrence wins.
    #[must_use]
    pub fn parse_list(spec: &str) -> Vec<Self> {
        let mut kinds = Vec::new();
        for part in spec.split(',') {
            let kind = match part.trim().to_ascii_lowercase().as_str() {
                "json" => Self::Json,
                "csv" => Self::Csv,
                "md" | "markdown" => Self::Markdown,
                "html" => Self::Html,
                _ => continue,
            };
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

/// Writes one file per requested kind into `outdir`, creating it if needed.
///
/// Files are named `<base>.<ext>`. Returns the paths written.
pub fn write_all(
    outdir: &Path,
    base: &str,
    snapshot: &Snapshot,
    kinds: &[ExportKind],
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(outdir)?;

    let mut written = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let path = outdir.join(format!("{base}.{}", kind.extension()));
        let body = match kind {
            ExportKind::Json => snapshot.to_json()?,
            ExportKind::Csv => csv_report(snapshot),
            ExportKind::Markdown => markdown_report(snapshot),
            ExportKind::Html => html_report(snapshot),
        };
        fs::write(&path, body)?;
        info!(path = %path.display(), "report written");
        written.push(path);
    }
    Ok(written)
}

const CSV_HEADER: &str = "timestamp,namespace,kind,name,severity,status,\
                          reason,root_cause,node_name,restart_count,last_event";

fn csv_report(snapshot: &Snapshot) -> String {
    // UTF-8 BOM so spreadsheet tools pick the right encoding.
    let mut out = String::from("\u{feff}");
    out.push_str(CSV_HEADER);
    out.push('\n');

    for issue in &snapshot.issues {
        let fields = [
            issue.timestamp.to_rfc3339(),
            issue.namespace.clone(),
            issue.kind.clone(),
            issue.name.clone(),
            issue.severity.to_string(),
            issue.status.clone(),
            issue.reason.clone(),
            issue.root_cause.clone(),
            issue.node_name.clone(),
            issue.restart_count.to_string(),
            issue.last_event.clone(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Minimal CSV quoting: fields containing a comma, quote or newline are
/// wrapped in quotes with inner quotes doubled.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn sorted_namespaces(snapshot: &Snapshot) -> Vec<&String> {
    let mut namespaces: Vec<&String> = snapshot.summary.keys().collect();
    namespaces.sort();
    namespaces
}

fn markdown_report(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str("# Kubernetes Issues Report\n\n");
    out.push_str(&format!(
        "_Generated: {}_\n\n",
        snapshot.generated_at.to_rfc3339()
    ));

    out.push_str("## Summary by Namespace\n\n");
    out.push_str("| Namespace | Critical | High | Medium | Low |\n|---|---:|---:|---:|---:|\n");
    for namespace in sorted_namespaces(snapshot) {
        let s = snapshot.summary[namespace];
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            escape_md(namespace),
            s.critical,
            s.high,
            s.medium,
            s.low
        ));
    }
    out.push('\n');

    out.push_str("## Issues\n\n");
    out.push_str(
        "| Time | Namespace | Kind | Name | Severity | Status | Reason | RootCause | Node |\n\
         |---|---|---|---|---|---|---|---|---|\n",
    );
    for issue in &snapshot.issues {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
            issue.timestamp.to_rfc3339(),
            escape_md(&issue.namespace),
            issue.kind,
            escape_md(&issue.name),
            issue.severity.to_string().to_uppercase(),
            escape_md(&issue.status),
            escape_md(&issue.reason),
            escape_md(&issue.root_cause),
            escape_md(&issue.node_name),
        ));
    }
    out
}

fn escape_md(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

const HTML_STYLE: &str = "\
body{font-family:system-ui,Arial,sans-serif;padding:24px}\
h1,h2{margin:0 0 12px}\
table{border-collapse:collapse;width:100%;margin:12px 0}\
th,td{border:1px solid #ddd;padding:8px;font-size:14px}\
th{background:#f5f5f5;text-align:left}\
.badge{padding:4px 10px;border-radius:4px;display:inline-block;font-weight:bold;font-size:12px}\
.badge.CRITICAL{background:#dc2626;color:#fff}\
.badge.HIGH{background:#ea580c;color:#fff}\
.badge.MEDIUM{background:#ca8a04;color:#fff}\
.badge.LOW{background:#0284c7;color:#fff}\
.small{color:#666;font-size:12px}";

fn html_report(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html><html><head><meta charset='utf-8'>");
    out.push_str("<title>Kubernetes Issues Report</title>");
    out.push_str(&format!("<style>{HTML_STYLE}</style></head><body>"));
    out.push_str("<h1>Kubernetes Issues Report</h1>");
    out.push_str(&format!(
        "<div class='small'>Generated: {}</div>",
        escape_html(&snapshot.generated_at.to_rfc3339())
    ));

    out.push_str(
        "<h2>Summary by Namespace</h2><table><thead><tr><th>Namespace</th>\
         <th>Critical</th><th>High</th><th>Medium</th><th>Low</th></tr></thead><tbody>",
    );
    for namespace in sorted_namespaces(snapshot) {
        let s = snapshot.summary[namespace];
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(namespace),
            s.critical,
            s.high,
            s.medium,
            s.low
        ));
    }
    out.push_str("</tbody></table>");

    out.push_str("<h2>Issues</h2><table><thead><tr>");
    for column in [
        "Time",
        "Namespace",
        "Kind",
        "Name",
        "Severity",
        "Status",
        "Reason",
        "RootCause",
        "Node",
        "RestartCount",
        "LastEvent",
    ] {
        out.push_str(&format!("<th>{column}</th>"));
    }
    out.push_str("</tr></thead><tbody>");
    for issue in &snapshot.issues {
        let severity = issue.severity.to_string().to_uppercase();
        out.push_str("<tr>");
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.timestamp.to_rfc3339())));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.namespace)));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.kind)));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.name)));
        out.push_str(&format!(
            "<td><span class='badge {severity}'>{severity}</span></td>"
        ));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.status)));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.reason)));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.root_cause)));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.node_name)));
        out.push_str(&format!("<td>{}</td>", issue.restart_count));
        out.push_str(&format!("<td>{}</td>", escape_html(&issue.last_event)));
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table></body></html>");
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
