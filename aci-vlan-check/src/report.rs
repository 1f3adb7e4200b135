use aci_text_core::{EndpointRecord, PathAttachmentRecord};
use colored::Colorize;

use crate::batch::{BatchReport, EntryOutcome};
use crate::validate::{ValidationResult, VerdictStatus};

/// Render batch verdicts for terminal output.
pub fn render_batch_text(report: &BatchReport, verbose: bool) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "validate entries={} attachments={}",
        report.entries.len(),
        report.attachments
    ));
    out.push(
        format!(
            "result allowed={} not_allowed={} unparsed={}",
            report.allowed, report.not_allowed, report.unparsed
        )
        .cyan()
        .to_string(),
    );
    for entry in &report.entries {
        out.push(String::new());
        render_entry(&mut out, entry, verbose);
    }
    out.join("\n")
}

fn render_entry(out: &mut Vec<String>, entry: &EntryOutcome, verbose: bool) {
    let Some(endpoint) = &entry.endpoint else {
        out.push(format!("entry {}", entry.label));
        let message = entry.error.as_deref().unwrap_or("no endpoint");
        out.push(format!("- {}", message.magenta()));
        return;
    };
    out.push(format!(
        "entry {} vlan={} epg={}",
        entry.label,
        endpoint.vlan,
        entry.epg.as_deref().unwrap_or("none")
    ));
    for result in &entry.results {
        out.push(render_result(result, endpoint, verbose));
    }
}

fn render_result(result: &ValidationResult, endpoint: &EndpointRecord, verbose: bool) -> String {
    let tag = match result.status {
        VerdictStatus::Allowed => format!("[{}]", result.status).green().to_string(),
        VerdictStatus::NotAllowed => format!("[{}]", result.status).red().to_string(),
    };
    let mut line = format!("- {tag} {}", result.path);
    if verbose {
        if let Some(node) = &result.node {
            line.push_str(&format!(" node={node}"));
        }
        if let Some(ip) = endpoint.ip_for(&result.path) {
            line.push_str(&format!(" ip={ip}"));
        }
    }
    line
}

/// Render one parsed endpoint record.
pub fn render_endpoint_text(record: &EndpointRecord) -> String {
    let mut out = Vec::new();
    out.push(format!(
        "endpoint vlan={} ip={} pod={} epg={}",
        record.vlan,
        record.ip.as_deref().unwrap_or("none"),
        if record.pod.is_empty() {
            "none"
        } else {
            record.pod.as_str()
        },
        record.epg.as_deref().unwrap_or("none")
    ));
    out.push("paths".to_string());
    for path in &record.paths {
        match record.node_for(path) {
            Some(node) => out.push(format!("- {path} node={node}")),
            None => out.push(format!("- {path}")),
        }
    }
    out.join("\n")
}

/// Render parsed attachments, one per line.
pub fn render_attachments_text(records: &[PathAttachmentRecord]) -> String {
    let mut out = vec![format!("attachments count={}", records.len())];
    if records.is_empty() {
        out.push("- none".to_string());
        return out.join("\n");
    }
    for record in records {
        out.push(format!(
            "- vlan={} epg={} path={} full_path={}",
            record.vlan, record.epg, record.path, record.full_path
        ));
    }
    out.join("\n")
}
