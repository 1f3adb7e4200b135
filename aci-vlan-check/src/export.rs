use aci_text_core::PathAttachmentRecord;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::batch::{BatchReport, EntryOutcome};
use crate::reconstruct::{default_pod, reconstruct_path, PodLookup};
use crate::settings::Settings;
use crate::validate::ValidationResult;

pub const CSV_HEADER: &str = "VLAN,EPG,PATH";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("no paths were denied; nothing to export")]
    NothingDenied,
}

/// One remediation row: the binding that would allow a denied path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    pub vlan: String,
    pub epg: String,
    pub path: String,
}

impl CsvRow {
    pub fn to_line(&self) -> String {
        [&self.vlan, &self.epg, &self.path]
            .iter()
            .map(|field| csv_field(field))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Ensure the label carries `prefix` (compared case-insensitively).
pub fn normalize_epg_label(label: &str, prefix: &str) -> String {
    let label = label.trim();
    let has_prefix = label
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
    if has_prefix {
        label.to_string()
    } else {
        format!("{prefix}{label}")
    }
}

/// Rows for the denied results of one endpoint, in result order.
pub fn denied_rows(
    vlan: &str,
    epg: &str,
    endpoint_pod: &str,
    results: &[ValidationResult],
    attachments: &[PathAttachmentRecord],
    settings: &Settings,
) -> Vec<CsvRow> {
    let lookup = PodLookup::new(attachments);
    let pod = default_pod(&lookup, vlan, endpoint_pod, &settings.fallback_pod);
    let epg = normalize_epg_label(epg, &settings.epg_prefix);

    results
        .iter()
        .filter(|r| r.is_denied())
        .map(|r| CsvRow {
            vlan: vlan.to_string(),
            epg: epg.clone(),
            path: reconstruct_path(&r.path, r.node.as_deref(), &lookup, &pod),
        })
        .collect()
}

/// Rows for one validated entry; unparsed entries have none.
pub fn entry_rows(
    entry: &EntryOutcome,
    attachments: &[PathAttachmentRecord],
    settings: &Settings,
) -> Vec<CsvRow> {
    let Some(endpoint) = &entry.endpoint else {
        return Vec::new();
    };
    let epg = entry
        .epg
        .clone()
        .unwrap_or_else(|| format!("VLAN{}", endpoint.vlan));
    denied_rows(
        &endpoint.vlan,
        &epg,
        &endpoint.pod,
        &entry.results,
        attachments,
        settings,
    )
}

/// CSV document for a single entry.
pub fn entry_csv(
    entry: &EntryOutcome,
    attachments: &[PathAttachmentRecord],
    settings: &Settings,
) -> Result<String, ExportError> {
    render_csv(&entry_rows(entry, attachments, settings))
}

/// CSV document covering every entry in the report.
pub fn build_csv(
    report: &BatchReport,
    attachments: &[PathAttachmentRecord],
    settings: &Settings,
) -> Result<String, ExportError> {
    let rows: Vec<CsvRow> = report
        .entries
        .iter()
        .flat_map(|entry| entry_rows(entry, attachments, settings))
        .collect();
    render_csv(&rows)
}

/// Header plus one line per row; fails when there are no rows.
pub fn render_csv(rows: &[CsvRow]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::NothingDenied);
    }
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_line());
        out.push('\n');
    }
    Ok(out)
}

/// `vlan-validation-<YYYY-MM-DD>.csv`
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("vlan-validation-{}.csv", date.format("%Y-%m-%d"))
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
