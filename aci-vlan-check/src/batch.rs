use aci_text_core::{parse_endpoint, EndpointRecord, PathAttachmentRecord};
use serde::Serialize;
use tracing::{info, warn};

use crate::validate::{validate_endpoint, ValidationResult, VerdictStatus};

/// Message recorded for entries whose endpoint text yields no record.
pub const UNPARSED_MESSAGE: &str = "could not parse endpoint output";

/// One pasted endpoint dump to validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInput {
    /// Where the text came from, for display.
    pub label: String,
    /// EPG label supplied by the operator, if any.
    pub epg: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    pub label: String,
    /// Resolved EPG label; `None` only for unparsed entries.
    pub epg: Option<String>,
    pub endpoint: Option<EndpointRecord>,
    pub results: Vec<ValidationResult>,
    pub error: Option<String>,
}

impl EntryOutcome {
    pub fn denied(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.is_denied())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub attachments: usize,
    pub allowed: usize,
    pub not_allowed: usize,
    pub unparsed: usize,
    pub entries: Vec<EntryOutcome>,
}

/// Validate every entry against one attachment listing.
///
/// Entries that fail to parse are kept in the report with
/// [`UNPARSED_MESSAGE`] and contribute no results.
pub fn validate_batch(inputs: &[EntryInput], attachments: &[PathAttachmentRecord]) -> BatchReport {
    let entries: Vec<EntryOutcome> = inputs
        .iter()
        .map(|input| validate_entry(input, attachments))
        .collect();

    let count = |status: VerdictStatus| {
        entries
            .iter()
            .flat_map(|e| e.results.iter())
            .filter(|r| r.status == status)
            .count()
    };
    let report = BatchReport {
        attachments: attachments.len(),
        allowed: count(VerdictStatus::Allowed),
        not_allowed: count(VerdictStatus::NotAllowed),
        unparsed: entries.iter().filter(|e| e.error.is_some()).count(),
        entries,
    };
    info!(
        entries = report.entries.len(),
        allowed = report.allowed,
        not_allowed = report.not_allowed,
        unparsed = report.unparsed,
        "validation complete"
    );
    report
}

fn validate_entry(input: &EntryInput, attachments: &[PathAttachmentRecord]) -> EntryOutcome {
    let Some(endpoint) = parse_endpoint(&input.text) else {
        warn!(entry = %input.label, "{UNPARSED_MESSAGE}");
        return EntryOutcome {
            label: input.label.clone(),
            epg: None,
            endpoint: None,
            results: Vec::new(),
            error: Some(UNPARSED_MESSAGE.to_string()),
        };
    };

    let results = validate_endpoint(&endpoint, attachments);
    let epg = resolve_epg_label(input.epg.as_deref(), &endpoint, attachments);
    EntryOutcome {
        label: input.label.clone(),
        epg: Some(epg),
        endpoint: Some(endpoint),
        results,
        error: None,
    }
}

/// EPG label for an entry: operator input, then the dump's `AEPg` line, then
/// the first attachment on the same VLAN, then `VLAN<N>`.
pub fn resolve_epg_label(
    explicit: Option<&str>,
    endpoint: &EndpointRecord,
    attachments: &[PathAttachmentRecord],
) -> String {
    explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or(endpoint.epg.as_deref())
        .or_else(|| {
            attachments
                .iter()
                .find(|a| a.vlan == endpoint.vlan)
                .map(|a| a.epg.as_str())
        })
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("VLAN{}", endpoint.vlan))
}
