use std::collections::HashMap;
use std::fmt;

use aci_text_core::{EndpointRecord, PathAttachmentRecord, PathName};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Allowed,
    NotAllowed,
}

impl VerdictStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictStatus::Allowed => "allowed",
            VerdictStatus::NotAllowed => "not_allowed",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for an endpoint path with no VLAN-matching attachment.
///
/// An empty or unparseable attachment listing therefore denies every path.
pub const UNMATCHED_POLICY: VerdictStatus = VerdictStatus::NotAllowed;

/// Verdict for one endpoint path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub path: PathName,
    /// Leaf node that reported the path, when the endpoint dump named one.
    pub node: Option<String>,
    /// Always true: only paths an endpoint was learned on are validated.
    pub has_active_endpoint: bool,
    pub is_vlan_allowed: bool,
    pub status: VerdictStatus,
}

impl ValidationResult {
    pub fn is_denied(&self) -> bool {
        self.status == VerdictStatus::NotAllowed
    }
}

/// Check every endpoint path against the attachments carrying its VLAN.
///
/// Results follow the order of `endpoint.paths`. When several attachments
/// normalize to the same path the last one is kept; only membership matters.
pub fn validate_endpoint(
    endpoint: &EndpointRecord,
    attachments: &[PathAttachmentRecord],
) -> Vec<ValidationResult> {
    let allowed: HashMap<String, &PathAttachmentRecord> = attachments
        .iter()
        .filter(|a| a.vlan == endpoint.vlan)
        .map(|a| (a.path.key(), a))
        .collect();

    endpoint
        .paths
        .iter()
        .map(|path| {
            let status = if allowed.contains_key(&path.key()) {
                VerdictStatus::Allowed
            } else {
                UNMATCHED_POLICY
            };
            ValidationResult {
                path: path.clone(),
                node: endpoint.node_for(path).map(ToOwned::to_owned),
                has_active_endpoint: true,
                is_vlan_allowed: status == VerdictStatus::Allowed,
                status,
            }
        })
        .collect()
}
