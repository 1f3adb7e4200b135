use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Normalize an interface or VPC identifier for comparison.
///
/// Trims whitespace, strips `[`/`]` and lowercases, so ` [eth1/5] ` and
/// `ETH1/5` compare equal.
pub fn normalize_path(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '[' && *c != ']')
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Bare interface (`eth1/5`) or VPC policy-group (`425-426-VPC-31-32-PG`) name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PathName(String);

impl PathName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comparison key; see [`normalize_path`].
    pub fn key(&self) -> String {
        normalize_path(&self.0)
    }

    pub fn same_as(&self, other: &PathName) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for PathName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PathName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Where one endpoint was learned, extracted from a single endpoint dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointRecord {
    /// Encap VLAN digits from the first `vlan-<N>` token.
    pub vlan: String,
    /// First dotted-quad seen anywhere in the dump.
    pub ip: Option<String>,
    /// Interface paths in first-seen order, no duplicates.
    pub paths: Vec<PathName>,
    /// `pod-<N>` when the dump mentions one, otherwise empty.
    pub pod: String,
    /// EPG named on an `AEPg : <name>` line, if any.
    pub epg: Option<String>,
    /// Leaf node that reported each single-homed interface.
    pub nodes: BTreeMap<PathName, String>,
    /// IP seen on the same line as each path.
    pub path_ips: BTreeMap<PathName, String>,
}

impl EndpointRecord {
    pub fn node_for(&self, path: &PathName) -> Option<&str> {
        self.nodes.get(path).map(String::as_str)
    }

    pub fn ip_for(&self, path: &PathName) -> Option<&str> {
        self.path_ips
            .get(path)
            .map(String::as_str)
            .or(self.ip.as_deref())
    }
}

/// Whether an attachment targets a VPC pair or a single leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// `protpaths-<n1>-<n2>`
    Vpc,
    /// `paths-<node>`
    Single,
}

impl PathKind {
    pub fn segment(self) -> &'static str {
        match self {
            PathKind::Vpc => "protpaths",
            PathKind::Single => "paths",
        }
    }
}

/// One EPG-to-path static binding from a directory query listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathAttachmentRecord {
    pub vlan: String,
    pub epg: String,
    pub path: PathName,
    /// `<pod>/{protpaths|paths}-<id>/pathep-[<path>]`, byte-for-byte as listed.
    pub full_path: String,
    /// `pod-<N>`
    pub pod: String,
    pub kind: PathKind,
    /// Node id segment, e.g. `425-426` or `3(X)-3(X)`.
    pub path_id: String,
    pub tenant: Option<String>,
    pub app_profile: Option<String>,
}

impl PathAttachmentRecord {
    /// Recompute the fully-qualified path from its parts.
    pub fn rebuild_full_path(&self) -> String {
        format_full_path(&self.pod, self.kind, &self.path_id, self.path.as_str())
    }
}

/// Render `<pod>/<kind>-<id>/pathep-[<path>]`.
pub fn format_full_path(pod: &str, kind: PathKind, id: &str, path: &str) -> String {
    format!("{pod}/{}-{id}/pathep-[{path}]", kind.segment())
}

#[cfg(test)]
mod tests {
    use super::{format_full_path, normalize_path, PathKind, PathName};

    #[test]
    fn normalization_ignores_case_brackets_and_padding() {
        assert_eq!(normalize_path(" [eth1/5] "), normalize_path("ETH1/5"));
        assert_eq!(normalize_path("[425-426-VPC-31-32-PG]"), "425-426-vpc-31-32-pg");
    }

    #[test]
    fn path_names_compare_by_key() {
        let a = PathName::new("Eth1/5");
        let b = PathName::new("[eth1/5]");
        assert!(a.same_as(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn formats_both_path_kinds() {
        assert_eq!(
            format_full_path("pod-2", PathKind::Vpc, "425-426", "425-426-VPC-31-32-PG"),
            "pod-2/protpaths-425-426/pathep-[425-426-VPC-31-32-PG]"
        );
        assert_eq!(
            format_full_path("pod-1", PathKind::Single, "303", "eth1/5"),
            "pod-1/paths-303/pathep-[eth1/5]"
        );
    }
}
