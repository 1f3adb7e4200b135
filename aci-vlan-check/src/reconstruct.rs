//! Rebuild fully-qualified `pathep` strings for denied endpoint paths.
//!
//! Remediation tooling needs `<pod>/{protpaths|paths}-<id>/pathep-[<path>]`
//! for every path that is missing a binding. Resolution runs an ordered list
//! of resolvers; the first that produces a string wins:
//!
//! 1. `exact`: an attachment with the same normalized path name exists
//!    (typically bound in another VLAN), reuse its full path verbatim.
//! 2. `vpc`: the path looks like `<n1>-<n2>-VPC...`; take the pod of any
//!    attachment on `protpaths-<n1>-<n2>`, else the fallback pod.
//! 3. `single`: the path starts with `<node>-`/`<node>/`, or the endpoint
//!    dump named its leaf; take the pod of any attachment on `paths-<node>`,
//!    else the fallback pod.
//!
//! Anything else becomes `<pod>/paths-XXX/pathep-[<path>]`.

use std::sync::OnceLock;

use aci_text_core::{format_full_path, PathAttachmentRecord, PathKind, PathName};
use regex::Regex;
use tracing::debug;

/// Node id written when a single-homed path's leaf cannot be determined.
pub const UNKNOWN_NODE: &str = "XXX";

/// Read-only view over the attachment list for pod and path lookups.
#[derive(Debug, Clone, Copy)]
pub struct PodLookup<'a> {
    attachments: &'a [PathAttachmentRecord],
}

impl<'a> PodLookup<'a> {
    pub fn new(attachments: &'a [PathAttachmentRecord]) -> Self {
        Self { attachments }
    }

    /// Full path of the first attachment whose path normalizes equal.
    pub fn exact(&self, path: &PathName) -> Option<&'a str> {
        self.attachments
            .iter()
            .find(|a| a.path.same_as(path))
            .map(|a| a.full_path.as_str())
    }

    /// Pod of the first attachment whose full path contains `segment`.
    pub fn pod_for_segment(&self, segment: &str) -> Option<&'a str> {
        self.attachments
            .iter()
            .find(|a| a.full_path.contains(segment))
            .map(|a| a.pod.as_str())
    }

    /// Pod of the first attachment carrying `vlan`.
    pub fn pod_for_vlan(&self, vlan: &str) -> Option<&'a str> {
        self.attachments
            .iter()
            .find(|a| a.vlan == vlan)
            .map(|a| a.pod.as_str())
    }
}

/// Pod to use for one entry when no attachment shares the path's node ids.
///
/// First VLAN-matching attachment, then the endpoint dump's own pod, then the
/// configured fallback.
pub fn default_pod(
    lookup: &PodLookup<'_>,
    vlan: &str,
    endpoint_pod: &str,
    configured: &str,
) -> String {
    lookup
        .pod_for_vlan(vlan)
        .or_else(|| Some(endpoint_pod).filter(|p| !p.is_empty()))
        .unwrap_or(configured)
        .to_string()
}

struct Request<'r, 'a> {
    path: &'r PathName,
    node_hint: Option<&'r str>,
    lookup: &'r PodLookup<'a>,
    fallback_pod: &'r str,
}

type Resolver = fn(&Request<'_, '_>) -> Option<String>;

const RESOLVERS: &[(&str, Resolver)] = &[
    ("exact", resolve_exact),
    ("vpc", resolve_vpc),
    ("single", resolve_single),
];

/// Build the fully-qualified path for one denied endpoint path.
///
/// `fallback_pod` is used whenever no attachment reveals the pod; callers
/// normally pass [`default_pod`]. Never fails: unrecognized shapes produce a
/// `paths-XXX` placeholder.
pub fn reconstruct_path(
    path: &PathName,
    node_hint: Option<&str>,
    lookup: &PodLookup<'_>,
    fallback_pod: &str,
) -> String {
    let request = Request {
        path,
        node_hint,
        lookup,
        fallback_pod,
    };
    for (name, resolver) in RESOLVERS {
        if let Some(full_path) = resolver(&request) {
            debug!(path = %path, resolver = *name, full_path = %full_path, "reconstructed path");
            return full_path;
        }
    }
    debug!(path = %path, "no resolver matched; emitting placeholder");
    format_full_path(fallback_pod, PathKind::Single, UNKNOWN_NODE, path.as_str())
}

/// Resolver names in precedence order.
pub fn resolver_names() -> Vec<&'static str> {
    RESOLVERS.iter().map(|(name, _)| *name).collect()
}

fn resolve_exact(req: &Request<'_, '_>) -> Option<String> {
    req.lookup.exact(req.path).map(ToOwned::to_owned)
}

fn resolve_vpc(req: &Request<'_, '_>) -> Option<String> {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| static_regex(r"(?i)^(\d+)-(\d+)-VPC"));
    let caps = shape.captures(req.path.as_str().trim())?;
    let pair = format!("{}-{}", &caps[1], &caps[2]);
    let pod = req
        .lookup
        .pod_for_segment(&format!("/protpaths-{pair}/"))
        .unwrap_or(req.fallback_pod);
    Some(format_full_path(pod, PathKind::Vpc, &pair, req.path.as_str()))
}

fn resolve_single(req: &Request<'_, '_>) -> Option<String> {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| static_regex(r"^(\d+)[-/]"));
    let node = shape
        .captures(req.path.as_str().trim())
        .map(|caps| caps[1].to_string())
        .or_else(|| req.node_hint.map(ToOwned::to_owned))?;
    let pod = req
        .lookup
        .pod_for_segment(&format!("/paths-{node}/"))
        .unwrap_or(req.fallback_pod);
    Some(format_full_path(pod, PathKind::Single, &node, req.path.as_str()))
}

fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid resolver pattern {pattern}: {err}"))
}
