use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::grammar::{group, Grammar, Rule};
use crate::model::{EndpointRecord, PathName};

/// Parse one endpoint-location dump.
///
/// Returns `None` unless at least one `vlan-<N>` token and one interface or
/// VPC path were found. Never fails on malformed input; unrecognized lines are
/// skipped.
pub fn parse_endpoint(text: &str) -> Option<EndpointRecord> {
    let mut vlan: Option<String> = None;
    let mut ip: Option<String> = None;
    let mut pod: Option<String> = None;
    let mut epg: Option<String> = None;
    let mut paths: Vec<PathName> = Vec::new();
    let mut nodes = BTreeMap::new();
    let mut path_ips = BTreeMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if is_header(line) {
            debug!(line = idx + 1, "skipping endpoint table header");
            continue;
        }

        if vlan.is_none() {
            vlan = vlan_grammar().first_match(line);
        }
        let line_ip = ip_grammar().first_match(line);
        if ip.is_none() {
            ip.clone_from(&line_ip);
        }
        if pod.is_none() {
            pod = pod_grammar().first_match(line);
        }
        if epg.is_none() {
            epg = epg_grammar().first_match(line);
        }

        let mut found = Vec::new();
        if let Some((node, path)) = interface_grammar().first_match(line) {
            if let Some(node) = node {
                nodes.entry(path.clone()).or_insert(node);
            }
            found.push(path);
        }
        if let Some((rule, path)) = vpc_grammar().first_match_named(line) {
            debug!(line = idx + 1, rule, path = %path, "matched vpc path");
            found.push(path);
        }

        for path in found {
            if let Some(line_ip) = &line_ip {
                path_ips.entry(path.clone()).or_insert_with(|| line_ip.clone());
            }
            if !paths.iter().any(|p: &PathName| p.same_as(&path)) {
                paths.push(path);
            }
        }
    }

    let Some(vlan) = vlan else {
        debug!("no vlan token in endpoint output");
        return None;
    };
    if paths.is_empty() {
        debug!(vlan = %vlan, "no interface paths in endpoint output");
        return None;
    }

    Some(EndpointRecord {
        vlan,
        ip,
        paths,
        pod: pod.unwrap_or_default(),
        epg,
        nodes,
        path_ips,
    })
}

/// Column header of the endpoint table (`... Node ... Interface ...`).
fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("node") && lower.contains("interface")
}

fn vlan_grammar() -> &'static Grammar<String> {
    static GRAMMAR: OnceLock<Grammar<String>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![Rule::new("encap", r"(?i)\bvlan-(\d+)\b", |c| {
            group(c, 1)
        })])
    })
}

fn ip_grammar() -> &'static Grammar<String> {
    static GRAMMAR: OnceLock<Grammar<String>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![Rule::new(
            "dotted-quad",
            r"\b(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})\b",
            |c| group(c, 1),
        )])
    })
}

fn pod_grammar() -> &'static Grammar<String> {
    static GRAMMAR: OnceLock<Grammar<String>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![Rule::new("pod", r"(?i)\b(pod-\d+)\b", |c| {
            group(c, 1).map(|p| p.to_lowercase())
        })])
    })
}

fn epg_grammar() -> &'static Grammar<String> {
    static GRAMMAR: OnceLock<Grammar<String>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![Rule::new("aepg", r"(?i)^AEPg\s*:\s*(\S+)", |c| {
            group(c, 1)
        })])
    })
}

/// `[<node>] ethX/Y ... vlan-<N>` yields `(node, ethX/Y)`. The node must be a
/// whitespace-delimited column so an IP's last octet is never taken for it.
fn interface_grammar() -> &'static Grammar<(Option<String>, PathName)> {
    static GRAMMAR: OnceLock<Grammar<(Option<String>, PathName)>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![Rule::new(
            "node-interface",
            r"(?i)(?:(?:^|\s)(\d+)\s+)?\b(eth\d+/\d+(?:/\d+)?)\b.*\bvlan-\d+\b",
            |c| Some((group(c, 1), PathName::new(group(c, 2)?))),
        )])
    })
}

/// VPC policy-group names, tried in order; every candidate must have the
/// canonical `<d>-<d>-VPC-<d>-<d>-PG` shape. `bare` takes whitespace-delimited
/// columns, `bracketed` takes `pathep-[...]` style names (inner padding trimmed).
fn vpc_grammar() -> &'static Grammar<PathName> {
    static GRAMMAR: OnceLock<Grammar<PathName>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![
            Rule::new("vpc-keyword", r"(?i)\bvpc\s+\[?([^\s\]]+)\]?", canonical_vpc),
            Rule::new(
                "bare",
                r"(?i)(?:^|\s)(\d+-\d+-VPC-\d+-\d+-PG)(?:$|\s)",
                canonical_vpc,
            ),
            Rule::new("bracketed", r"(?i)\[([^\]]*vpc[^\]]*)\]", canonical_vpc),
        ])
    })
}

fn canonical_vpc(caps: &regex::Captures<'_>) -> Option<PathName> {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    let shape = SHAPE.get_or_init(|| {
        Regex::new(r"(?i)^\d+-\d+-VPC-\d+-\d+-PG$")
            .unwrap_or_else(|err| panic!("vpc shape pattern is invalid: {err}"))
    });
    group(caps, 1)
        .filter(|candidate| shape.is_match(candidate))
        .map(PathName::new)
}
