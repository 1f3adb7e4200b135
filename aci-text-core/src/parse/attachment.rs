use std::sync::OnceLock;

use regex::Captures;
use tracing::debug;

use crate::grammar::{group, Grammar, Rule};
use crate::model::{format_full_path, PathAttachmentRecord, PathKind, PathName};

/// Parse a directory-query listing of `rspathAtt` distinguished names.
///
/// One record per recognized line, in input order. Lines that match neither
/// the VPC nor the single-homed shape, or whose EPG carries no `VLAN<N>`
/// token, are skipped.
pub fn parse_attachments(text: &str) -> Vec<PathAttachmentRecord> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_attachment_line(line) {
            Some(record) => out.push(record),
            None => debug!(line = idx + 1, "skipping unrecognized attachment line"),
        }
    }
    out
}

/// Parse one `dn : uni/.../rspathAtt-[...]` line.
pub fn parse_attachment_line(line: &str) -> Option<PathAttachmentRecord> {
    let binding = binding_grammar().first_match(line)?;
    let vlan = vlan_grammar().first_match(&binding.epg)?;
    if binding.path.is_empty() {
        return None;
    }
    let (tenant, app_profile) = owner_grammar()
        .first_match(line)
        .map_or((None, None), |(t, a)| (Some(t), Some(a)));

    Some(PathAttachmentRecord {
        full_path: format_full_path(&binding.pod, binding.kind, &binding.id, &binding.path),
        vlan,
        epg: binding.epg,
        path: PathName::new(binding.path),
        pod: binding.pod,
        kind: binding.kind,
        path_id: binding.id,
        tenant,
        app_profile,
    })
}

#[derive(Debug)]
struct Binding {
    epg: String,
    pod: String,
    kind: PathKind,
    id: String,
    path: String,
}

fn binding(caps: &Captures<'_>, kind: PathKind) -> Option<Binding> {
    Some(Binding {
        epg: group(caps, 1)?,
        pod: group(caps, 2)?,
        kind,
        id: group(caps, 3)?,
        path: group(caps, 4).unwrap_or_default(),
    })
}

/// VPC (`protpaths-`) first, then single-homed (`paths-`). Node ids accept
/// digits, parentheses and `X` placeholders such as `3(X)-3(X)`.
fn binding_grammar() -> &'static Grammar<Binding> {
    static GRAMMAR: OnceLock<Grammar<Binding>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![
            Rule::new(
                "protpaths",
                r"epg-([^/\s]+)/rspathAtt-\[topology/(pod-\d+)/protpaths-([0-9X()\-]+)/pathep-\[([^\]]*)\]\]",
                |c| binding(c, PathKind::Vpc),
            ),
            Rule::new(
                "paths",
                r"epg-([^/\s]+)/rspathAtt-\[topology/(pod-\d+)/paths-([0-9X()\-]+)/pathep-\[([^\]]*)\]\]",
                |c| binding(c, PathKind::Single),
            ),
        ])
    })
}

fn vlan_grammar() -> &'static Grammar<String> {
    static GRAMMAR: OnceLock<Grammar<String>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![Rule::new("epg-vlan", r"(?i)VLAN(\d+)", |c| group(c, 1))])
    })
}

fn owner_grammar() -> &'static Grammar<(String, String)> {
    static GRAMMAR: OnceLock<Grammar<(String, String)>> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Grammar::new(vec![Rule::new(
            "tenant-app",
            r"uni/tn-([^/\s]+)/ap-([^/\s]+)/epg-",
            |c| Some((group(c, 1)?, group(c, 2)?)),
        )])
    })
}
