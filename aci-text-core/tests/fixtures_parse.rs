use std::fs;
use std::path::PathBuf;

use aci_text_core::{
    parse_attachments, parse_attachments_file, parse_endpoint_file, PathKind, PathName,
};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_vpc_endpoint_dump() {
    let record = parse_endpoint_file(&fixture("fixtures/endpoint-vpc.txt"))
        .expect("read should succeed")
        .expect("record");
    assert_eq!(record.vlan, "623");
    assert_eq!(record.ip.as_deref(), Some("10.62.3.25"));
    assert_eq!(
        record.paths,
        vec![
            PathName::new("425-426-VPC-31-32-PG"),
            PathName::new("427-428-VPC-11-12-PG"),
        ]
    );
    assert_eq!(record.pod, "");
    assert_eq!(record.epg.as_deref(), Some("EPG-VLAN623-web"));
}

#[test]
fn parses_single_homed_endpoint_dump() {
    let record = parse_endpoint_file(&fixture("fixtures/endpoint-single.txt"))
        .expect("read should succeed")
        .expect("record");
    assert_eq!(record.vlan, "713");
    assert_eq!(
        record.paths,
        vec![PathName::new("eth1/5"), PathName::new("eth1/9")]
    );
    assert_eq!(record.node_for(&PathName::new("eth1/5")), Some("303"));
    assert_eq!(record.node_for(&PathName::new("eth1/9")), Some("304"));
}

#[test]
fn garbage_endpoint_dump_yields_none() {
    let record = parse_endpoint_file(&fixture("fixtures/endpoint-garbage.txt"))
        .expect("read should succeed");
    assert!(record.is_none());
}

#[test]
fn attachment_listing_skips_noise() {
    let records = parse_attachments_file(&fixture("fixtures/attachments.txt"))
        .expect("read should succeed");
    let summary: Vec<(&str, &str, PathKind)> = records
        .iter()
        .map(|r| (r.vlan.as_str(), r.full_path.as_str(), r.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                "623",
                "pod-2/protpaths-425-426/pathep-[425-426-VPC-31-32-PG]",
                PathKind::Vpc
            ),
            (
                "623",
                "pod-2/protpaths-3(X)-3(X)/pathep-[PG-UPLINK]",
                PathKind::Vpc
            ),
            ("713", "pod-1/paths-304/pathep-[eth1/9]", PathKind::Single),
            (
                "713",
                "pod-1/protpaths-427-428/pathep-[427-428-VPC-21-22-PG]",
                PathKind::Vpc
            ),
            ("850", "pod-1/paths-303/pathep-[eth1/5]", PathKind::Single),
        ]
    );
    for record in &records {
        assert_eq!(record.rebuild_full_path(), record.full_path);
    }
}

#[test]
fn parsing_twice_is_structurally_equal() {
    let raw = fs::read_to_string(fixture("fixtures/attachments.txt")).expect("read");
    assert_eq!(parse_attachments(&raw), parse_attachments(&raw));
}

#[test]
fn tolerates_invalid_utf8() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("ep.txt");
    let mut bytes = b"303 eth1/5 vlan-713 \xff\xfe\n".to_vec();
    bytes.extend_from_slice(b"10.1.1.1\n");
    fs::write(&input, bytes).expect("write");

    let record = parse_endpoint_file(&input).expect("read").expect("record");
    assert_eq!(record.vlan, "713");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = parse_attachments_file(&fixture("fixtures/does-not-exist.txt"))
        .expect_err("should fail");
    assert!(err.to_string().contains("failed to read"));
}
