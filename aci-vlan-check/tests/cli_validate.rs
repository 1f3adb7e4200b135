use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("aci-vlan-check"));
    cmd.env("NO_COLOR", "1")
        .env("CLICOLOR", "0")
        .env_remove("RUST_LOG");
    cmd
}

fn validate() -> Command {
    let mut cmd = cli();
    cmd.arg("validate")
        .arg("--attachments")
        .arg(fixture("fixtures/attachments.txt"));
    cmd
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read_dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

#[test]
fn validate_reports_allowed_and_denied_paths() {
    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "result allowed=1 not_allowed=1 unparsed=0",
        ))
        .stdout(predicate::str::contains("- [not_allowed] eth1/5"))
        .stdout(predicate::str::contains("- [allowed] eth1/9"));
}

#[test]
fn validate_verbose_shows_node_and_ip() {
    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- [not_allowed] eth1/5 node=303 ip=10.71.3.26",
        ))
        .stderr(predicate::str::contains("validation complete"));
}

#[test]
fn validate_json_carries_statuses() {
    let output = validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-vpc.txt"))
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let results = &value["entries"][0]["results"];
    assert_eq!(results[0]["path"], "425-426-VPC-31-32-PG");
    assert_eq!(results[0]["status"], "allowed");
    assert_eq!(results[1]["status"], "not_allowed");
    assert_eq!(results[1]["has_active_endpoint"], true);
    assert_eq!(value["not_allowed"], 1);
}

#[test]
fn validate_writes_combined_csv() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("denied.csv");

    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-vpc.txt"))
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-garbage.txt"))
        .arg("--csv")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("unparsed=1"))
        .stdout(predicate::str::contains("could not parse endpoint output"));

    let csv = fs::read_to_string(&out).expect("read csv");
    assert_eq!(
        csv,
        "VLAN,EPG,PATH\n\
         713,EPG-VLAN713-app,pod-1/paths-303/pathep-[eth1/5]\n\
         623,EPG-VLAN623-web,pod-1/protpaths-427-428/pathep-[427-428-VPC-11-12-PG]\n"
    );
}

#[test]
fn validate_epg_labels_pair_with_endpoints() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("denied.csv");

    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .arg("--epg")
        .arg("app-servers")
        .arg("--csv")
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).expect("read csv");
    assert!(csv.contains("713,epg-app-servers,pod-1/paths-303/pathep-[eth1/5]"));
}

#[test]
fn validate_rejects_extra_epg_labels() {
    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .arg("--epg")
        .arg("a")
        .arg("--epg")
        .arg("b")
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 --epg labels for 1 --endpoint"));
}

#[test]
fn validate_csv_dir_uses_dated_file_name() {
    let dir = tempdir().expect("tempdir");

    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .arg("--csv-dir")
        .arg(dir.path())
        .assert()
        .success();

    let names = csv_files(dir.path());
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("vlan-validation-"));
    assert_eq!(names[0].len(), "vlan-validation-YYYY-MM-DD.csv".len());
}

#[test]
fn validate_per_entry_skips_entries_without_denials() {
    let dir = tempdir().expect("tempdir");
    let clean = dir.path().join("clean.txt");
    fs::write(&clean, "304  eth1/9  vlan-713\n").expect("write");
    let out_dir = dir.path().join("out");
    fs::create_dir(&out_dir).expect("mkdir");

    validate()
        .arg("--endpoint")
        .arg(&clean)
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-vpc.txt"))
        .arg("--csv-dir")
        .arg(&out_dir)
        .arg("--per-entry")
        .assert()
        .success();

    let names = csv_files(&out_dir);
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("-2.csv"));
    let csv = fs::read_to_string(out_dir.join(&names[0])).expect("read csv");
    assert!(csv.starts_with("VLAN,EPG,PATH\n623,"));
}

#[test]
fn validate_export_fails_when_nothing_denied() {
    let dir = tempdir().expect("tempdir");
    let clean = dir.path().join("clean.txt");
    fs::write(&clean, "304  eth1/9  vlan-713\n").expect("write");

    validate()
        .arg("--endpoint")
        .arg(&clean)
        .arg("--csv")
        .arg(dir.path().join("out.csv"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("result allowed=1 not_allowed=0"))
        .stderr(predicate::str::contains("nothing to export"));
}

#[test]
fn empty_attachments_deny_every_path() {
    let dir = tempdir().expect("tempdir");
    let attachments = dir.path().join("empty.txt");
    fs::write(&attachments, "").expect("write");

    cli()
        .arg("validate")
        .arg("--attachments")
        .arg(&attachments)
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "result allowed=0 not_allowed=2 unparsed=0",
        ))
        .stderr(predicate::str::contains("no attachments recognized"));
}

#[test]
fn strict_mode_fails_on_denied_paths() {
    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("validate failed in strict mode"));
}

#[test]
fn config_overrides_fallback_pod() {
    let dir = tempdir().expect("tempdir");
    let endpoint = dir.path().join("ep.txt");
    fs::write(&endpoint, "999  eth1/7  vlan-999\n").expect("write");
    let config = dir.path().join("settings.toml");
    fs::write(&config, "fallback_pod = \"pod-2\"\n").expect("write");
    let out = dir.path().join("out.csv");

    validate()
        .arg("--endpoint")
        .arg(&endpoint)
        .arg("--epg")
        .arg("lab")
        .arg("--config")
        .arg(&config)
        .arg("--csv")
        .arg(&out)
        .assert()
        .success();

    let csv = fs::read_to_string(&out).expect("read csv");
    assert_eq!(csv, "VLAN,EPG,PATH\n999,epg-lab,pod-2/paths-999/pathep-[eth1/7]\n");
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("settings.toml");
    fs::write(&config, "fallback_pod = \"second\"\n").expect("write");

    validate()
        .arg("--endpoint")
        .arg(fixture("fixtures/endpoint-single.txt"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load settings"));
}

#[test]
fn refuses_to_overwrite_endpoint_input() {
    let dir = tempdir().expect("tempdir");
    let endpoint = dir.path().join("ep.txt");
    fs::write(&endpoint, "303  eth1/5  vlan-713\n").expect("write");

    validate()
        .arg("--endpoint")
        .arg(&endpoint)
        .arg("--csv")
        .arg(&endpoint)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    assert_eq!(
        fs::read_to_string(&endpoint).expect("read"),
        "303  eth1/5  vlan-713\n"
    );
}
