//! Command-line tests run against a pre-populated cache, so no network is used.

mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use common::{TEST_COMBINED_CSV, TEST_DOCUMENT, TEST_SPLIT_CSV};
use hla_align::hla_loci;
use predicates::prelude::*;

fn populate_cache(dir: &Path) {
    for locus in hla_loci() {
        fs::write(dir.join(locus.cache_file_name()), TEST_DOCUMENT).unwrap();
    }
}

#[test]
fn test_help() {
    Command::cargo_bin("hla-align")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--row-order"));
}

#[test]
fn test_all_loci_from_cache() {
    let dir = tempfile::tempdir().unwrap();
    populate_cache(dir.path());

    Command::cargo_bin("hla-align")
        .unwrap()
        .arg("--output-dir")
        .arg(dir.path())
        .args(["--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "locus\tstatus\tcached\talleles\tcolumns\tblocks\tunexpected_tags\terror\n",
        ))
        .stdout(predicate::str::contains("DRB5\tok\ttrue\t2\t4\t2\t1\t\n"));

    for locus in hla_loci() {
        assert_eq!(
            fs::read_to_string(dir.path().join(locus.split_file_name())).unwrap(),
            TEST_SPLIT_CSV
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(locus.combined_file_name())).unwrap(),
            TEST_COMBINED_CSV
        );
    }
}

#[test]
fn test_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    populate_cache(dir.path());

    let output = Command::cargo_bin("hla-align")
        .unwrap()
        .arg("--output-dir")
        .arg(dir.path())
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = summary.as_array().unwrap();
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[0]["locus"], "A");
    assert_eq!(rows[0]["status"], "ok");
    assert_eq!(rows[0]["alleles"], 2);
}

#[test]
fn test_malformed_locus_fails_run_but_keeps_others() {
    let dir = tempfile::tempdir().unwrap();
    populate_cache(dir.path());
    fs::write(dir.path().join("B.html"), "<html>no alignment here</html>").unwrap();

    Command::cargo_bin("hla-align")
        .unwrap()
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAILED"))
        .stderr(predicate::str::contains("1 of 11 loci failed: B"));

    assert!(!dir.path().join("B.csv").exists());
    assert!(dir.path().join("A.csv").exists());
    assert!(dir.path().join("DRB5.csv").exists());
}

#[test]
fn test_invalid_row_order() {
    Command::cargo_bin("hla-align")
        .unwrap()
        .args(["--row-order", "random"])
        .assert()
        .failure();
}
