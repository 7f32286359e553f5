//! End-to-end runs of `simprint compare`.

use std::process::Command;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

mod util;
use util::make_corpus;

fn simprint() -> Command
{
    Command::cargo_bin("simprint").expect("bin")
}

#[test]
fn identical_tokens_are_fully_similar()
{
    simprint()
        .args(["--no-color", "compare", "9F3A0C21", "9f3a0c21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance 0  similarity 100.00%  near-duplicate"));
}

#[test]
fn similarity_is_truncated()
{
    // 0 vs 1 differ in one bit: 98.4375 -> 98.43
    simprint()
        .args(["--no-color", "compare", "0", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("similarity 98.43%"));
}

#[test]
fn strict_is_default_and_rejects_garbage()
{
    simprint()
        .args(["compare", "zz", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid hex digit").and(predicate::str::contains("help:")));
}

#[test]
fn lenient_reads_garbage_as_zero()
{
    simprint()
        .args(["--no-color", "compare", "zz", "0", "--lenient"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance 0"));
}

#[test]
fn configured_policy_applies()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("simprint.toml")
        .write_str("[compare]\npolicy = \"lenient\"\nthreshold = 99.0\n")
        .unwrap();

    simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "compare", "not-hex", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance 1  similarity 98.43%  distinct"));

    // Explicit --strict still wins over the file
    simprint()
        .current_dir(tmp.path())
        .args(["compare", "not-hex", "1", "--strict"])
        .assert()
        .failure();
}

#[test]
fn json_output_shape()
{
    let out = simprint()
        .args(["compare", "FF", "F0", "--format", "json", "--threshold", "95"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(v["left"], "FF");
    assert_eq!(v["right"], "F0");
    assert_eq!(v["distance"], 4);
    assert_eq!(v["similarity"], 93.75);
    assert_eq!(v["near_duplicate"], false);
}

#[test]
fn files_mode_flags_near_duplicates()
{
    let tmp = make_corpus();

    simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "compare", "--files", "docs/original.txt", "docs/original.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("distance 0"));

    let out = simprint()
        .current_dir(tmp.path())
        .args(["compare", "--files", "docs/original.txt", "docs/edited.txt", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let near: Value = serde_json::from_slice(&out.stdout).unwrap();

    let out = simprint()
        .current_dir(tmp.path())
        .args(["compare", "--files", "docs/original.txt", "docs/unrelated.md", "--format", "json"])
        .output()
        .unwrap();
    let far: Value = serde_json::from_slice(&out.stdout).unwrap();

    assert!(near["similarity"].as_f64().unwrap() > far["similarity"].as_f64().unwrap());
}
