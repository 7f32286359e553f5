//! End-to-end runs of `simprint fingerprint`.

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

/// Token column of text output, keyed by trailing file name
fn tokens_by_name(stdout: &[u8]) -> Vec<(String, String)>
{
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| {
            let (token, path) = line.split_once("  ")?;
            let name = std::path::Path::new(path.trim())
                .file_name()?
                .to_string_lossy()
                .into_owned();
            Some((name, token.to_string()))
        })
        .collect()
}

#[test]
fn single_word_document_token_is_its_fnv_hash()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("one.txt")
        .write_str("FooBar")
        .unwrap();

    simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "fingerprint", "one.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("85944171F73967E8  one.txt"));
}

#[test]
fn empty_document_ties_to_all_ones()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("empty.txt")
        .touch()
        .unwrap();

    simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "fingerprint", "empty.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FFFFFFFFFFFFFFFF"));
}

#[test]
fn directory_walk_is_sorted_and_skips_hidden()
{
    let tmp = make_corpus();

    let out = simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "--quiet", "fingerprint", "docs"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let names: Vec<String> = tokens_by_name(&out.stdout)
        .into_iter()
        .map(|(n, _)| n)
        .collect();
    assert_eq!(names, ["edited.txt", "original.txt", "unrelated.md"]);
}

#[test]
fn include_glob_and_hidden_flag()
{
    let tmp = make_corpus();

    let out = simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "fingerprint", "docs", "--include", "*.txt", "--hidden"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let names: Vec<String> = tokens_by_name(&out.stdout)
        .into_iter()
        .map(|(n, _)| n)
        .collect();
    assert_eq!(names, [".draft.txt", "edited.txt", "original.txt"]);
}

#[test]
fn json_output_has_tokens_and_feature_counts()
{
    let tmp = make_corpus();

    let out = simprint()
        .current_dir(tmp.path())
        .args(["fingerprint", "docs/original.txt", "docs/unrelated.md", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: Value = serde_json::from_slice(&out.stdout).expect("valid json");
    let rows = v
        .as_array()
        .expect("array");
    assert_eq!(rows.len(), 2);
    for row in rows
    {
        let token = row["token"]
            .as_str()
            .unwrap();
        assert!((1..=16).contains(&token.len()));
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(row["features"].as_u64().unwrap() > 0);
    }
    assert!(
        rows[0]["path"]
            .as_str()
            .unwrap()
            .ends_with("original.txt")
    );
}

#[test]
fn pad_flag_renders_sixteen_digits()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("doc.txt")
        .write_str("some words here")
        .unwrap();

    let out = simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "fingerprint", "doc.txt", "--pad"])
        .output()
        .unwrap();
    let pairs = tokens_by_name(&out.stdout);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].1.len(), 16);
}

#[test]
fn missing_path_fails()
{
    let tmp = assert_fs::TempDir::new().unwrap();

    simprint()
        .current_dir(tmp.path())
        .args(["fingerprint", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn near_duplicates_share_more_bits_than_unrelated()
{
    let tmp = make_corpus();

    let out = simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "fingerprint", "docs"])
        .output()
        .unwrap();
    let pairs = tokens_by_name(&out.stdout);
    let token = |name: &str| {
        let t = &pairs
            .iter()
            .find(|(n, _)| n == name)
            .unwrap()
            .1;
        u64::from_str_radix(t, 16).unwrap()
    };

    let near = (token("original.txt") ^ token("edited.txt")).count_ones();
    let far = (token("original.txt") ^ token("unrelated.md")).count_ones();
    assert!(near < far, "near={near} far={far}");
}

#[cfg(unix)]
#[test]
fn json_output_survives_non_utf8_file_names()
{
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let tmp = assert_fs::TempDir::new().unwrap();
    let name = OsStr::from_bytes(b"bad\xff.txt");
    std::fs::write(tmp.path().join(name), "latin one bytes").unwrap();

    let out = simprint()
        .current_dir(tmp.path())
        .args(["--no-color", "fingerprint", ".", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let v: Value = serde_json::from_slice(&out.stdout).expect("valid json");
    let path = v[0]["path"]
        .as_str()
        .unwrap();
    assert!(path.contains('\u{FFFD}'), "lossy path {path}");
}
