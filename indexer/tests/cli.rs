use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use tfcore::persist::load_records;

#[test]
fn indexes_directory_to_requested_output() {
    let corpus = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(corpus.path().join("a.txt"), "The quick brown fox").unwrap();
    let store = out.path().join("custom.jsonl.gz");

    Command::new(assert_cmd::cargo::cargo_bin!("indexer"))
        .arg(corpus.path())
        .arg("--output")
        .arg(&store)
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("indexing"));

    let records = load_records(&store).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].term_frequencies.len(), 3);
}

#[test]
fn default_output_lands_in_working_directory() {
    let work = tempdir().unwrap();
    fs::create_dir(work.path().join("docs")).unwrap();
    fs::write(work.path().join("docs/a.txt"), "alpha").unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("indexer"))
        .current_dir(work.path())
        .env_remove("TFSEARCH_STORE")
        .arg("docs")
        .assert()
        .success();

    let records = load_records(work.path().join("bayesian_index.jsonl.gz")).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].path.replace('\\', "/"), "docs/a.txt");
}

#[test]
fn output_can_come_from_environment() {
    let corpus = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(corpus.path().join("a.txt"), "alpha").unwrap();
    let store = out.path().join("env.jsonl.gz");

    Command::new(assert_cmd::cargo::cargo_bin!("indexer"))
        .arg(corpus.path())
        .env("TFSEARCH_STORE", &store)
        .assert()
        .success();

    assert!(store.exists());
}

#[test]
fn missing_directory_fails() {
    let out = tempdir().unwrap();
    Command::new(assert_cmd::cargo::cargo_bin!("indexer"))
        .arg(out.path().join("does-not-exist"))
        .arg("--output")
        .arg(out.path().join("index.jsonl.gz"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn unwritable_output_fails() {
    let corpus = tempdir().unwrap();
    fs::write(corpus.path().join("blocker"), "x").unwrap();
    Command::new(assert_cmd::cargo::cargo_bin!("indexer"))
        .arg(corpus.path())
        .arg("--output")
        .arg(corpus.path().join("blocker/index.jsonl.gz"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open output store"));
}
