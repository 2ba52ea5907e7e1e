use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn create_test_files(dir: &TempDir, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        fs::write(dir.path().join(name), content)?;
    }
    Ok(())
}

/// Runs the CLI from an empty directory so no local config file is picked up
fn cli(dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("acautomata-cli")?;
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    Ok(cmd)
}

#[test]
fn test_demo() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph finite_state_machine"))
        .stdout(predicate::str::contains("node [shape = doublecircle];"))
        .stdout(predicate::str::contains("i          7"))
        .stdout(predicate::str::contains("in         4"))
        .stdout(predicate::str::contains("tin        1"))
        .stdout(predicate::str::contains("pin        1"))
        .stdout(predicate::str::contains("string     1"));
    Ok(())
}

#[test]
fn test_count_text() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args([
            "count", "-p", "foobar", "-p", "oobar", "-p", "obar", "-p", "bar", "-p", "ar", "-p",
            "r", "--text", "foobarfoobazbarr",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("<text>"))
        .stdout(predicate::str::contains("Found 10 matches in 1 of 1 inputs"));
    Ok(())
}

#[test]
fn test_offsets_text() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["offsets", "-p", "o", "--text", "foobarfoobazbarr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[1, 2, 7, 8]"));
    Ok(())
}

#[test]
fn test_count_directory_json() -> Result<()> {
    let dir = tempdir()?;
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus)?;
    fs::write(corpus.join("a.txt"), "ushers")?;
    fs::write(corpus.join("b.txt"), "his hers")?;

    let output = cli(&dir)?
        .args([
            "count", "-p", "he", "-p", "she", "-p", "his", "-p", "hers", "--json", "corpus",
        ])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["totals"], serde_json::json!([2, 1, 1, 2]));
    assert_eq!(json["inputs_scanned"], 2);
    Ok(())
}

#[test]
fn test_count_stdin_words() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["count", "-p", "to be", "--atoms", "word", "--stats"])
        .write_stdin("to be, or not to be")
        .assert()
        .success()
        .stdout(predicate::str::contains("Totals"))
        .stdout(predicate::str::contains("Found 2 matches in 1 of 1 inputs"));
    Ok(())
}

#[test]
fn test_patterns_from_config_file() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("scan.yaml", "patterns: [\"na\"]\n")])?;

    cli(&dir)?
        .args(["count", "--config", "scan.yaml", "--text", "banana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 matches in 1 of 1 inputs"));
    Ok(())
}

#[test]
fn test_dot() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["dot", "-p", "he", "-p", "she"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph finite_state_machine {"))
        .stdout(predicate::str::contains("style = dashed"))
        .stdout(predicate::str::contains("style = dotted"))
        .stdout(predicate::str::contains("[label = \"s\"]"));
    Ok(())
}

#[test]
fn test_missing_patterns_fails() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["count", "--text", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least one pattern"));
    Ok(())
}

#[test]
fn test_missing_input_fails() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["count", "-p", "a", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FileNotFound"));
    Ok(())
}

#[test]
fn test_unknown_atom_kind_fails() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["count", "-p", "a", "--atoms", "glyph", "--text", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown atom kind"));
    Ok(())
}

#[test]
fn test_unknown_encoding_fails() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["count", "-p", "a", "--encoding", "lossi", "--text", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding mode"));
    Ok(())
}

#[test]
fn test_explicit_flag_overrides_config_file() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("scan.yaml", "patterns: [\"ab\"]\natom_kind: word\n")])?;

    cli(&dir)?
        .args(["count", "--config", "scan.yaml", "--text", "abab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 matches in 0 of 1 inputs"));

    cli(&dir)?
        .args(["count", "--config", "scan.yaml", "--atoms", "char", "--text", "abab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 matches in 1 of 1 inputs"));
    Ok(())
}
