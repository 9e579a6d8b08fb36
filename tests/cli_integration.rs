// Drives the compiled binary end to end. PDF output needs no system fonts, so
// these run everywhere; the PNG path is covered in figure_outputs.rs.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn avalanche_plot(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("avalanche-plot").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn embedded_run_writes_pdf_and_prints_summary() {
    let dir = tempdir().unwrap();
    avalanche_plot(dir.path())
        .args(["--format", "pdf", "--output-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Saved:"))
        .stdout(predicate::str::contains("stat_histogram.pdf"))
        .stdout(predicate::str::contains("Total measurements: 2,550,000"))
        .stdout(predicate::str::contains("Mean: 64.00 bits"))
        .stdout(predicate::str::contains("Difference: 0.0002 bits"))
        .stdout(predicate::str::contains("✓ Perfect avalanche effect demonstrated!"));

    let pdf = dir.path().join("stat_histogram.pdf");
    assert!(fs::metadata(&pdf).unwrap().len() > 0);
    assert!(!dir.path().join("stat_histogram.png").exists());
}

#[test]
fn csv_input_and_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let export = dir.path().join("out.csv");
    fs::write(&input, "hamming_distance,count\n91,2\n34,1\n").unwrap();

    avalanche_plot(dir.path())
        .args(["-f", "pdf", "--stem", "small", "-i"])
        .arg(&input)
        .arg("--export-csv")
        .arg(&export)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total measurements: 3"))
        .stdout(predicate::str::contains("Mean: 72.00 bits"))
        .stdout(predicate::str::contains("⚠ Mean is 8.0000 bits away"));

    assert!(dir.path().join("small.pdf").exists());
    assert_eq!(
        fs::read_to_string(&export).unwrap(),
        "hamming_distance,count\n34,1\n91,2\n"
    );
}

#[test]
fn config_file_sets_stem() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("cfg.json");
    fs::write(&config, r#"{ "output_stem": "from_config" }"#).unwrap();

    avalanche_plot(dir.path())
        .args(["-f", "pdf", "--config"])
        .arg(&config)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("from_config.pdf").exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    avalanche_plot(dir.path())
        .args(["-f", "pdf", "-i"])
        .arg(dir.path().join("nope.csv"))
        .arg("-o")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn duplicate_rows_fail() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("dup.csv");
    fs::write(&input, "hamming_distance,count\n64,1\n64,1\n").unwrap();

    avalanche_plot(dir.path())
        .args(["-f", "pdf", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate hamming distance 64"));

    assert!(!dir.path().join("stat_histogram.pdf").exists());
}
