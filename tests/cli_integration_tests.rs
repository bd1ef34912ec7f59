//! Integration tests for the perfverdict command line
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const VALID_SUITE: &str = r#"
programs = ["quicksort", "insertion_sort"]
data = { gen = { lower = 50, step = 50, upper = 2000 } }
baseline = true
full_evaluation = true
compiler_flags = []

[harness]

[analysis]
top_models = 2

[analysis.outputs]
report = "report.txt"
"#;

const FITS: &str = r#"[
  {"model": {"poly": 1}, "stats": {"pred_mse": 4.0, "pred_mae": 1.8, "sst": 900.0, "press": 160.0,
   "r2": 0.96, "adj_r2": 0.95, "pred_r2": 0.94, "bic": 70.0, "aic": 66.0, "cp": 2.0}},
  {"model": {"poly": 2}, "stats": {"pred_mse": 0.3, "pred_mae": 0.5, "sst": 900.0, "press": 12.0,
   "r2": 0.999, "adj_r2": 0.998, "pred_r2": 0.997, "bic": 21.0, "aic": 17.0, "cp": 3.0}},
  {"model": {"exp": 2}, "stats": {"pred_mse": 800.0, "pred_mae": 25.0, "sst": 900.0, "press": 32000.0,
   "r2": -2.0, "adj_r2": -2.1, "pred_r2": -3.0, "bic": 300.0, "aic": 296.0, "cp": 90.0}}
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn samples(scale: f64) -> String {
    let entries: Vec<String> = (1..=25)
        .map(|n| format!(r#"{{"size": {}, "runtime": {}}}"#, n * 100, n as f64 * scale))
        .collect();
    format!("[{}]", entries.join(","))
}

#[test]
fn test_validate_accepts_complete_suite() {
    let dir = TempDir::new().unwrap();
    let suite = write(&dir, "suite.toml", VALID_SUITE);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("validate").arg(&suite);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("is valid"))
        .stdout(predicate::str::contains("report -> report.txt"))
        .stdout(predicate::str::contains("graph -> complexity.png"));
}

#[test]
fn test_validate_reports_every_error() {
    let dir = TempDir::new().unwrap();
    let suite = write(
        &dir,
        "suite.toml",
        r#"
programs = ["a"]
data = { gen = { lower = 10, step = 10, upper = 50 } }

[analysis]
cv_train = 1.2
top_models = 0
"#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("validate").arg(&suite);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing required field `harness`"))
        .stderr(predicate::str::contains("missing required field `compiler_flags`"))
        .stderr(predicate::str::contains("cv_train must be in (0, 1), got 1.2"))
        .stderr(predicate::str::contains("top_models must be in [1, 8], got 0"))
        .stderr(predicate::str::contains(
            "need at least 20 distinct input sizes, got 5",
        ))
        .stderr(predicate::str::contains("7 configuration error(s)"));
}

#[test]
fn test_validate_missing_file() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("validate").arg("/nonexistent/suite.toml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_select_text_report() {
    let dir = TempDir::new().unwrap();
    let fits = write(&dir, "fits.json", FITS);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("select").arg(&fits);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("APPROXIMATED COMPLEXITY: quadratic"))
        .stdout(predicate::str::contains("y = a₀ + a₁x + a₂x²"))
        .stdout(predicate::str::contains("1. quadratic"))
        .stdout(predicate::str::contains("2. linear"))
        .stdout(predicate::str::contains("3. 2ⁿ"));
}

#[test]
fn test_select_json_with_suite_config() {
    let dir = TempDir::new().unwrap();
    let fits = write(&dir, "fits.json", FITS);
    let suite = write(&dir, "suite.toml", VALID_SUITE);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("select")
        .arg(&fits)
        .arg("--config")
        .arg(&suite)
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["candidates"], 3);

    let ranked = parsed["ranked"].as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["name"], "quadratic");
    assert_eq!(ranked[0]["rank"], 1);
    assert_eq!(ranked[1]["model"]["poly"], 1);
}

#[test]
fn test_select_rejects_malformed_fits() {
    let dir = TempDir::new().unwrap();
    let fits = write(&dir, "fits.json", r#"[{"model": {"cubic": 3}}]"#);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("select").arg(&fits);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_compare_first_faster() {
    let dir = TempDir::new().unwrap();
    let fast = write(&dir, "quicksort.json", &samples(1.0));
    let slow = write(&dir, "isort.json", &samples(3.0));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("compare").arg(&fast).arg(&slow);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "quicksort < isort (100.0% of input sizes)",
        ))
        .stdout(predicate::str::contains("Shared input sizes: 25"));
}

#[test]
fn test_compare_with_baseline_subtracted() {
    let dir = TempDir::new().unwrap();
    let fast = write(&dir, "fast.json", &samples(1.0));
    let slow = write(&dir, "slow.json", &samples(3.0));
    // Baseline dominates both programs, leaving zero runtime everywhere
    let baseline = write(&dir, "baseline.json", &samples(3.0));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("compare")
        .arg(&fast)
        .arg(&slow)
        .arg("--baseline")
        .arg(&baseline);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fast ≈ slow (100.0% of input sizes)"));
}

#[test]
fn test_compare_baseline_needs_suite_permission() {
    let dir = TempDir::new().unwrap();
    let fast = write(&dir, "fast.json", &samples(1.0));
    let slow = write(&dir, "slow.json", &samples(3.0));
    let baseline = write(&dir, "baseline.json", &samples(0.5));
    let disabled = write(
        &dir,
        "suite.toml",
        &VALID_SUITE.replace("baseline = true", "baseline = false"),
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("compare")
        .arg(&fast)
        .arg(&slow)
        .arg("--config")
        .arg(&disabled)
        .arg("--baseline")
        .arg(&baseline);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("conflicts with `baseline = false`"));

    let enabled = write(&dir, "enabled.toml", VALID_SUITE);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("compare")
        .arg(&fast)
        .arg(&slow)
        .arg("--config")
        .arg(&enabled)
        .arg("--baseline")
        .arg(&baseline);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fast < slow (100.0% of input sizes)"));
}

#[test]
fn test_compare_json_equivalent() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", &samples(1.0));
    let b = write(&dir, "b.json", &samples(1.1));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("compare").arg(&a).arg(&b).arg("--format").arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["shared_sizes"], 25);
    assert_eq!(parsed["verdict"]["relation"], "equivalent");
    assert_eq!(parsed["verdict"]["confidence"], 1.0);
}

#[test]
fn test_compare_no_verdict() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.json", "[]");
    let b = write(&dir, "b.json", &samples(1.0));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("compare").arg(&a).arg(&b);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("NO VERDICT"));
}

#[test]
fn test_models_lists_default_catalogue() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("perfverdict");
    cmd.arg("models");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("constant"))
        .stdout(predicate::str::contains("log₂²n"))
        .stdout(predicate::str::contains("n¹log₂¹n"))
        .stdout(predicate::str::contains("y = a₀ + 2ˣ"));
}
