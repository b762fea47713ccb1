//! Runs the `certify` binary against a scratch directory.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

fn certify(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("certify").expect("certify binary");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("CERTIFY_SMTP_USERNAME")
        .env_remove("CERTIFY_SMTP_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn scratch() -> TempDir {
    let tmp = TempDir::new().unwrap();
    RgbImage::from_pixel(1600, 1200, Rgb([255, 255, 255]))
        .save(tmp.path().join("Training.png"))
        .unwrap();
    fs::write(
        tmp.path().join("roster.csv"),
        "Name,Email\nJane Doe,jane@x.com\nBob Lee,bob@x.com\n",
    )
    .unwrap();
    tmp
}

#[test]
fn render_writes_certificates_and_stages_roster() {
    let tmp = scratch();

    certify(tmp.path())
        .args(["render", "--roster", "roster.csv", "--template", "Training.png"])
        .args(["--workdir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All certificates created successfully!"));

    let out = tmp.path().join("out");
    assert!(out.join("certificate_Jane Doe.pdf").is_file());
    assert!(out.join("certificate_Bob Lee.pdf").is_file());
    assert!(out.join("roster.csv").is_file());
}

#[test]
fn render_json_reports_counts() {
    let tmp = scratch();

    let output = certify(tmp.path())
        .args(["render", "--roster", "roster.csv", "--template", "Training.png", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["phase"], "render");
    assert_eq!(value["success_count"], 2);
    assert_eq!(value["errors"].as_array().unwrap().len(), 0);
}

#[test]
fn render_with_missing_template_fails() {
    let tmp = scratch();

    certify(tmp.path())
        .args(["render", "--roster", "roster.csv", "--template", "nope.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Certificate template nope.jpg not found"));

    assert!(!tmp.path().join("uploads").exists());
}

#[test]
fn render_with_missing_columns_fails() {
    let tmp = scratch();
    fs::write(tmp.path().join("bad.csv"), "Full Name,Mail\nJane,jane@x.com\n").unwrap();

    certify(tmp.path())
        .args(["render", "--roster", "bad.csv", "--template", "Training.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing columns in the uploaded file: Name, Email",
        ));
}

#[test]
fn dry_run_send_discovers_staged_roster() {
    let tmp = scratch();

    certify(tmp.path())
        .args(["render", "--roster", "roster.csv", "--template", "Training.png"])
        .assert()
        .success();

    certify(tmp.path())
        .args(["send", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully sent 2 certificates!"));
}

#[test]
fn dry_run_send_reports_missing_certificate() {
    let tmp = scratch();

    certify(tmp.path())
        .args(["render", "--roster", "roster.csv", "--template", "Training.png"])
        .assert()
        .success();
    fs::remove_file(tmp.path().join("uploads").join("certificate_Bob Lee.pdf")).unwrap();

    certify(tmp.path())
        .args(["send", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Certificate not found for Bob Lee"))
        .stdout(predicate::str::contains("Successfully sent 1 certificates!"));
}

#[test]
fn send_without_roster_fails() {
    let tmp = scratch();
    fs::create_dir_all(tmp.path().join("uploads")).unwrap();

    certify(tmp.path())
        .args(["send", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No roster file found in"));
}

#[test]
fn run_dry_run_renders_then_sends() {
    let tmp = scratch();

    certify(tmp.path())
        .args(["run", "--roster", "roster.csv", "--template", "Training.png", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All certificates created successfully!"))
        .stdout(predicate::str::contains("Successfully sent 2 certificates!"));
}

#[test]
fn explicit_config_must_exist() {
    let tmp = scratch();

    certify(tmp.path())
        .args(["--config", "missing.yaml", "send", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn config_file_sets_workdir() {
    let tmp = scratch();
    fs::write(tmp.path().join("certify.yaml"), "workdir: batch\ntemplate: Training.png\n").unwrap();

    certify(tmp.path())
        .args(["render", "--roster", "roster.csv"])
        .assert()
        .success();

    assert!(tmp.path().join("batch").join("certificate_Jane Doe.pdf").is_file());
}
