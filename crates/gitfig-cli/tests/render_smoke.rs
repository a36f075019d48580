use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("fixtures").join(name)
}

#[test]
fn cli_renders_svg_to_explicit_out_path() {
    let config = fixture("clone_basic.json");
    assert!(config.exists(), "fixture missing: {}", config.display());

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("diagram.svg");

    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    let assert = Command::new(exe)
        .args([
            "render",
            "--config",
            config.to_string_lossy().as_ref(),
            "--out",
            out.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.starts_with("Wrote "), "unexpected stdout: {stdout:?}");

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn cli_creates_default_out_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::copy(
        fixture("clone_basic.json"),
        tmp.path().join("git_diagram_config.json"),
    )
    .expect("copy fixture");

    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    Command::new(exe)
        .current_dir(tmp.path())
        .assert()
        .success();

    let out = tmp.path().join("out").join("git_clone_diagram.svg");
    assert!(out.exists(), "default output missing: {}", out.display());
}

#[test]
fn cli_prints_layout_json() {
    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    let assert = Command::new(exe)
        .args([
            "layout",
            "--config",
            fixture("clone_third_repo.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).expect("layout json");
    assert_eq!(value["repos"].as_array().map(|r| r.len()), Some(3));
    assert!(value["width"].as_f64().unwrap_or_default() > 0.0);
}

#[test]
fn cli_fails_fast_on_missing_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    let assert = Command::new(exe)
        .current_dir(tmp.path())
        .args(["render", "--config", "nope.json"])
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8");
    assert!(
        stderr.contains("cannot read config file"),
        "unexpected stderr: {stderr:?}"
    );

    assert!(
        !tmp.path().join("out").exists(),
        "no output may be produced on failure"
    );
}

#[test]
fn cli_help_exits_zero() {
    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    let assert = Command::new(exe).arg("--help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert!(stdout.contains("USAGE:"), "unexpected stdout: {stdout:?}");
}

#[test]
fn cli_rejects_flags_of_the_other_command() {
    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    Command::new(exe)
        .args(["layout", "--out", "diagram.svg"])
        .assert()
        .failure()
        .code(2);

    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    Command::new(exe)
        .args(["render", "--pretty"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn cli_rejects_unknown_flags() {
    let exe = assert_cmd::cargo_bin!("gitfig-cli");
    Command::new(exe)
        .args(["render", "--bogus"])
        .assert()
        .failure()
        .code(2);
}
