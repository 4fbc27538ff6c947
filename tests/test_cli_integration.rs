//! CLI Integration Tests for fib2tem
//!
//! These tests execute the binary and verify correct behavior for:
//! - The calc command and its output formats
//! - Selection validation (conflicting / missing choices)
//! - Config file defaults
//! - Lookup table and batch mode

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Command with no config lookup side effects from the user's machine
fn fib2tem(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fib2tem").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("HOME", dir.path())
        .env_remove("FIB2TEM_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// calc
// ============================================================================

#[test]
fn test_calc_normal_load() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--lamellae", "bottom-right"])
        .args(["--shuttle", "45", "--milling-angle", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Results:"))
        .stdout(predicate::str::contains("1. Cassette Notch Direction: Right"))
        .stdout(predicate::str::contains("2. Krios Stage Notch Direction: Down"))
        .stdout(predicate::str::contains("3. Krios Stage Tilt Angle: 17.0°"));
}

#[test]
fn test_calc_with_tick_box_flags() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--reverse-load", "--shuttle-35", "--milling-angle", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cassette Notch Direction: Left"))
        .stdout(predicate::str::contains("Krios Stage Notch Direction: Up"))
        .stdout(predicate::str::contains("Krios Stage Tilt Angle: -13.0°"));
}

#[test]
fn test_calc_default_angle_is_ten() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "down-left", "--normal-load", "--shuttle-35"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cassette Notch Direction: Up-Left"))
        .stdout(predicate::str::contains("Krios Stage Tilt Angle: 13.0°"));
}

#[test]
fn test_calc_json_output() {
    let dir = TempDir::new().unwrap();
    let output = fib2tem(&dir)
        .args(["calc", "Down-Left", "--normal-load", "--shuttle", "35"])
        .args(["--milling-angle", "0", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["cassette_notch"], "Up-Left");
    assert_eq!(value["krios_notch"], "Up-Right");
    assert_eq!(value["krios_stage_tilt"], 3.0);
}

#[test]
fn test_calc_markdown_output() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--normal-load", "--shuttle-45", "--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("## Results"))
        .stdout(predicate::str::contains("**3. Krios Stage Tilt Angle:** 17.0°"));
}

// ============================================================================
// Validation errors
// ============================================================================

#[test]
fn test_conflicting_lamellae_selection() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--normal-load", "--reverse-load", "--shuttle-45"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Please select only one lamella location."));
}

#[test]
fn test_conflicting_shuttle_selection() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--normal-load", "--shuttle", "45", "--shuttle-35"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select only one shuttle type."));
}

#[test]
fn test_missing_lamellae_selection() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--shuttle-45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select a lamella location."));
}

#[test]
fn test_missing_shuttle_selection() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--normal-load"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select a shuttle type."));
}

#[test]
fn test_invalid_notch_direction() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "North", "--normal-load", "--shuttle-45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid notch direction: 'North'"));
}

#[test]
fn test_milling_angle_out_of_range() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["calc", "Up", "--normal-load", "--shuttle-45", "--milling-angle", "91"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Milling angle out of range: 91°"));

    fib2tem(&dir)
        .args(["calc", "Up", "--normal-load", "--shuttle-45", "--milling-angle", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Milling angle out of range: -5°"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_local_config_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".fib2tem.json"),
        r#"{"default_shuttle": "35", "default_milling_angle": 20}"#,
    )
    .unwrap();

    fib2tem(&dir)
        .args(["calc", "Left", "--reverse-load"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Krios Stage Tilt Angle: -23.0°"));
}

#[test]
fn test_format_env_var_and_flag_precedence() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .env("FIB2TEM_FORMAT", "json")
        .args(["calc", "Up", "--normal-load", "--shuttle-45"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));

    fib2tem(&dir)
        .env("FIB2TEM_FORMAT", "json")
        .args(["calc", "Up", "--normal-load", "--shuttle-45", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Results:"));
}

#[test]
fn test_malformed_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ nope").unwrap();

    fib2tem(&dir)
        .arg("--config")
        .arg(&path)
        .args(["calc", "Up", "--normal-load", "--shuttle-45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("broken.json"));
}

// ============================================================================
// table / batch
// ============================================================================

#[test]
fn test_table_command() {
    let dir = TempDir::new().unwrap();
    let output = fib2tem(&dir)
        .args(["table", "--shuttle", "35", "--milling-angle", "12"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("35° Shuttle, milling angle 12°"));
    assert_eq!(stdout.lines().count(), 3 + 16);
    assert!(stdout.contains("15.0°"));
    assert!(stdout.contains("-15.0°"));
}

#[test]
fn test_batch_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("requests.jsonl");
    fs::write(
        &path,
        concat!(
            r#"{"notch":"Up","lamellae":"bottom-right","milling_angle":10,"shuttle":"45"}"#,
            "\n",
            r#"{"notch":"Up","lamellae":"top-left","milling_angle":10,"shuttle":"35"}"#,
            "\n",
        ),
    )
    .unwrap();

    fib2tem(&dir)
        .arg("batch")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""line":1"#))
        .stdout(predicate::str::contains(r#""krios_stage_tilt":17.0"#))
        .stdout(predicate::str::contains(r#""krios_stage_tilt":-13.0"#));
}

#[test]
fn test_batch_from_stdin_with_bad_line_fails() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .arg("batch")
        .write_stdin(concat!(
            r#"{"notch":"Up","lamellae":"bottom-right","milling_angle":10,"shuttle":"45"}"#,
            "\n",
            r#"{"notch":"Up","lamellae":"bottom-right","milling_angle":10,"shuttle":"40"}"#,
            "\n",
        ))
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""cassette_notch":"Right""#))
        .stdout(predicate::str::contains("Invalid shuttle type: '40'"));
}

#[test]
fn test_batch_missing_file() {
    let dir = TempDir::new().unwrap();
    fib2tem(&dir)
        .args(["batch", "does-not-exist.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open batch file"));
}
