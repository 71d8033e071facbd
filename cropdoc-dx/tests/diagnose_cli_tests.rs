//! Tests for the `diagnose` binary

mod helpers;

use helpers::*;
use serde_json::Value;
use std::process::Command;

fn diagnose() -> Command {
    Command::new(env!("CARGO_BIN_EXE_diagnose"))
}

#[test]
fn prints_result_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rice_field.png");
    std::fs::write(&path, encode_png(&striped(224, &BLIGHTED_BANDS))).unwrap();

    let output = diagnose().arg(&path).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "diseased");
    // Hint from the file name favors the rice entries
    assert_eq!(json["crop"], "rice");
    assert_eq!(json["disease"], "Rice Blast");
    assert!(json.get("features").is_none());
}

#[test]
fn explicit_crop_and_features() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaf.png");
    std::fs::write(&path, encode_png(&solid(100, 100, GREEN))).unwrap();

    let output = diagnose()
        .arg(&path)
        .args(["--crop", "maize", "--features"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"]["status"], "healthy");
    assert_eq!(json["features"]["green_pixel_ratio"], 1.0);
}

#[test]
fn non_image_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not an image").unwrap();

    let output = diagnose().arg(&path).output().unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
