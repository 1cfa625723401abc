use std::fs;
use std::path::{Path, PathBuf};

use sensorevent_core::{DecodeConfig, FieldNaming, RecordLayout, get_event_with};
use serde_json::Value;

fn golden_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
}

fn load_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read fixture");
    serde_json::from_str(&text).expect("parse fixture")
}

fn config_for(case: &str) -> DecodeConfig {
    if case.starts_with("adafruit_") {
        DecodeConfig {
            layout: RecordLayout::ADAFRUIT,
            naming: FieldNaming::Legacy,
            ..DecodeConfig::default()
        }
    } else {
        DecodeConfig::default()
    }
}

fn run_golden(case: &str) {
    let dir = golden_root().join(case);
    let input = load_json(&dir.join("input.json"));
    let expected = load_json(&dir.join("expected.json"));

    let actual = get_event_with(&input, &config_for(case)).expect("decode fixture");

    assert_eq!(actual, expected, "golden mismatch in {case}");
}

#[test]
fn golden_zeros() {
    run_golden("zeros");
}

#[test]
fn golden_accelerometer() {
    run_golden("accelerometer");
}

#[test]
fn golden_gravity() {
    run_golden("gravity");
}

#[test]
fn golden_rotation_vector() {
    run_golden("rotation_vector");
}

#[test]
fn golden_color() {
    run_golden("color");
}

#[test]
fn golden_ambient_temperature() {
    run_golden("ambient_temperature");
}

#[test]
fn golden_proximity() {
    run_golden("proximity");
}

#[test]
fn golden_text_padded() {
    run_golden("text_padded");
}

#[test]
fn golden_adafruit_gyroscope() {
    run_golden("adafruit_gyroscope");
}

#[test]
fn golden_accelerometer_and_gravity_share_payload() {
    let accel = load_json(&golden_root().join("accelerometer").join("expected.json"));
    let gravity = load_json(&golden_root().join("gravity").join("expected.json"));
    assert_eq!(accel["acceleration"], gravity["acceleration"]);
    assert_ne!(accel["type"], gravity["type"]);
}

#[test]
fn golden_binary_matches_json_input() {
    for case in ["accelerometer", "adafruit_gyroscope"] {
        let dir = golden_root().join(case);
        let raw = fs::read(dir.join("input.bin")).expect("read input.bin");
        let json = load_json(&dir.join("input.json"));
        let bytes: Vec<u8> = json
            .as_array()
            .expect("byte array")
            .iter()
            .map(|b| b.as_u64().expect("byte") as u8)
            .collect();
        assert_eq!(raw, bytes, "{case}");
    }
}
