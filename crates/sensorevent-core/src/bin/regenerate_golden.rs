use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sensorevent_core::{DecodeConfig, FieldNaming, RecordLayout, get_event_with};
use serde_json::Value;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.json");
        if !input.exists() {
            continue;
        }
        let case = entry.file_name().to_string_lossy().into_owned();
        regenerate_one(&input, &path.join("expected.json"), &config_for(&case))?;
    }

    Ok(())
}

/// Cases prefixed `adafruit_` use the native layout with the addon's keys.
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

fn regenerate_one(input: &Path, output: &Path, config: &DecodeConfig) -> Result<(), String> {
    let text = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|err| format!("invalid JSON in {}: {}", input.display(), err))?;
    let event = get_event_with(&value, config)
        .map_err(|err| format!("decode failed for {}: {}", input.display(), err))?;
    let json = serde_json::to_string(&event)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
