use std::process::Command;

use sp_test_example::{invalid_maps, maps_root, map_path};

fn sp_map() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sp-map"))
}

#[test]
fn check_accepts_valid_samples_strictly() {
    let output = sp_map()
        .arg("check")
        .arg(maps_root().join("valid"))
        .arg("--warnings")
        .arg("die")
        .output()
        .expect("cli should execute");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout:\n{stdout}");
    assert!(stdout.contains("RESULT:OK"));
    assert!(!stdout.contains("RESULT:ERROR"));
}

#[test]
fn check_reports_each_invalid_sample() {
    let output = sp_map()
        .arg("check")
        .arg(maps_root().join("invalid"))
        .output()
        .expect("cli should execute");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("RESULT:ERROR").count(), invalid_maps().len());
    assert!(stdout.contains("ERROR_CODE:SP_XML_SYNTAX"));
    assert!(stdout.contains("ERROR_CATEGORY:unsupported_version"));
}

#[test]
fn check_json_lists_advisories() {
    let output = sp_map()
        .arg("check")
        .arg(map_path("lenient", "deprecated-spellings.xml"))
        .arg("--json")
        .output()
        .expect("cli should execute");
    assert!(output.status.success());
    let reports: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    let advisories = reports[0]["advisories"].as_array().expect("advisories");
    assert!(advisories
        .iter()
        .all(|advisory| advisory["code"] == "SP_DEPRECATED_ATTR"));
    assert_eq!(advisories.len(), 5);
}

#[test]
fn normalize_prints_to_stdout_without_output() {
    let output = sp_map()
        .arg("normalize")
        .arg(map_path("valid", "minimal.xml"))
        .output()
        .expect("cli should execute");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(stdout.contains("rows=\"1\" columns=\"1\""));
}

#[test]
fn missing_input_is_reported_as_io_error() {
    let output = sp_map()
        .arg("normalize")
        .arg(maps_root().join("no-such-map.xml"))
        .output()
        .expect("cli should execute");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ERROR_CODE:SP_IO"));
    assert!(stdout.contains("ERROR_CATEGORY:io"));
}
