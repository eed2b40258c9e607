use super::*;
use sp_api::ReadOptions;
use sp_test_example::{map_path, maps_root};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("sp-map-{}-{}", name, nanos))
}

#[test]
fn cli_parses_check_defaults() {
    let cli = Cli::try_parse_from(["sp-map", "check", "a.xml", "maps"]).expect("parse");
    let Mode::Check(args) = cli.command else {
        panic!("expected check");
    };
    assert_eq!(args.paths, vec![PathBuf::from("a.xml"), PathBuf::from("maps")]);
    assert_eq!(args.warnings, PolicyArg::Warn);
    assert!(!args.json);
}

#[test]
fn cli_parses_normalize_with_policy() {
    let cli = Cli::try_parse_from([
        "sp-map",
        "normalize",
        "in.xml",
        "--output",
        "out.xml",
        "--warnings",
        "die",
    ])
    .expect("parse");
    let Mode::Normalize(args) = cli.command else {
        panic!("expected normalize");
    };
    assert_eq!(args.output, Some(PathBuf::from("out.xml")));
    assert_eq!(
        sp_api::WarningPolicy::from(args.warnings),
        sp_api::WarningPolicy::Die
    );
}

#[test]
fn check_requires_a_path_and_known_policy() {
    assert!(Cli::try_parse_from(["sp-map", "check"]).is_err());
    assert!(Cli::try_parse_from(["sp-map", "check", "x.xml", "--warnings", "loud"]).is_err());
    assert_ne!(run_cli_from_args(["sp-map", "check"]), 0);
}

#[test]
fn collect_map_files_walks_directories_in_order() {
    let files = collect_map_files(&[maps_root().join("valid")]).expect("scan");
    assert!(files.len() >= 3);
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
    assert!(files.iter().all(|path| path.extension().is_some_and(|ext| ext == "xml")));
}

#[test]
fn collect_map_files_rejects_missing_and_empty_paths() {
    let missing = collect_map_files(&[temp_path("missing")]).expect_err("missing");
    assert_eq!(missing.code, "CLI_SOURCE_NOT_FOUND");

    let empty = temp_path("empty-dir");
    fs::create_dir_all(&empty).expect("dir");
    let error = collect_map_files(&[empty]).expect_err("empty");
    assert_eq!(error.code, "CLI_SOURCE_EMPTY");
}

#[test]
fn check_file_reports_advisories_and_failures() {
    let lenient = check_file(
        &map_path("lenient", "missing-ids.xml"),
        &ReadOptions::default(),
    );
    assert!(lenient.ok);
    assert!(lenient
        .advisories
        .iter()
        .any(|advisory| advisory.code == "SP_MISSING_RECOMMENDED_ATTR"));

    let strict = check_file(&map_path("lenient", "missing-ids.xml"), &ReadOptions::strict());
    assert!(!strict.ok);
    assert_eq!(strict.code, Some("SP_MISSING_RECOMMENDED_ATTR"));
    assert_eq!(strict.category, Some("malformed"));

    let old = check_file(&map_path("invalid", "old-version.xml"), &ReadOptions::default());
    assert_eq!(old.category, Some("unsupported_version"));
}

#[test]
fn check_file_lists_text_found_outside_tiles() {
    let path = temp_path("loose-text.xml");
    fs::write(
        &path,
        r#"<map version="2" rows="1" columns="1"><player number="1" code_name="one"/>stray words</map>"#,
    )
    .expect("write map");
    let report = check_file(&path, &ReadOptions::default());
    assert!(report.ok);
    assert_eq!(report.notes, vec!["stray words".to_string()]);
    assert_eq!(report.advisories[0].code, "SP_UNWANTED_TEXT");
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["notes"], serde_json::json!(["stray words"]));
    let _ = fs::remove_file(path);
}

#[test]
fn file_report_serializes_without_empty_fields() {
    let report = check_file(&map_path("valid", "minimal.xml"), &ReadOptions::strict());
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["ok"], serde_json::Value::Bool(true));
    assert!(json.get("code").is_none());
    assert!(json.get("notes").is_none());
    assert_eq!(json["advisories"], serde_json::json!([]));
}

#[test]
fn run_check_exit_code_follows_results() {
    let ok = run_check(CheckArgs {
        paths: vec![maps_root().join("valid")],
        warnings: PolicyArg::Die,
        json: false,
    })
    .expect("check");
    assert_eq!(ok, 0);

    let failed = run_check(CheckArgs {
        paths: vec![maps_root().join("invalid")],
        warnings: PolicyArg::Ignore,
        json: true,
    })
    .expect("check");
    assert_eq!(failed, 1);
}

#[test]
fn run_normalize_writes_clean_output() {
    let output = temp_path("normalized.xml");
    let code = run_normalize(NormalizeArgs {
        input: map_path("lenient", "future-tags.xml"),
        output: Some(output.clone()),
        warnings: PolicyArg::Warn,
    })
    .expect("normalize");
    assert_eq!(code, 0);
    let reread = sp_api::read_map_file(&output, &ReadOptions::strict()).expect("clean output");
    assert!(reread.advisories.is_empty());
}

#[test]
fn run_normalize_surfaces_read_errors() {
    let error = run_normalize(NormalizeArgs {
        input: map_path("invalid", "missing-rows.xml"),
        output: Some(temp_path("never-written.xml")),
        warnings: PolicyArg::Warn,
    })
    .expect_err("invalid input");
    assert_eq!(error.code, "SP_MISSING_ATTR");
    assert_eq!(error.category, Some(sp_api::ErrorCategory::Malformed));
}
