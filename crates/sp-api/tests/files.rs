use std::fs;
use std::path::PathBuf;

use sp_api::{
    normalize_map_file, read_map_file, write_map_file, ErrorCategory, ReadOptions, WarningPolicy,
};
use sp_test_example::{map_path, valid_maps, workspace_root};

fn scratch_file(name: &str) -> PathBuf {
    let dir = workspace_root().join("target").join("sp-api-tests");
    fs::create_dir_all(&dir).expect("scratch dir");
    dir.join(name)
}

#[test]
fn valid_samples_read_from_disk() {
    for path in valid_maps() {
        let outcome = read_map_file(&path, &ReadOptions::strict())
            .unwrap_or_else(|error| panic!("{}: {error}", path.display()));
        assert!(outcome.advisories.is_empty());
    }
}

#[test]
fn normalized_file_reads_back_equal() {
    let input = map_path("lenient", "deprecated-spellings.xml");
    let output = scratch_file("deprecated-spellings.normalized.xml");
    let outcome = normalize_map_file(&input, &output, &ReadOptions::default()).expect("normalize");
    assert!(!outcome.advisories.is_empty());

    let reread = read_map_file(&output, &ReadOptions::strict()).expect("normalized is clean");
    assert!(reread.advisories.is_empty());
    assert_eq!(reread.value, outcome.value);
}

#[test]
fn write_map_file_overwrites_output() {
    let source = read_map_file(map_path("valid", "frontier.xml"), &ReadOptions::default())
        .expect("frontier");
    let output = scratch_file("frontier.xml");
    write_map_file(&output, &source.value).expect("first write");
    write_map_file(&output, &source.value).expect("second write");
    let written = fs::read_to_string(&output).expect("written file");
    assert!(written.starts_with("<?xml"));
    assert_eq!(written.matches("<map ").count(), 1);
}

#[test]
fn unsupported_version_is_its_own_category() {
    let error = read_map_file(
        map_path("invalid", "old-version.xml"),
        &ReadOptions {
            policy: WarningPolicy::Ignore,
        },
    )
    .expect_err("version 1");
    assert_eq!(error.category(), ErrorCategory::UnsupportedVersion);
}
