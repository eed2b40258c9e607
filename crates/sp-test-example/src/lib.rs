use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn maps_root() -> PathBuf {
    workspace_root().join("testdata").join("maps")
}

pub fn map_path(group: &str, name: &str) -> PathBuf {
    maps_root().join(group).join(name)
}

/// Documents every policy should accept.
pub fn valid_maps() -> Vec<PathBuf> {
    xml_files(&maps_root().join("valid"))
}

/// Documents that fail to read under every policy.
pub fn invalid_maps() -> Vec<PathBuf> {
    xml_files(&maps_root().join("invalid"))
}

/// Documents that read leniently but carry at least one advisory.
pub fn lenient_maps() -> Vec<PathBuf> {
    xml_files(&maps_root().join("lenient"))
}

pub fn xml_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "xml"))
        .collect::<Vec<_>>();
    files.sort();
    files
}
