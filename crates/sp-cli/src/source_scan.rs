use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{map_cli_source_scan, CliError};

/// Expands `paths` into the map files to check. Files are taken as given;
/// directories contribute every `.xml` file beneath them, sorted.
pub(crate) fn collect_map_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.is_dir() {
            return Err(CliError::new(
                "CLI_SOURCE_NOT_FOUND",
                format!("path does not exist: {}", path.display()),
            ));
        }
        let mut found = scan_dir(path)?;
        if found.is_empty() {
            return Err(CliError::new(
                "CLI_SOURCE_EMPTY",
                format!("No .xml files under {}", path.display()),
            ));
        }
        files.append(&mut found);
    }
    Ok(files)
}

fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(map_cli_source_scan)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == "xml") {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
