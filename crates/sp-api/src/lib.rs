use std::fs;
use std::io;
use std::path::Path;

use sp_core::{Map, MapReadError, TileFixture};
use tracing::{debug, info};

pub use sp_core::{ErrorCategory, FormatError};
pub use sp_io::{MapReadOutcome, ReadOutcome, WarningPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub policy: WarningPolicy,
}

impl ReadOptions {
    pub fn strict() -> Self {
        Self {
            policy: WarningPolicy::Die,
        }
    }
}

pub fn read_map_from_str(
    source: &str,
    options: &ReadOptions,
) -> Result<MapReadOutcome, MapReadError> {
    sp_io::read_map(source, options.policy)
}

pub fn read_fixture_from_str(
    source: &str,
    options: &ReadOptions,
) -> Result<ReadOutcome<TileFixture>, MapReadError> {
    sp_io::read_fixture(source, options.policy)
}

pub fn read_map_file(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<MapReadOutcome, MapReadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), policy = ?options.policy, "reading map file");
    let source = fs::read_to_string(path)?;
    let outcome = read_map_from_str(&source, options)?;
    info!(
        path = %path.display(),
        advisories = outcome.advisories.len(),
        "read map file"
    );
    Ok(outcome)
}

pub fn write_map_to_string(map: &Map) -> String {
    sp_io::write_map(map)
}

pub fn write_map_file(path: impl AsRef<Path>, map: &Map) -> io::Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), "writing map file");
    fs::write(path, write_map_to_string(map))
}

/// Reads `input` and writes its normalized form to `output`.
pub fn normalize_map_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<MapReadOutcome, MapReadError> {
    let outcome = read_map_file(input, options)?;
    write_map_file(output, &outcome.value)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::Point;

    #[test]
    fn default_options_warn() {
        assert_eq!(ReadOptions::default().policy, WarningPolicy::Warn);
        assert_eq!(ReadOptions::strict().policy, WarningPolicy::Die);
    }

    #[test]
    fn read_map_from_str_applies_policy() {
        let source = r#"<map version="2" rows="1" columns="1"><tile row="0" column="0" kind="plains"><hill/></tile></map>"#;
        let outcome = read_map_from_str(source, &ReadOptions::default()).expect("lenient read");
        assert_eq!(outcome.advisories.len(), 1);
        assert_eq!(outcome.value.fixtures(Point::new(0, 0)).len(), 1);

        let error = read_map_from_str(source, &ReadOptions::strict()).expect_err("strict read");
        assert!(error.is_escalated());
    }

    #[test]
    fn read_fixture_from_str_reads_single_element() {
        let outcome = read_fixture_from_str(r#"<cave dc="3" id="2"/>"#, &ReadOptions::strict())
            .expect("cave");
        assert_eq!(outcome.value.id(), Some(2));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = read_map_file("/definitely/not/here.xml", &ReadOptions::default())
            .expect_err("missing file");
        assert_eq!(error.category(), ErrorCategory::Io);
        assert_eq!(error.code(), "SP_IO");
    }
}
