use std::fmt::Display;

use sp_api::ErrorCategory;
use sp_core::MapReadError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CliError {
    pub(crate) code: String,
    pub(crate) category: Option<ErrorCategory>,
    pub(crate) message: String,
}

impl CliError {
    pub(crate) fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            category: None,
            message: message.into(),
        }
    }
}

impl From<MapReadError> for CliError {
    fn from(error: MapReadError) -> Self {
        Self {
            code: error.code().to_string(),
            category: Some(error.category()),
            message: error.to_string(),
        }
    }
}

fn map_error(code: &str, error: impl Display) -> CliError {
    CliError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CliError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    if let Some(category) = error.category {
        println!("ERROR_CATEGORY:{}", category_name(category));
    }
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
    );
    1
}

pub(crate) fn category_name(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Malformed => "malformed",
        ErrorCategory::Io => "io",
        ErrorCategory::UnsupportedVersion => "unsupported_version",
    }
}

pub(crate) fn map_cli_source_scan(error: walkdir::Error) -> CliError {
    map_error("CLI_SOURCE_SCAN", error)
}

pub(crate) fn map_cli_output_write(error: std::io::Error) -> CliError {
    map_error("CLI_OUTPUT_WRITE", error)
}

pub(crate) fn map_cli_report_json(error: serde_json::Error) -> CliError {
    map_error("CLI_REPORT_JSON", error)
}
