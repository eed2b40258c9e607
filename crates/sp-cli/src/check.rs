use std::path::Path;

use serde::Serialize;
use sp_api::{read_map_file, FormatError, ReadOptions};

use crate::{category_name, collect_map_files, map_cli_report_json, CheckArgs, CliError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdvisoryReport {
    pub(crate) code: &'static str,
    pub(crate) line: usize,
    pub(crate) message: String,
}

impl From<&FormatError> for AdvisoryReport {
    fn from(issue: &FormatError) -> Self {
        Self {
            code: issue.code(),
            line: issue.line(),
            message: issue.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileReport {
    pub(crate) path: String,
    pub(crate) ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<String>,
    pub(crate) advisories: Vec<AdvisoryReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) notes: Vec<String>,
}

pub(crate) fn check_file(path: &Path, options: &ReadOptions) -> FileReport {
    let display = path.display().to_string();
    match read_map_file(path, options) {
        Ok(outcome) => FileReport {
            path: display,
            ok: true,
            code: None,
            category: None,
            message: None,
            advisories: outcome.advisories.iter().map(AdvisoryReport::from).collect(),
            notes: outcome.notes.into_iter().map(|note| note.text).collect(),
        },
        Err(error) => FileReport {
            path: display,
            ok: false,
            code: Some(error.code()),
            category: Some(category_name(error.category())),
            message: Some(error.to_string()),
            advisories: Vec::new(),
            notes: Vec::new(),
        },
    }
}

pub(crate) fn run_check(args: CheckArgs) -> Result<i32, CliError> {
    let files = collect_map_files(&args.paths)?;
    let options = ReadOptions {
        policy: args.warnings.into(),
    };
    let reports = files
        .iter()
        .map(|path| check_file(path, &options))
        .collect::<Vec<_>>();

    if args.json {
        let payload = serde_json::to_string_pretty(&reports).map_err(map_cli_report_json)?;
        println!("{}", payload);
    } else {
        for report in &reports {
            emit_report(report);
        }
    }

    let failed = reports.iter().filter(|report| !report.ok).count();
    Ok(if failed == 0 { 0 } else { 1 })
}

fn emit_report(report: &FileReport) {
    println!("FILE:{}", report.path);
    if report.ok {
        println!("RESULT:OK");
    } else {
        println!("RESULT:ERROR");
    }
    if let Some(code) = report.code {
        println!("ERROR_CODE:{}", code);
    }
    if let Some(category) = report.category {
        println!("ERROR_CATEGORY:{}", category);
    }
    if let Some(message) = &report.message {
        println!(
            "ERROR_MSG_JSON:{}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string())
        );
    }
    for advisory in &report.advisories {
        println!(
            "ADVISORY:{}|{}|{}",
            advisory.code,
            advisory.line,
            serde_json::to_string(&advisory.message).unwrap_or_else(|_| "\"\"".to_string())
        );
    }
    for note in &report.notes {
        println!(
            "NOTE:{}",
            serde_json::to_string(note).unwrap_or_else(|_| "\"\"".to_string())
        );
    }
}
