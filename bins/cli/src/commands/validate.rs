//! Validate command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_ndjson_summary, to_ndjson_line, to_pretty_line};
use fieldset_config::{document_fields, load_document};
use fieldset_domain::Diagnostic;
use fieldset_schema::{ValidatedFields, ValidationFailure, Validator};
use fieldset_shared::ErrorEnvelope;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Outcome for one document.
#[derive(Debug)]
enum FileReport {
    Valid(ValidatedFields),
    Invalid(ValidationFailure),
    Unreadable(ErrorEnvelope),
}

impl FileReport {
    const fn status(&self) -> &'static str {
        match self {
            Self::Valid(_) => "ok",
            Self::Invalid(_) => "invalid",
            Self::Unreadable(_) => "error",
        }
    }

    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Valid(_) => ExitCode::Ok,
            Self::Invalid(_) => ExitCode::InvalidInput,
            Self::Unreadable(error) => ExitCode::for_envelope(error),
        }
    }

    fn warnings(&self) -> &[Diagnostic] {
        match self {
            Self::Valid(validated) => &validated.warnings,
            Self::Invalid(failure) => &failure.warnings,
            Self::Unreadable(_) => &[],
        }
    }

    fn errors(&self) -> &[Diagnostic] {
        match self {
            Self::Invalid(failure) => &failure.errors,
            Self::Valid(_) | Self::Unreadable(_) => &[],
        }
    }

    const fn nodes_visited(&self) -> usize {
        match self {
            Self::Valid(validated) => validated.nodes_visited,
            Self::Invalid(failure) => failure.nodes_visited,
            Self::Unreadable(_) => 0,
        }
    }
}

/// Run the validate command over every path, in parallel.
///
/// Reports keep the order of `paths`. The exit code is `Io` when any file
/// could not be read, `InvalidInput` when any file failed validation.
pub fn run_validate(
    mode: OutputMode,
    validator: &Validator,
    paths: &[PathBuf],
) -> Result<CliOutput, CliError> {
    tracing::info!(files = paths.len(), "validating documents");

    let reports: Vec<FileReport> = paths
        .par_iter()
        .map(|path| check_file(validator, path))
        .collect();

    let failed = reports
        .iter()
        .filter(|report| !matches!(report, FileReport::Valid(_)))
        .count();
    let exit_code = overall_exit_code(&reports);
    tracing::info!(files = reports.len(), failed, "validation finished");

    let stdout = if mode.is_ndjson() {
        format_validate_ndjson(paths, &reports, failed)?
    } else if mode.is_json() {
        format_validate_json(paths, &reports)?
    } else {
        format_validate_text(paths, &reports, failed)
    };

    Ok(CliOutput { stdout, exit_code })
}

fn check_file(validator: &Validator, path: &Path) -> FileReport {
    let document = match load_document(path) {
        Ok(document) => document,
        Err(error) => return FileReport::Unreadable(error),
    };
    let fields = match document_fields(&document) {
        Ok(fields) => fields,
        Err(error) => {
            return FileReport::Unreadable(
                ErrorEnvelope::from(error)
                    .with_metadata("path", path.to_string_lossy().to_string()),
            );
        },
    };

    match validator.validate(fields) {
        Ok(validated) => FileReport::Valid(validated),
        Err(failure) => FileReport::Invalid(failure),
    }
}

fn overall_exit_code(reports: &[FileReport]) -> ExitCode {
    let codes: Vec<ExitCode> = reports.iter().map(FileReport::exit_code).collect();
    if codes.contains(&ExitCode::Io) {
        ExitCode::Io
    } else if codes.contains(&ExitCode::Internal) {
        ExitCode::Internal
    } else if codes.contains(&ExitCode::InvalidInput) {
        ExitCode::InvalidInput
    } else {
        ExitCode::Ok
    }
}

fn report_json(path: &Path, report: &FileReport) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "path": path.to_string_lossy(),
        "status": report.status(),
        "nodesVisited": report.nodes_visited(),
        "errors": report.errors(),
        "warnings": report.warnings(),
    });
    if let (FileReport::Unreadable(error), Some(map)) = (report, payload.as_object_mut()) {
        map.insert("error".to_string(), serde_json::json!(error));
    }
    payload
}

fn format_validate_json(paths: &[PathBuf], reports: &[FileReport]) -> Result<String, CliError> {
    let status = if reports.iter().all(|report| matches!(report, FileReport::Valid(_))) {
        "ok"
    } else {
        "error"
    };
    let files: Vec<serde_json::Value> = paths
        .iter()
        .zip(reports)
        .map(|(path, report)| report_json(path, report))
        .collect();
    let payload = serde_json::json!({ "status": status, "files": files });
    Ok(to_pretty_line(&payload)?)
}

fn format_validate_ndjson(
    paths: &[PathBuf],
    reports: &[FileReport],
    failed: usize,
) -> Result<String, CliError> {
    let mut out = String::new();
    for (path, report) in paths.iter().zip(reports) {
        let mut record = report_json(path, report);
        if let Some(map) = record.as_object_mut() {
            map.insert("type".to_string(), "file".into());
        }
        out.push_str(&to_ndjson_line(&record)?);
    }
    let status = if failed == 0 { "ok" } else { "error" };
    out.push_str(&format_ndjson_summary(
        status,
        "validate",
        Some(serde_json::json!({ "files": reports.len(), "failed": failed })),
    )?);
    Ok(out)
}

fn format_validate_text(paths: &[PathBuf], reports: &[FileReport], failed: usize) -> String {
    let status = if failed == 0 { "ok" } else { "error" };
    let mut out = format!("status: {status}\nfiles: {}\nfailed: {failed}\n", reports.len());
    for (path, report) in paths.iter().zip(reports) {
        out.push_str(&format!("\n{}: {}\n", path.display(), report.status()));
        match report {
            FileReport::Valid(validated) => {
                out.push_str(&format!(
                    "  fields: {}\n  nodes: {}\n",
                    validated.len(),
                    validated.nodes_visited
                ));
            },
            FileReport::Invalid(failure) => {
                out.push_str(&format!("  nodes: {}\n", failure.nodes_visited));
            },
            FileReport::Unreadable(error) => {
                out.push_str(&format!("  {}: {}\n", error.code, error.message));
            },
        }
        for diagnostic in report.errors().iter().chain(report.warnings()) {
            out.push_str(&format!("  {diagnostic}\n"));
        }
    }
    out
}
