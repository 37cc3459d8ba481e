//! Forms command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error, format_ndjson_summary, to_pretty_line};
use fieldset_config::load_document;
use fieldset_domain::Diagnostic;
use fieldset_forms::{FormBuilderOptions, FormsError, forms_collection, validate_forms_collection};
use fieldset_schema::{ValidatedFields, Validator};
use fieldset_shared::ErrorEnvelope;
use std::path::Path;

/// Run the forms command: build the collection, validate it, print it.
///
/// The collection is printed even when it fails validation so the offending
/// paths can be looked up.
pub fn run_forms(
    mode: OutputMode,
    validator: &Validator,
    options_path: Option<&Path>,
) -> Result<CliOutput, CliError> {
    let options = match load_options(options_path) {
        Ok(options) => options,
        Err(error) => {
            return Ok(CliOutput {
                stdout: format_error(mode, &error),
                exit_code: ExitCode::for_envelope(&error),
            });
        },
    };

    let collection = forms_collection(&options);
    let report = FormsReport::from_result(validate_forms_collection(&collection, validator));
    let collection = collection.to_json();
    tracing::info!(status = report.status, "generated forms collection");

    let stdout = if mode.is_ndjson() {
        let mut extra = serde_json::json!({ "collection": collection });
        report.extend_json(&mut extra);
        format_ndjson_summary(report.status, "forms", Some(extra))?
    } else if mode.is_json() {
        let mut payload = serde_json::json!({ "status": report.status, "collection": collection });
        report.extend_json(&mut payload);
        to_pretty_line(&payload)?
    } else {
        format_forms_text(&collection, &report)?
    };

    Ok(CliOutput {
        stdout,
        exit_code: report.exit_code,
    })
}

#[derive(Debug)]
struct FormsReport {
    status: &'static str,
    exit_code: ExitCode,
    fields: Option<usize>,
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
    error: Option<ErrorEnvelope>,
}

impl FormsReport {
    fn from_result(result: Result<ValidatedFields, FormsError>) -> Self {
        match result {
            Ok(validated) => Self {
                status: "ok",
                exit_code: ExitCode::Ok,
                fields: Some(validated.len()),
                errors: Vec::new(),
                warnings: validated.warnings,
                error: None,
            },
            Err(FormsError::Invalid(failure)) => Self {
                status: "error",
                exit_code: ExitCode::InvalidInput,
                fields: None,
                errors: failure.errors,
                warnings: failure.warnings,
                error: None,
            },
            Err(other) => {
                let error = ErrorEnvelope::from(other);
                Self {
                    status: "error",
                    exit_code: ExitCode::for_envelope(&error),
                    fields: None,
                    errors: Vec::new(),
                    warnings: Vec::new(),
                    error: Some(error),
                }
            },
        }
    }

    fn extend_json(&self, target: &mut serde_json::Value) {
        let Some(map) = target.as_object_mut() else {
            return;
        };
        map.insert("errors".to_string(), serde_json::json!(self.errors));
        map.insert("warnings".to_string(), serde_json::json!(self.warnings));
        if let Some(error) = &self.error {
            map.insert("error".to_string(), serde_json::json!(error));
        }
    }
}

fn load_options(path: Option<&Path>) -> Result<FormBuilderOptions, ErrorEnvelope> {
    let Some(path) = path else {
        return Ok(FormBuilderOptions::default());
    };
    let document = load_document(path)?;
    FormBuilderOptions::from_value(&document).map_err(|error| {
        ErrorEnvelope::from(error).with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn format_forms_text(
    collection: &serde_json::Value,
    report: &FormsReport,
) -> Result<String, CliError> {
    let mut out = to_pretty_line(collection)?;
    out.push_str(&format!("\nstatus: {}\n", report.status));
    if let Some(fields) = report.fields {
        out.push_str(&format!("fields: {fields}\n"));
    }
    if let Some(error) = &report.error {
        out.push_str(&format!("code: {}\nmessage: {}\n", error.code, error.message));
    }
    for diagnostic in report.errors.iter().chain(&report.warnings) {
        out.push_str(&format!("  {diagnostic}\n"));
    }
    Ok(out)
}
