//! Merge command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error, format_ndjson_summary, to_pretty_line};
use fieldset_config::{compose_document, load_document};
use fieldset_domain::ConfigValue;
use fieldset_shared::ErrorEnvelope;
use std::path::{Path, PathBuf};

/// Run the merge command: overlay each overrides document onto the base, in
/// order, and print the result.
pub fn run_merge(
    mode: OutputMode,
    base: &Path,
    overrides: &[PathBuf],
) -> Result<CliOutput, CliError> {
    tracing::info!(base = %base.display(), layers = overrides.len(), "merging documents");

    let merged = match merge_files(base, overrides) {
        Ok(merged) => merged.to_json(),
        Err(error) => {
            return Ok(CliOutput {
                stdout: format_error(mode, &error),
                exit_code: ExitCode::for_envelope(&error),
            });
        },
    };

    let stdout = if mode.is_ndjson() {
        format_ndjson_summary(
            "ok",
            "merge",
            Some(serde_json::json!({ "layers": overrides.len() + 1, "document": merged })),
        )?
    } else if mode.is_json() {
        to_pretty_line(&serde_json::json!({ "status": "ok", "document": merged }))?
    } else {
        to_pretty_line(&merged)?
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}

fn merge_files(base: &Path, overrides: &[PathBuf]) -> Result<ConfigValue, ErrorEnvelope> {
    let mut merged = load_document(base)?;
    for path in overrides {
        let layer = load_document(path)?;
        merged = compose_document(&merged, &layer).map_err(|error| {
            ErrorEnvelope::from(error).with_metadata("path", path.to_string_lossy().to_string())
        })?;
    }
    Ok(merged)
}
