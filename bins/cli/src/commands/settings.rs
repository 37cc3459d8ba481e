//! Settings command handlers.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, format_error, format_ndjson_summary, to_pretty_line};
use clap::ValueEnum;
use fieldset_config::{ValidatedSettings, settings_schema, to_pretty_json, to_pretty_toml};
use std::path::Path;

/// Encoding for `settings show` in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingsEncoding {
    /// Pretty JSON.
    Json,
    /// Pretty TOML.
    Toml,
}

/// Print the effective settings after every layer has been applied.
pub fn run_settings_show(
    mode: OutputMode,
    settings: &ValidatedSettings,
    settings_path: Option<&Path>,
    encoding: SettingsEncoding,
) -> Result<CliOutput, CliError> {
    tracing::info!("settings show");
    let effective = serde_json::to_value(settings.as_ref())?;
    let path = settings_path.map(|path| path.to_string_lossy().to_string());

    let stdout = if mode.is_ndjson() {
        format_ndjson_summary(
            "ok",
            "settings",
            Some(serde_json::json!({ "settingsPath": path, "effectiveSettings": effective })),
        )?
    } else if mode.is_json() {
        to_pretty_line(&serde_json::json!({
            "status": "ok",
            "settingsPath": path,
            "effectiveSettings": effective,
        }))?
    } else {
        let rendered = match encoding {
            SettingsEncoding::Json => to_pretty_json(settings.as_ref()),
            SettingsEncoding::Toml => to_pretty_toml(settings.as_ref()),
        };
        match rendered {
            Ok(rendered) => rendered,
            Err(error) => {
                return Ok(CliOutput {
                    stdout: format_error(mode, &error),
                    exit_code: ExitCode::for_envelope(&error),
                });
            },
        }
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}

/// Print the JSON Schema of the settings document.
pub fn run_settings_schema(mode: OutputMode) -> Result<CliOutput, CliError> {
    let schema = serde_json::to_value(settings_schema())?;

    let stdout = if mode.is_ndjson() {
        format_ndjson_summary("ok", "settings_schema", Some(serde_json::json!({ "schema": schema })))?
    } else {
        to_pretty_line(&schema)?
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}
