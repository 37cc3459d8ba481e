//! Settings loading helpers (env + file + overrides).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::env::{SettingsEnv, apply_env_overrides};
use crate::settings::{Settings, ValidatedSettings};
use fieldset_domain::{ConfigMap, ConfigValue, merge_value};
use fieldset_shared::{ErrorCode, ErrorEnvelope, ResultExt};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFormat {
    Json,
    Toml,
}

/// Load settings from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`SettingsEnv`)
/// - overrides JSON (partial settings, deep-merged)
/// - settings JSON (file content)
/// - defaults (`Settings::default()`)
pub fn load_settings_from_sources(
    settings_json: Option<&str>,
    overrides_json: Option<&str>,
    env: &SettingsEnv,
) -> Result<ValidatedSettings, ErrorEnvelope> {
    let base = match settings_json {
        None => ConfigValue::Object(ConfigMap::new()),
        Some(input) => parse_settings_value(input, SettingsFormat::Json)?,
    };

    let settings = merge_overrides(base, overrides_json)?;

    // env is applied last and also validates/normalizes the resulting settings.
    apply_env_overrides(settings, env)
}

/// Load settings from an optional file path.
pub fn load_settings_from_path(
    settings_path: Option<&Path>,
    overrides_json: Option<&str>,
    env: &SettingsEnv,
) -> Result<ValidatedSettings, ErrorEnvelope> {
    let base = match settings_path {
        None => ConfigValue::Object(ConfigMap::new()),
        Some(path) => {
            let text = read_text_file(path, "config_file")?;
            let format = detect_settings_format(path)?;
            tracing::debug!(path = %path.display(), ?format, "loading settings file");
            parse_settings_value(&text, format)?
        },
    };

    let settings = merge_overrides(base, overrides_json)?;

    // env is applied last and also validates/normalizes the resulting settings.
    apply_env_overrides(settings, env)
}

/// Load settings from std env and an optional file path.
pub fn load_settings_std_env(
    settings_path: Option<&Path>,
    overrides_json: Option<&str>,
) -> Result<ValidatedSettings, ErrorEnvelope> {
    let env = SettingsEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_settings_from_path(settings_path, overrides_json, &env)
}

/// Serialize settings as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(settings: &Settings) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(settings).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize settings: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize settings as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(settings: &Settings) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(settings).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize settings TOML: {error}"),
        )
    })?;
    output.push('\n');
    Ok(output)
}

fn parse_settings_value(
    input: &str,
    format: SettingsFormat,
) -> Result<ConfigValue, ErrorEnvelope> {
    match format {
        SettingsFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid settings JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        SettingsFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid settings TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn merge_overrides(
    base: ConfigValue,
    overrides_json: Option<&str>,
) -> Result<Settings, ErrorEnvelope> {
    let (merged, source) = match overrides_json {
        None => (base, "config"),
        Some(input) => {
            let overrides = parse_overrides_json(input)?;
            (merge_value(&base, &overrides), "overrides")
        },
    };

    serde_json::from_value(merged.to_json()).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_settings"),
            format!("invalid settings: {error}"),
        )
        .with_metadata("source", source)
    })
}

fn parse_overrides_json(input: &str) -> Result<ConfigValue, ErrorEnvelope> {
    let value: ConfigValue = serde_json::from_str(input)
        .or_expected(ErrorCode::new("config", "invalid_json"), "invalid overrides JSON")
        .map_err(|error| error.with_metadata("source", "overrides"))?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_overrides"),
            format!("overrides must be a mapping, found {}", value.kind_name()),
        )
        .with_metadata("source", "overrides"))
    }
}

/// Read a UTF-8 file, mapping I/O failures to `config:{subject}_*` codes.
pub(crate) fn read_text_file(path: &Path, subject: &str) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::io_failure("config", subject, error.kind()),
            format!("failed to read {}: {error}", subject.replace('_', " ")),
        )
        .with_metadata("path", path.to_string_lossy().to_string())
    })
}

fn detect_settings_format(path: &Path) -> Result<SettingsFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(SettingsFormat::Json),
        Some("toml") => Ok(SettingsFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported settings format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LogFormat, LogLevel};
    use std::error::Error;

    #[test]
    fn defaults_apply_without_sources() -> Result<(), Box<dyn Error>> {
        let settings = load_settings_from_sources(None, None, &SettingsEnv::default())?;
        assert_eq!(settings.as_ref(), &Settings::default());
        Ok(())
    }

    #[test]
    fn overrides_deep_merge_into_nested_sections() -> Result<(), Box<dyn Error>> {
        let settings_json = r#"{ "log": { "level": "warn", "format": "json" } }"#;
        let overrides_json = r#"{ "log": { "level": "debug" } }"#;
        let settings = load_settings_from_sources(
            Some(settings_json),
            Some(overrides_json),
            &SettingsEnv::default(),
        )?;
        assert_eq!(settings.log.level, LogLevel::Debug);
        assert_eq!(settings.log.format, LogFormat::Json, "sibling key survives");
        Ok(())
    }

    #[test]
    fn env_wins_over_overrides() -> Result<(), Box<dyn Error>> {
        let env = SettingsEnv {
            root_path: Some("blocks".into()),
            ..SettingsEnv::default()
        };
        let settings =
            load_settings_from_sources(None, Some(r#"{ "rootPath": "layout" }"#), &env)?;
        assert_eq!(settings.root_path, "blocks");
        Ok(())
    }

    #[test]
    fn malformed_overrides_report_source() -> Result<(), Box<dyn Error>> {
        let error = load_settings_from_sources(
            Some(r#"{ "version": 1 }"#),
            Some(r#"{ "rootPath": }"#),
            &SettingsEnv::default(),
        )
        .err()
        .ok_or_else(|| std::io::Error::other("expected overrides error"))?;
        assert_eq!(error.code, ErrorCode::new("config", "invalid_json"));
        assert_eq!(
            error.metadata.get("source").map(String::as_str),
            Some("overrides")
        );
        Ok(())
    }

    #[test]
    fn non_mapping_overrides_are_rejected() -> Result<(), Box<dyn Error>> {
        let error = load_settings_from_sources(None, Some("[1, 2]"), &SettingsEnv::default())
            .err()
            .ok_or_else(|| std::io::Error::other("expected overrides error"))?;
        assert_eq!(error.code, ErrorCode::new("config", "invalid_overrides"));
        Ok(())
    }

    #[test]
    fn unknown_override_key_is_rejected_after_merge() -> Result<(), Box<dyn Error>> {
        let error = load_settings_from_sources(
            None,
            Some(r#"{ "log": { "colour": true } }"#),
            &SettingsEnv::default(),
        )
        .err()
        .ok_or_else(|| std::io::Error::other("expected settings error"))?;
        assert_eq!(error.code, ErrorCode::new("config", "invalid_settings"));
        Ok(())
    }

    #[test]
    fn missing_file_maps_to_not_found_code() -> Result<(), Box<dyn Error>> {
        let path = Path::new("/definitely/not/here/fieldset.toml");
        let error = load_settings_from_path(Some(path), None, &SettingsEnv::default())
            .err()
            .ok_or_else(|| std::io::Error::other("expected read error"))?;
        assert_eq!(
            error.code,
            ErrorCode::new("config", "config_file_not_found")
        );
        assert_eq!(
            error.metadata.get("path").map(String::as_str),
            Some("/definitely/not/here/fieldset.toml")
        );
        Ok(())
    }

    #[test]
    fn serialization_is_deterministic() -> Result<(), Box<dyn Error>> {
        let settings = load_settings_from_sources(None, None, &SettingsEnv::default())?;
        let first = to_pretty_json(&settings)?;
        let second = to_pretty_json(&settings)?;
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
        assert!(to_pretty_toml(&settings)?.contains("rootPath = \"fields\""));
        Ok(())
    }
}
