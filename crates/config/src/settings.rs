//! Validator settings schema, defaults, validation, and normalization.
//!
//! Settings are deserialized with `serde` (JSON or TOML), validated by hand,
//! and mapped to `ErrorEnvelope`s with `config:*` codes.

use fieldset_schema::{DEFAULT_ROOT_PATH, ValidatorOptions};
use fieldset_shared::{ErrorCode, ErrorEnvelope};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current supported settings schema version.
pub const CURRENT_SETTINGS_VERSION: u32 = 1;

/// Top-level validator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Settings {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Name of the root list in diagnostic paths.
    pub root_path: String,
    /// Report deprecated attributes as errors.
    pub strict_deprecations: bool,
    /// Log output settings.
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_SETTINGS_VERSION,
            root_path: DEFAULT_ROOT_PATH.to_string(),
            strict_deprecations: false,
            log: LogSettings::default(),
        }
    }
}

impl Settings {
    /// Validate and normalize the settings.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedSettings, SettingsError> {
        self.validate_version()?;

        let trimmed = self.root_path.trim();
        if trimmed.is_empty() {
            return Err(SettingsError::EmptyRootPath);
        }
        if trimmed.chars().any(|ch| ch.is_whitespace() || ch == '.' || ch == '[') {
            return Err(SettingsError::InvalidRootPath {
                value: self.root_path,
            });
        }
        self.root_path = trimmed.to_string();

        Ok(ValidatedSettings { raw: self })
    }

    const fn validate_version(&self) -> Result<(), SettingsError> {
        if self.version != CURRENT_SETTINGS_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_SETTINGS_VERSION,
            });
        }
        Ok(())
    }
}

/// Log output settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LogSettings {
    /// Minimum level written to stderr.
    pub level: LogLevel,
    /// Line format.
    pub format: LogFormat,
}

/// Minimum log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything.
    Trace,
    /// Per-pass counts and internals.
    Debug,
    /// Command progress.
    #[default]
    Info,
    /// Skipped inputs and recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Parse a case-insensitive level name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parse a case-insensitive format name.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Settings that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSettings {
    raw: Settings,
}

impl ValidatedSettings {
    /// Borrow the raw settings.
    #[must_use]
    pub const fn as_ref(&self) -> &Settings {
        &self.raw
    }

    /// Validator options derived from these settings.
    #[must_use]
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions::default()
            .with_root_path(self.raw.root_path.as_str())
            .with_strict_deprecations(self.raw.strict_deprecations)
    }
}

impl AsRef<Settings> for ValidatedSettings {
    fn as_ref(&self) -> &Settings {
        &self.raw
    }
}

impl std::ops::Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Parse settings from a JSON string, applying validation and normalization.
pub fn parse_settings_json(input: &str) -> Result<ValidatedSettings, ErrorEnvelope> {
    let settings: Settings = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid settings JSON: {error}"),
        )
    })?;

    settings.validate_and_normalize().map_err(Into::into)
}

/// Parse settings from a TOML string, applying validation and normalization.
pub fn parse_settings_toml(input: &str) -> Result<ValidatedSettings, ErrorEnvelope> {
    let settings: Settings = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid settings TOML: {error}"),
        )
    })?;

    settings.validate_and_normalize().map_err(Into::into)
}

/// JSON Schema describing the settings document.
#[must_use]
pub fn settings_schema() -> schemars::Schema {
    schemars::schema_for!(Settings)
}

/// Validation failures for settings values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The settings version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the settings.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// `rootPath` was empty after trimming.
    EmptyRootPath,
    /// `rootPath` contains characters that would break diagnostic paths.
    InvalidRootPath {
        /// Value provided.
        value: String,
    },
}

impl SettingsError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::EmptyRootPath | Self::InvalidRootPath { .. } => {
                ErrorCode::new("config", "invalid_root_path")
            },
        }
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => {
                write!(
                    formatter,
                    "unsupported settings version: {found} (supported: {supported})"
                )
            },
            Self::EmptyRootPath => formatter.write_str("rootPath must be non-empty"),
            Self::InvalidRootPath { value } => {
                write!(
                    formatter,
                    "rootPath must not contain whitespace, '.' or '[' (got {value:?})"
                )
            },
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<SettingsError> for ErrorEnvelope {
    fn from(error: SettingsError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            SettingsError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            SettingsError::EmptyRootPath => envelope.with_metadata("field", "rootPath"),
            SettingsError::InvalidRootPath { value } => envelope
                .with_metadata("field", "rootPath")
                .with_metadata("value", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn defaults_are_valid() -> Result<(), Box<dyn Error>> {
        let settings = Settings::default().validate_and_normalize()?;
        assert_eq!(settings.root_path, "fields");
        assert!(!settings.strict_deprecations);
        assert_eq!(settings.log.level, LogLevel::Info);
        assert_eq!(settings.log.format, LogFormat::Text);
        Ok(())
    }

    #[test]
    fn root_path_is_trimmed() -> Result<(), Box<dyn Error>> {
        let settings = parse_settings_json(r#"{ "rootPath": "  blocks " }"#)?;
        assert_eq!(settings.root_path, "blocks");
        assert_eq!(settings.validator_options().root_path, "blocks");
        Ok(())
    }

    #[test]
    fn dotted_root_path_is_rejected() -> Result<(), Box<dyn Error>> {
        let error = parse_settings_json(r#"{ "rootPath": "a.b" }"#)
            .err()
            .ok_or_else(|| std::io::Error::other("expected root path error"))?;
        assert_eq!(error.code, ErrorCode::new("config", "invalid_root_path"));
        assert_eq!(
            error.metadata.get("value").map(String::as_str),
            Some("a.b")
        );
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() -> Result<(), Box<dyn Error>> {
        let error = parse_settings_json(r#"{ "rootpath": "fields" }"#)
            .err()
            .ok_or_else(|| std::io::Error::other("expected unknown key error"))?;
        assert_eq!(error.code, ErrorCode::new("config", "invalid_json"));
        Ok(())
    }

    #[test]
    fn unsupported_version_reports_metadata() -> Result<(), Box<dyn Error>> {
        let error = parse_settings_toml("version = 2\n")
            .err()
            .ok_or_else(|| std::io::Error::other("expected version error"))?;
        assert_eq!(error.code, ErrorCode::new("config", "unsupported_version"));
        assert_eq!(error.metadata.get("found").map(String::as_str), Some("2"));
        Ok(())
    }

    #[test]
    fn toml_log_section_parses() -> Result<(), Box<dyn Error>> {
        let settings = parse_settings_toml("[log]\nlevel = \"debug\"\nformat = \"json\"\n")?;
        assert_eq!(settings.log.level, LogLevel::Debug);
        assert_eq!(settings.log.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn schema_names_every_top_level_key() -> Result<(), Box<dyn Error>> {
        let schema = serde_json::to_value(settings_schema())?;
        let properties = schema
            .get("properties")
            .and_then(serde_json::Value::as_object)
            .ok_or_else(|| std::io::Error::other("schema has no properties"))?;
        for key in ["version", "rootPath", "strictDeprecations", "log"] {
            assert!(properties.contains_key(key), "missing {key}");
        }
        Ok(())
    }
}
