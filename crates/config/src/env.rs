//! Environment variable parsing and env-to-settings merging.
//!
//! Parsing is strict: a variable that is present but empty or malformed
//! fails instead of falling back to the file or default value.

use crate::settings::{LogFormat, LogLevel, Settings, ValidatedSettings};
use fieldset_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: root list name used in diagnostic paths.
pub const ENV_ROOT_PATH: &str = "FIELDSET_ROOT_PATH";
/// Env var: treat deprecated attributes as errors.
pub const ENV_STRICT_DEPRECATIONS: &str = "FIELDSET_STRICT_DEPRECATIONS";
/// Env var: minimum log level.
pub const ENV_LOG_LEVEL: &str = "FIELDSET_LOG_LEVEL";
/// Env var: log line format (`text` | `json`).
pub const ENV_LOG_FORMAT: &str = "FIELDSET_LOG_FORMAT";

/// Every env var the loader reads.
pub const KNOWN_ENV_VARS: [&str; 4] = [
    ENV_ROOT_PATH,
    ENV_STRICT_DEPRECATIONS,
    ENV_LOG_LEVEL,
    ENV_LOG_FORMAT,
];

/// Typed env-derived overrides for `Settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsEnv {
    /// Override for `rootPath`.
    pub root_path: Option<Box<str>>,
    /// Override for `strictDeprecations`.
    pub strict_deprecations: Option<bool>,
    /// Override for `log.level`.
    pub log_level: Option<LogLevel>,
    /// Override for `log.format`.
    pub log_format: Option<LogFormat>,
}

impl SettingsEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            root_path: parse_optional_trimmed_string(map, ENV_ROOT_PATH)?,
            strict_deprecations: parse_optional_bool(map, ENV_STRICT_DEPRECATIONS)?,
            log_level: parse_optional_enum(map, ENV_LOG_LEVEL, LogLevel::parse)?,
            log_format: parse_optional_enum(map, ENV_LOG_FORMAT, LogFormat::parse)?,
        })
    }

    /// Parse env overrides from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in KNOWN_ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// Returns true when no variable was set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root_path.is_none()
            && self.strict_deprecations.is_none()
            && self.log_level.is_none()
            && self.log_format.is_none()
    }
}

/// Apply env overrides to base settings (env wins over file/default values).
pub fn apply_env_overrides(
    base: Settings,
    env: &SettingsEnv,
) -> Result<ValidatedSettings, ErrorEnvelope> {
    let mut settings = base;
    if let Some(root_path) = env.root_path.as_deref() {
        settings.root_path = root_path.to_string();
    }
    if let Some(strict) = env.strict_deprecations {
        settings.strict_deprecations = strict;
    }
    if let Some(level) = env.log_level {
        settings.log.level = level;
    }
    if let Some(format) = env.log_format {
        settings.log.format = format;
    }

    settings.validate_and_normalize().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    parse(raw).map(Some).ok_or_else(|| EnvParseError::InvalidEnum {
        var,
        value: raw.clone(),
    })
}
