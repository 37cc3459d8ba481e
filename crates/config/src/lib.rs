//! # fieldset-config
//!
//! Validator settings (schema, env overrides, layered loading) and field
//! document loading for the CLI.
//! This crate depends on `domain`, `schema` and `shared` only.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Field document parsing and composition.
pub mod document;
/// Environment variable parsing and merging.
pub mod env;
/// Settings loading helpers (env + file + overrides).
pub mod load;
/// Settings schema types and helpers.
pub mod settings;

pub use document::{
    DocumentError, DocumentFormat, FIELDS_KEY, compose_document, compose_document_files,
    document_fields, load_document, parse_document,
};
pub use env::{EnvParseError, KNOWN_ENV_VARS, SettingsEnv, apply_env_overrides};
pub use load::{
    load_settings_from_path, load_settings_from_sources, load_settings_std_env, to_pretty_json,
    to_pretty_toml,
};
pub use settings::{
    CURRENT_SETTINGS_VERSION, LogFormat, LogLevel, LogSettings, Settings, SettingsError,
    ValidatedSettings, parse_settings_json, parse_settings_toml, settings_schema,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
