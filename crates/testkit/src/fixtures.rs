//! On-disk field documents shared by integration tests.

use fieldset_domain::ConfigValue;
use std::path::{Path, PathBuf};
use std::{fmt, fs};

/// Errors raised while loading fixtures.
#[derive(Debug)]
pub enum FixtureError {
    /// Fixture file does not exist.
    MissingFixture {
        /// Path that could not be found.
        path: PathBuf,
    },
    /// Fixture file could not be read.
    FixtureRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Fixture file could not be parsed.
    FixtureParse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFixture { path } => {
                write!(formatter, "missing fixture: {}", path.display())
            },
            Self::FixtureRead { path, source } => {
                write!(
                    formatter,
                    "failed to read fixture {}: {}",
                    path.display(),
                    source
                )
            },
            Self::FixtureParse { path, source } => {
                write!(
                    formatter,
                    "failed to parse fixture {}: {}",
                    path.display(),
                    source
                )
            },
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FixtureRead { source, .. } => Some(source),
            Self::FixtureParse { source, .. } => Some(source),
            Self::MissingFixture { .. } => None,
        }
    }
}

/// Valid document touching most variants.
pub const BLOG_POST: &str = "blog_post.json";
/// Document with several independent errors and one deprecation.
pub const MIXED_ERRORS: &str = "mixed_errors.json";
/// Layout-only document: rows, collapsibles and tabs.
pub const LAYOUT: &str = "layout.json";
/// Base layer for composition tests.
pub const COMPOSE_BASE: &str = "compose_base.json";
/// Override layer for composition tests.
pub const COMPOSE_OVERRIDE: &str = "compose_override.json";

/// Settings file exercising every key.
pub const SETTINGS_TOML: &str = "settings/fieldset.toml";
/// Settings file with an empty root path.
pub const SETTINGS_INVALID: &str = "settings/fieldset.invalid.json";
/// Env map with every known variable set.
pub const ENV_VALID: &str = "env/fieldset-env.valid.json";
/// Collection-like YAML document.
pub const PAGES_YAML: &str = "documents/pages.yaml";
/// Collection-like TOML document.
pub const PAGES_TOML: &str = "documents/pages.toml";
/// Form-builder options with a custom block, an unknown slug and overrides.
pub const FORMS_OPTIONS: &str = "forms/options.yaml";

/// Directory holding the fixture files.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Absolute path of one fixture.
pub fn fixture_path(name: &str) -> PathBuf {
    fixture_root().join(name)
}

/// Load a JSON fixture as a document value.
pub fn load_fixture(name: &str) -> Result<ConfigValue, FixtureError> {
    let path = fixture_path(name);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Err(FixtureError::MissingFixture { path });
        },
        Err(error) => {
            return Err(FixtureError::FixtureRead {
                path,
                source: error,
            });
        },
    };

    serde_json::from_str::<serde_json::Value>(&contents)
        .map(ConfigValue::from)
        .map_err(|error| FixtureError::FixtureParse {
            path,
            source: error,
        })
}
