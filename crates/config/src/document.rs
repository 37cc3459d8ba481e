//! Field document loading and override composition.
//!
//! A document is either a list of field nodes or a collection-like mapping
//! whose `fields` key holds that list. JSON, TOML and YAML are accepted; the
//! format comes from the file extension.

use crate::load::read_text_file;
use fieldset_domain::{ConfigValue, TYPE_KEY, merge_value};
use fieldset_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;
use std::path::Path;

/// Key holding the field list in a collection-like document.
pub const FIELDS_KEY: &str = "fields";

/// Supported document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`, or no extension.
    Json,
    /// `.toml`.
    Toml,
    /// `.yaml` or `.yml`.
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, ErrorEnvelope> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some(other) => Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "unsupported_format"),
                "unsupported document format; use .json, .toml or .yaml",
            )
            .with_metadata("extension", other.to_string())
            .with_metadata("path", path.to_string_lossy().to_string())),
        }
    }

    /// Lowercase format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }
}

/// Parse document text in the given format.
pub fn parse_document(input: &str, format: DocumentFormat) -> Result<ConfigValue, ErrorEnvelope> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(input).map_err(|error| error.to_string()),
        DocumentFormat::Toml => toml::from_str(input).map_err(|error| error.to_string()),
        DocumentFormat::Yaml => serde_yaml_ng::from_str(input).map_err(|error| error.to_string()),
    };

    parsed.map_err(|message| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", format!("invalid_{}", format.as_str())),
            format!("invalid document {}: {message}", format.as_str().to_uppercase()),
        )
        .with_metadata("source", "document")
    })
}

/// Read and parse a document file.
pub fn load_document(path: &Path) -> Result<ConfigValue, ErrorEnvelope> {
    let format = DocumentFormat::from_path(path)?;
    let text = read_text_file(path, "document")?;
    tracing::debug!(path = %path.display(), format = format.as_str(), "loading document");
    parse_document(&text, format)
        .map_err(|error| error.with_metadata("path", path.to_string_lossy().to_string()))
}

/// The part of a document the validator should see.
///
/// A mapping with a `fields` key and no `type` key is a collection; its
/// `fields` value is returned. Anything else is returned unchanged: a list of
/// nodes, or a single field mapping.
pub fn document_fields(document: &ConfigValue) -> Result<&ConfigValue, DocumentError> {
    let Some(map) = document.as_object() else {
        return Ok(document);
    };
    if map.contains_key(TYPE_KEY) {
        return Ok(document);
    }
    match map.get(FIELDS_KEY) {
        None => Ok(document),
        Some(fields @ ConfigValue::Array(_)) => Ok(fields),
        Some(other) => Err(DocumentError::FieldsNotAList {
            found: other.kind_name(),
        }),
    }
}

/// Deep-merge an override document onto a base document.
///
/// Both documents must be mappings. Lists are replaced wholesale, never
/// concatenated.
pub fn compose_document(
    base: &ConfigValue,
    overrides: &ConfigValue,
) -> Result<ConfigValue, DocumentError> {
    for (role, value) in [("base", base), ("overrides", overrides)] {
        if !value.is_object() {
            return Err(DocumentError::NotAMapping {
                role,
                found: value.kind_name(),
            });
        }
    }
    Ok(merge_value(base, overrides))
}

/// Load two document files and compose them.
pub fn compose_document_files(
    base_path: &Path,
    overrides_path: &Path,
) -> Result<ConfigValue, ErrorEnvelope> {
    let base = load_document(base_path)?;
    let overrides = load_document(overrides_path)?;
    compose_document(&base, &overrides).map_err(Into::into)
}

/// Structural problems with a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// A collection's `fields` key does not hold a list.
    FieldsNotAList {
        /// Kind of the value found.
        found: &'static str,
    },
    /// A composed document was not a mapping.
    NotAMapping {
        /// `base` or `overrides`.
        role: &'static str,
        /// Kind of the value found.
        found: &'static str,
    },
}

impl DocumentError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::FieldsNotAList { .. } => ErrorCode::new("config", "invalid_document"),
            Self::NotAMapping { .. } => ErrorCode::new("config", "invalid_compose_input"),
        }
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldsNotAList { found } => {
                write!(formatter, "\"fields\" must be a list, found {found}")
            },
            Self::NotAMapping { role, found } => {
                write!(formatter, "{role} document must be a mapping, found {found}")
            },
        }
    }
}

impl std::error::Error for DocumentError {}

impl From<DocumentError> for ErrorEnvelope {
    fn from(error: DocumentError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            DocumentError::FieldsNotAList { found } => envelope.with_metadata("found", found),
            DocumentError::NotAMapping { role, found } => envelope
                .with_metadata("role", role)
                .with_metadata("found", found),
        }
    }
}
