//! Component reference descriptors.
//!
//! Admin components (cells, filters, row labels, rich text buttons) are
//! referenced, never resolved. Accepted forms:
//!
//! - `"path/to/module#ExportName"` (export suffix optional)
//! - `{ path, exportName?, clientProps?, serverProps? }`
//! - a capability handle supplied by the host

use crate::capability::Capability;
use crate::value::{ConfigMap, ConfigValue};
use fieldset_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

const DESCRIPTOR_KEYS: [&str; 4] = ["clientProps", "exportName", "path", "serverProps"];

/// Shape-checked reference to an admin component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRef {
    /// Import path with an optional export name.
    Path {
        /// Module path.
        path: String,
        /// Named export, when given after `#`.
        export_name: Option<String>,
    },
    /// Mapping form with optional props.
    Descriptor {
        /// Module path.
        path: String,
        /// Named export.
        export_name: Option<String>,
        /// Props forwarded to client components.
        client_props: Option<ConfigMap>,
        /// Props forwarded to server components.
        server_props: Option<ConfigMap>,
    },
    /// Host-supplied component.
    Capability(Capability),
}

impl ComponentRef {
    /// Check a value against the accepted component shapes.
    pub fn parse(value: &ConfigValue) -> Result<Self, ComponentShapeError> {
        match value {
            ConfigValue::String(raw) => {
                let (path, export_name) = split_path(raw)?;
                Ok(Self::Path { path, export_name })
            },
            ConfigValue::Object(map) => parse_descriptor(map),
            ConfigValue::Capability(capability) => Ok(Self::Capability(capability.clone())),
            other => Err(ComponentShapeError::UnsupportedShape {
                found: other.kind_name(),
            }),
        }
    }

    /// Module path, absent for capability components.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Path { path, .. } | Self::Descriptor { path, .. } => Some(path),
            Self::Capability(_) => None,
        }
    }

    /// Export name when one was given.
    #[must_use]
    pub fn export_name(&self) -> Option<&str> {
        match self {
            Self::Path { export_name, .. } | Self::Descriptor { export_name, .. } => {
                export_name.as_deref()
            },
            Self::Capability(_) => None,
        }
    }
}

fn split_path(raw: &str) -> Result<(String, Option<String>), ComponentShapeError> {
    if raw.trim().is_empty() {
        return Err(ComponentShapeError::EmptyPath);
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(ComponentShapeError::InvalidPath {
            path: raw.to_string(),
        });
    }
    match raw.split_once('#') {
        None => Ok((raw.to_string(), None)),
        Some((path, export)) if !path.is_empty() && !export.is_empty() && !export.contains('#') => {
            Ok((path.to_string(), Some(export.to_string())))
        },
        Some(_) => Err(ComponentShapeError::InvalidPath {
            path: raw.to_string(),
        }),
    }
}

fn parse_descriptor(map: &ConfigMap) -> Result<ComponentRef, ComponentShapeError> {
    if let Some(key) = map
        .keys()
        .find(|key| !DESCRIPTOR_KEYS.contains(&key.as_str()))
    {
        return Err(ComponentShapeError::UnknownKey { key: key.clone() });
    }

    let raw_path = match map.get("path") {
        Some(ConfigValue::String(raw)) => raw,
        Some(other) => {
            return Err(ComponentShapeError::UnsupportedShape {
                found: other.kind_name(),
            });
        },
        None => return Err(ComponentShapeError::MissingPath),
    };
    let (path, inline_export) = split_path(raw_path)?;

    let export_name = match map.get("exportName") {
        None => inline_export,
        Some(ConfigValue::String(name)) if !name.trim().is_empty() => Some(name.clone()),
        Some(_) => return Err(ComponentShapeError::InvalidExportName),
    };

    Ok(ComponentRef::Descriptor {
        path,
        export_name,
        client_props: props(map, "clientProps")?,
        server_props: props(map, "serverProps")?,
    })
}

fn props(map: &ConfigMap, key: &'static str) -> Result<Option<ConfigMap>, ComponentShapeError> {
    match map.get(key) {
        None => Ok(None),
        Some(ConfigValue::Object(props)) => Ok(Some(props.clone())),
        Some(_) => Err(ComponentShapeError::InvalidProps { key }),
    }
}

/// Component reference shape violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentShapeError {
    /// Path string is empty.
    EmptyPath,
    /// Path string contains whitespace or a malformed export suffix.
    InvalidPath {
        /// Offending path.
        path: String,
    },
    /// Descriptor mapping has no `path`.
    MissingPath,
    /// Descriptor mapping carries an unsupported key.
    UnknownKey {
        /// Offending key.
        key: String,
    },
    /// `exportName` is not a non-empty string.
    InvalidExportName,
    /// `clientProps` or `serverProps` is not a mapping.
    InvalidProps {
        /// Offending key.
        key: &'static str,
    },
    /// Value is neither a string, a mapping, nor a capability.
    UnsupportedShape {
        /// Kind of the rejected value.
        found: &'static str,
    },
}

impl fmt::Display for ComponentShapeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => formatter.write_str("component path must be non-empty"),
            Self::InvalidPath { path } => {
                write!(formatter, "component path \"{path}\" is malformed")
            },
            Self::MissingPath => formatter.write_str("component descriptor requires \"path\""),
            Self::UnknownKey { key } => {
                write!(formatter, "component descriptor does not allow \"{key}\"")
            },
            Self::InvalidExportName => {
                formatter.write_str("component \"exportName\" must be a non-empty string")
            },
            Self::InvalidProps { key } => {
                write!(formatter, "component \"{key}\" must be a mapping")
            },
            Self::UnsupportedShape { found } => write!(
                formatter,
                "expected a component path, descriptor or capability, found {found}"
            ),
        }
    }
}

impl std::error::Error for ComponentShapeError {}

impl From<ComponentShapeError> for ErrorEnvelope {
    fn from(error: ComponentShapeError) -> Self {
        let envelope = Self::expected(
            ErrorCode::new("domain", "invalid_component"),
            error.to_string(),
        );
        match error {
            ComponentShapeError::InvalidPath { path } => envelope.with_metadata("path", path),
            ComponentShapeError::UnknownKey { key } => envelope.with_metadata("key", key),
            ComponentShapeError::InvalidProps { key } => envelope.with_metadata("key", key),
            ComponentShapeError::UnsupportedShape { found } => {
                envelope.with_metadata("found", found)
            },
            ComponentShapeError::EmptyPath
            | ComponentShapeError::MissingPath
            | ComponentShapeError::InvalidExportName => envelope,
        }
    }
}
