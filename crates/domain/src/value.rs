//! Dynamic configuration values.
//!
//! Field trees arrive as untyped documents (JSON, TOML, YAML). `ConfigValue`
//! is the single representation the validator and the merge composer work on.
//! Mappings are kept in a `BTreeMap`, so iteration order is deterministic.

use crate::capability::Capability;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered key/value mapping.
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// Key marking a serialized capability: `{"$capability": "name"}`.
pub const CAPABILITY_MARKER: &str = "$capability";

/// Untyped configuration value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigValue {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer or floating point number.
    Number(serde_json::Number),
    /// String literal.
    String(String),
    /// Ordered list.
    Array(Vec<Self>),
    /// Key/value mapping.
    Object(ConfigMap),
    /// Opaque callable handle.
    Capability(Capability),
}

impl ConfigValue {
    /// Short name of the value kind, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "mapping",
            Self::Capability(_) => "capability",
        }
    }

    /// Borrow a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Read a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow a list value.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow a mapping value.
    #[must_use]
    pub const fn as_object(&self) -> Option<&ConfigMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow a capability handle.
    #[must_use]
    pub const fn as_capability(&self) -> Option<&Capability> {
        match self {
            Self::Capability(capability) => Some(capability),
            _ => None,
        }
    }

    /// Returns true only for the literal `true`.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Returns true for mappings.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Convert into a `serde_json::Value`, encoding capabilities by name.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(value) => serde_json::Value::Bool(*value),
            Self::Number(number) => serde_json::Value::Number(number.clone()),
            Self::String(value) => serde_json::Value::String(value.clone()),
            Self::Array(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            Self::Capability(capability) => {
                let mut marker = serde_json::Map::new();
                marker.insert(
                    CAPABILITY_MARKER.to_string(),
                    serde_json::Value::String(capability.name().to_string()),
                );
                serde_json::Value::Object(marker)
            },
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => Self::Number(number),
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            },
            serde_json::Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(serde_json::Value::String(name)) = map.get(CAPABILITY_MARKER) {
                        return Self::Capability(Capability::named(name.as_str()));
                    }
                }
                Self::Object(
                    map.into_iter()
                        .map(|(key, value)| (key, Self::from(value)))
                        .collect(),
                )
            },
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for ConfigValue {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        Self::Object(map)
    }
}

impl From<Capability> for ConfigValue {
    fn from(capability: Capability) -> Self {
        Self::Capability(capability)
    }
}

impl Serialize for ConfigValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Number(number) => number.serialize(serializer),
            Self::String(value) => serializer.serialize_str(value),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
            Self::Capability(capability) => {
                let mut marker = serializer.serialize_map(Some(1))?;
                marker.serialize_entry(CAPABILITY_MARKER, capability.name())?;
                marker.end()
            },
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write!(formatter, "\"{value}\""),
            Self::Capability(capability) => fmt::Display::fmt(capability, formatter),
            other => write!(formatter, "{}", other.to_json()),
        }
    }
}
