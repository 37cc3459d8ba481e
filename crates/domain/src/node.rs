//! Validated field nodes.

use crate::field_type::FieldType;
use crate::value::{ConfigMap, ConfigValue};
use serde::{Serialize, Serializer};

/// Attribute holding the discriminant in documents.
pub const TYPE_KEY: &str = "type";

/// A field whose discriminant has been resolved.
///
/// The discriminant is fixed at construction; `attributes` never contains the
/// `type` key, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    field_type: FieldType,
    attributes: ConfigMap,
}

impl FieldNode {
    /// Build a node, dropping any stray `type` attribute.
    #[must_use]
    pub fn new(field_type: FieldType, mut attributes: ConfigMap) -> Self {
        attributes.remove(TYPE_KEY);
        Self {
            field_type,
            attributes,
        }
    }

    /// Discriminant.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Attributes other than the discriminant.
    #[must_use]
    pub const fn attributes(&self) -> &ConfigMap {
        &self.attributes
    }

    /// Look up one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&ConfigValue> {
        self.attributes.get(name)
    }

    /// The `name` attribute when it is a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.attribute("name").and_then(ConfigValue::as_str)
    }

    /// Render back into document form, discriminant included.
    #[must_use]
    pub fn to_value(&self) -> ConfigValue {
        self.clone().into_value()
    }

    /// Consume into document form, discriminant included.
    #[must_use]
    pub fn into_value(self) -> ConfigValue {
        let mut map = self.attributes;
        map.insert(
            TYPE_KEY.to_string(),
            ConfigValue::from(self.field_type.as_str()),
        );
        ConfigValue::Object(map)
    }
}

impl Serialize for FieldNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}
