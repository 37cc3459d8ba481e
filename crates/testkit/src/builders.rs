//! Fluent builders for field documents.
//!
//! Builders produce plain [`ConfigValue`] documents, exactly what a loader
//! would hand to the validator, so tests exercise the same input path.

use fieldset_domain::{Capability, ConfigMap, ConfigValue};

/// Builds one field mapping.
#[derive(Debug, Clone, Default)]
pub struct FieldBuilder {
    attributes: ConfigMap,
}

impl FieldBuilder {
    /// Start a field with the given discriminant.
    pub fn new(field_type: &str) -> Self {
        Self::untyped().attr("type", field_type)
    }

    /// Start a mapping without a discriminant.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Set `name`.
    pub fn name(self, name: &str) -> Self {
        self.attr("name", name)
    }

    /// Set `label`.
    pub fn label(self, label: &str) -> Self {
        self.attr("label", label)
    }

    /// Set any attribute.
    pub fn attr(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Set an attribute from a JSON literal.
    pub fn json(self, key: &str, value: serde_json::Value) -> Self {
        self.attr(key, value)
    }

    /// Set an attribute to a named capability.
    pub fn capability(self, key: &str, name: &str) -> Self {
        self.attr(key, Capability::named(name))
    }

    /// Set `fields`.
    pub fn fields(self, children: impl IntoIterator<Item = ConfigValue>) -> Self {
        self.attr("fields", children.into_iter().collect::<Vec<_>>())
    }

    /// Set `options` from plain string values.
    pub fn options(self, values: &[&str]) -> Self {
        let options: Vec<ConfigValue> = values.iter().map(|value| ConfigValue::from(*value)).collect();
        self.attr("options", options)
    }

    /// Finish the mapping.
    pub fn build(self) -> ConfigValue {
        ConfigValue::Object(self.attributes)
    }
}

impl From<FieldBuilder> for ConfigValue {
    fn from(builder: FieldBuilder) -> Self {
        builder.build()
    }
}

/// `text` field.
pub fn text(name: &str) -> ConfigValue {
    FieldBuilder::new("text").name(name).build()
}

/// `number` field.
pub fn number(name: &str) -> ConfigValue {
    FieldBuilder::new("number").name(name).build()
}

/// `checkbox` field.
pub fn checkbox(name: &str) -> ConfigValue {
    FieldBuilder::new("checkbox").name(name).build()
}

/// `group` field with children.
pub fn group(name: &str, children: Vec<ConfigValue>) -> ConfigValue {
    FieldBuilder::new("group").name(name).fields(children).build()
}

/// `array` field with children.
pub fn array(name: &str, children: Vec<ConfigValue>) -> ConfigValue {
    FieldBuilder::new("array").name(name).fields(children).build()
}

/// `row` layout with children.
pub fn row(children: Vec<ConfigValue>) -> ConfigValue {
    FieldBuilder::new("row").fields(children).build()
}

/// Named tab descriptor.
pub fn named_tab(name: &str, children: Vec<ConfigValue>) -> ConfigValue {
    FieldBuilder::untyped().name(name).fields(children).build()
}

/// Unnamed tab descriptor; needs a label.
pub fn labelled_tab(label: &str, children: Vec<ConfigValue>) -> ConfigValue {
    FieldBuilder::untyped().label(label).fields(children).build()
}

/// `tabs` layout.
pub fn tabs(tabs: Vec<ConfigValue>) -> ConfigValue {
    FieldBuilder::new("tabs").attr("tabs", tabs).build()
}

/// Wrap nodes into a document list.
pub fn list(fields: Vec<ConfigValue>) -> ConfigValue {
    ConfigValue::Array(fields)
}

/// Convert a JSON literal.
pub fn json(value: serde_json::Value) -> ConfigValue {
    ConfigValue::from(value)
}

/// Convert a JSON object literal into a mapping.
pub fn mapping(value: serde_json::Value) -> ConfigMap {
    match ConfigValue::from(value) {
        ConfigValue::Object(map) => map,
        other => panic!("expected a mapping literal, found {}", other.kind_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_matches_json_literal() {
        let built = FieldBuilder::new("select")
            .name("size")
            .options(&["s", "m"])
            .attr("hasMany", true)
            .build();
        let literal = json(json!({
            "type": "select",
            "name": "size",
            "options": ["s", "m"],
            "hasMany": true
        }));
        assert_eq!(built, literal);
    }

    #[test]
    fn nested_helpers_compose() {
        let document = list(vec![array("rows", vec![group("meta", vec![text("title")])])]);
        let rows = document.as_array().and_then(<[ConfigValue]>::first);
        let children = rows
            .and_then(ConfigValue::as_object)
            .and_then(|row| row.get("fields"))
            .and_then(ConfigValue::as_array);
        assert_eq!(children.map(<[ConfigValue]>::len), Some(1));
    }

    #[test]
    fn capability_attributes_are_markers() {
        let field = FieldBuilder::new("text")
            .name("slug")
            .capability("validate", "slugify")
            .build();
        let validate = field
            .as_object()
            .and_then(|map| map.get("validate"))
            .and_then(ConfigValue::as_capability);
        assert_eq!(validate.map(Capability::name), Some("slugify"));
    }
}
