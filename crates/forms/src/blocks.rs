//! Built-in form blocks.
//!
//! Each block describes one kind of form input an editor can place in a
//! form. The block's own fields configure that input (name, label, width,
//! default value, required flag).

use fieldset_domain::ConfigValue;
use serde_json::{Value, json};
use std::fmt;

/// Form inputs shipped with the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinBlock {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Dropdown with editor-defined options.
    Select,
    /// Email address input.
    Email,
    /// Numeric input.
    Number,
    /// Single checkbox.
    Checkbox,
    /// Static rich-text message, no input.
    Message,
    /// Country picker.
    Country,
    /// State picker.
    State,
}

impl BuiltinBlock {
    /// Every built-in block, in the default order.
    pub const ALL: [Self; 9] = [
        Self::Text,
        Self::Textarea,
        Self::Select,
        Self::Email,
        Self::Number,
        Self::Checkbox,
        Self::Message,
        Self::Country,
        Self::State,
    ];

    /// Block slug.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Email => "email",
            Self::Number => "number",
            Self::Checkbox => "checkbox",
            Self::Message => "message",
            Self::Country => "country",
            Self::State => "state",
        }
    }

    /// Look up a block by slug. Exact match only.
    #[must_use]
    pub fn parse(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|block| block.as_str() == slug)
    }

    /// Block definition, ready to drop into a `blocks` field.
    #[must_use]
    pub fn definition(self) -> ConfigValue {
        let (singular, plural, fields) = match self {
            Self::Text => (
                "Text",
                "Text Fields",
                vec![name_and_label(), width_and_default("text"), required()],
            ),
            Self::Textarea => (
                "Text Area",
                "Text Area Fields",
                vec![name_and_label(), width_and_default("text"), required()],
            ),
            Self::Select => (
                "Select",
                "Select Fields",
                vec![
                    name_and_label(),
                    width_and_default("text"),
                    select_options(),
                    required(),
                ],
            ),
            Self::Email => ("Email", "Email Fields", vec![name_and_label(), width(), required()]),
            Self::Number => (
                "Number",
                "Number Fields",
                vec![name_and_label(), width_and_default("number"), required()],
            ),
            Self::Checkbox => (
                "Checkbox",
                "Checkbox Fields",
                vec![
                    name_and_label(),
                    json!({ "type": "row", "fields": [width_field(), required()] }),
                    json!({ "type": "checkbox", "name": "defaultValue", "label": "Default Value" }),
                ],
            ),
            Self::Message => (
                "Message",
                "Message Blocks",
                vec![json!({ "type": "richText", "name": "message" })],
            ),
            Self::Country => (
                "Country",
                "Country Fields",
                vec![name_and_label(), width(), required()],
            ),
            Self::State => ("State", "State Fields", vec![name_and_label(), width(), required()]),
        };

        ConfigValue::from(json!({
            "slug": self.as_str(),
            "labels": { "singular": singular, "plural": plural },
            "fields": fields,
        }))
    }
}

impl fmt::Display for BuiltinBlock {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn half(mut field: Value) -> Value {
    if let Some(map) = field.as_object_mut() {
        map.insert("admin".to_string(), json!({ "width": "50%" }));
    }
    field
}

fn name_and_label() -> Value {
    json!({
        "type": "row",
        "fields": [
            half(json!({
                "type": "text",
                "name": "name",
                "label": "Name (lowercase, no special characters)",
                "required": true,
            })),
            half(json!({ "type": "text", "name": "label", "label": "Label" })),
        ],
    })
}

fn width_field() -> Value {
    half(json!({ "type": "number", "name": "width", "label": "Field Width (percentage)" }))
}

fn width() -> Value {
    json!({ "type": "row", "fields": [width_field()] })
}

fn width_and_default(default_type: &str) -> Value {
    json!({
        "type": "row",
        "fields": [
            width_field(),
            half(json!({ "type": default_type, "name": "defaultValue", "label": "Default Value" })),
        ],
    })
}

fn required() -> Value {
    json!({ "type": "checkbox", "name": "required", "label": "Required" })
}

fn select_options() -> Value {
    json!({
        "type": "array",
        "name": "options",
        "label": "Select Attribute Options",
        "labels": { "singular": "Option", "plural": "Options" },
        "fields": [{
            "type": "row",
            "fields": [
                half(json!({ "type": "text", "name": "label", "label": "Label", "required": true })),
                half(json!({ "type": "text", "name": "value", "label": "Value", "required": true })),
            ],
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_is_found_by_slug() {
        for block in BuiltinBlock::ALL {
            assert_eq!(BuiltinBlock::parse(block.as_str()), Some(block));
        }
        assert_eq!(BuiltinBlock::parse("Text"), None);
        assert_eq!(BuiltinBlock::parse("payment"), None);
    }

    #[test]
    fn definition_carries_its_slug() {
        let definition = BuiltinBlock::Country.definition();
        assert_eq!(
            definition
                .as_object()
                .and_then(|map| map.get("slug"))
                .and_then(ConfigValue::as_str),
            Some("country")
        );
    }
}
