//! Closed set of field-type discriminants.

use fieldset_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field variant selected by a node's `type` attribute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Repeating rows of sub-fields.
    Array,
    /// Polymorphic list of block definitions.
    Blocks,
    /// Boolean toggle.
    Checkbox,
    /// Source code editor.
    Code,
    /// Collapsible layout container.
    Collapsible,
    /// Date picker.
    Date,
    /// Email input.
    Email,
    /// Named group of sub-fields.
    Group,
    /// Free-form JSON.
    Json,
    /// Numeric input.
    Number,
    /// Geographic point.
    Point,
    /// Radio button group.
    Radio,
    /// Reference to other collections.
    Relationship,
    /// Rich text editor.
    RichText,
    /// Horizontal layout container.
    Row,
    /// Dropdown selection.
    Select,
    /// Tabbed layout container.
    Tabs,
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Presentational element without stored data.
    Ui,
    /// Upload reference.
    Upload,
}

impl FieldType {
    /// Every variant, ordered by discriminant name.
    pub const ALL: [Self; 21] = [
        Self::Array,
        Self::Blocks,
        Self::Checkbox,
        Self::Code,
        Self::Collapsible,
        Self::Date,
        Self::Email,
        Self::Group,
        Self::Json,
        Self::Number,
        Self::Point,
        Self::Radio,
        Self::Relationship,
        Self::RichText,
        Self::Row,
        Self::Select,
        Self::Tabs,
        Self::Text,
        Self::Textarea,
        Self::Ui,
        Self::Upload,
    ];

    /// Discriminant as written in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Blocks => "blocks",
            Self::Checkbox => "checkbox",
            Self::Code => "code",
            Self::Collapsible => "collapsible",
            Self::Date => "date",
            Self::Email => "email",
            Self::Group => "group",
            Self::Json => "json",
            Self::Number => "number",
            Self::Point => "point",
            Self::Radio => "radio",
            Self::Relationship => "relationship",
            Self::RichText => "richText",
            Self::Row => "row",
            Self::Select => "select",
            Self::Tabs => "tabs",
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Ui => "ui",
            Self::Upload => "upload",
        }
    }

    /// Layout-only variants carry no `name` and store no data of their own.
    #[must_use]
    pub const fn is_layout(self) -> bool {
        matches!(self, Self::Row | Self::Collapsible | Self::Tabs)
    }

    /// Comma-separated list of every discriminant.
    #[must_use]
    pub fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|field_type| field_type.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FieldTypeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field_type| field_type.as_str() == input)
            .ok_or_else(|| FieldTypeError::Unknown {
                received: input.to_string(),
            })
    }
}

/// Failure to resolve a discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTypeError {
    /// The discriminant is not part of the closed set.
    Unknown {
        /// Raw discriminant.
        received: String,
    },
}

impl fmt::Display for FieldTypeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { received } => write!(
                formatter,
                "unknown field type \"{received}\"; expected one of: {}",
                FieldType::expected_list()
            ),
        }
    }
}

impl std::error::Error for FieldTypeError {}

impl From<FieldTypeError> for ErrorEnvelope {
    fn from(error: FieldTypeError) -> Self {
        let envelope = Self::expected(
            ErrorCode::new("domain", "unknown_field_type"),
            error.to_string(),
        );
        match error {
            FieldTypeError::Unknown { received } => envelope.with_metadata("received", received),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_round_trip_through_from_str() {
        for field_type in FieldType::ALL {
            assert_eq!(field_type.as_str().parse::<FieldType>(), Ok(field_type));
        }
    }

    #[test]
    fn all_is_sorted_and_unique() {
        let names: Vec<_> = FieldType::ALL.iter().map(|ty| ty.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable_by_key(|name| name.to_ascii_lowercase());
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn unknown_discriminant_lists_valid_set() -> Result<(), Box<dyn std::error::Error>> {
        let error = "unknown"
            .parse::<FieldType>()
            .err()
            .ok_or_else(|| std::io::Error::other("expected unknown type"))?;
        let message = error.to_string();
        assert!(message.contains("\"unknown\""));
        assert!(message.contains("richText"));

        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.code.code(), "unknown_field_type");
        assert_eq!(
            envelope.metadata.get("received").map(String::as_str),
            Some("unknown")
        );
        Ok(())
    }

    #[test]
    fn serde_uses_document_spelling() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&FieldType::RichText)?, "\"richText\"");
        let parsed: FieldType = serde_json::from_str("\"textarea\"")?;
        assert_eq!(parsed, FieldType::Textarea);
        Ok(())
    }

    #[test]
    fn layout_variants() {
        assert!(FieldType::Row.is_layout());
        assert!(FieldType::Tabs.is_layout());
        assert!(!FieldType::Group.is_layout());
    }
}
