//! Generator options.

use crate::blocks::BuiltinBlock;
use crate::error::FormsError;
use fieldset_domain::{ConfigMap, ConfigValue};
use serde::Deserialize;

/// Collections a redirect may point at when no list is configured.
pub const DEFAULT_REDIRECT_RELATIONSHIPS: [&str; 1] = ["pages"];

/// Options for [`forms_collection`](crate::forms_collection).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FormBuilderOptions {
    /// Block choices: built-in slugs or custom block mappings.
    pub fields: Vec<ConfigValue>,
    /// Partial collection config deep-merged over the generated one.
    pub forms_overrides: ConfigMap,
    /// Collections the `redirect.reference` relationship may point at.
    pub redirect_relationships: Vec<String>,
}

impl Default for FormBuilderOptions {
    fn default() -> Self {
        Self {
            fields: BuiltinBlock::ALL
                .into_iter()
                .map(|block| ConfigValue::from(block.as_str()))
                .collect(),
            forms_overrides: ConfigMap::new(),
            redirect_relationships: DEFAULT_REDIRECT_RELATIONSHIPS
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl FormBuilderOptions {
    /// Read options from a parsed document.
    pub fn from_value(value: &ConfigValue) -> Result<Self, FormsError> {
        serde_json::from_value(value.to_json()).map_err(FormsError::InvalidOptions)
    }

    /// Replace the block choices.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = ConfigValue>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    /// Replace the collection overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigMap) -> Self {
        self.forms_overrides = overrides;
        self
    }
}
