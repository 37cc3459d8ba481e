//! Deep merge of configuration mappings.
//!
//! Mappings merge key by key. Every other value in the override (scalars,
//! lists, capabilities, null) replaces the base value wholesale; lists are
//! never concatenated or merged by position.

use crate::value::{ConfigMap, ConfigValue};

/// Merge `overrides` onto `base`.
///
/// Keys only in `base` are kept, keys only in `overrides` are added, and keys
/// in both merge recursively when both sides are mappings. Neither input is
/// modified.
#[must_use]
pub fn deep_merge(base: &ConfigMap, overrides: &ConfigMap) -> ConfigMap {
    let mut merged = base.clone();
    for (key, incoming) in overrides {
        let next = match merged.get(key) {
            Some(existing) => merge_value(existing, incoming),
            None => incoming.clone(),
        };
        merged.insert(key.clone(), next);
    }
    merged
}

/// Merge two arbitrary values with the same rule as [`deep_merge`].
#[must_use]
pub fn merge_value(base: &ConfigValue, overrides: &ConfigValue) -> ConfigValue {
    match (base, overrides) {
        (ConfigValue::Object(base), ConfigValue::Object(overrides)) => {
            ConfigValue::Object(deep_merge(base, overrides))
        },
        (_, overrides) => overrides.clone(),
    }
}

/// Fold layers from lowest to highest precedence.
#[must_use]
pub fn merge_layers<'a, I>(layers: I) -> ConfigMap
where
    I: IntoIterator<Item = &'a ConfigMap>,
{
    layers
        .into_iter()
        .fold(ConfigMap::new(), |merged, layer| deep_merge(&merged, layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    fn map(value: serde_json::Value) -> Result<ConfigMap, Box<dyn Error>> {
        match ConfigValue::from(value) {
            ConfigValue::Object(map) => Ok(map),
            other => Err(format!("expected mapping, found {}", other.kind_name()).into()),
        }
    }

    #[test]
    fn nested_mappings_merge_and_siblings_survive() -> Result<(), Box<dyn Error>> {
        let base = map(json!({
            "slug": "forms",
            "admin": { "useAsTitle": "title", "group": "Content" }
        }))?;
        let overrides = map(json!({ "admin": { "group": "Forms" }, "labels": { "singular": "Form" } }))?;

        let merged = deep_merge(&base, &overrides);
        assert_eq!(
            ConfigValue::Object(merged).to_json(),
            json!({
                "slug": "forms",
                "admin": { "useAsTitle": "title", "group": "Forms" },
                "labels": { "singular": "Form" }
            })
        );
        Ok(())
    }

    #[test]
    fn arrays_replace_wholesale() -> Result<(), Box<dyn Error>> {
        let base = map(json!({ "fields": [{ "name": "a" }, { "name": "b" }] }))?;
        let overrides = map(json!({ "fields": [{ "name": "c" }] }))?;
        let merged = deep_merge(&base, &overrides);
        assert_eq!(
            ConfigValue::Object(merged).to_json(),
            json!({ "fields": [{ "name": "c" }] })
        );
        Ok(())
    }

    #[test]
    fn scalar_over_mapping_and_mapping_over_scalar_replace() -> Result<(), Box<dyn Error>> {
        let base = map(json!({ "admin": { "hidden": true }, "label": "Title" }))?;
        let overrides = map(json!({ "admin": false, "label": { "en": "Title" } }))?;
        let merged = deep_merge(&base, &overrides);
        assert_eq!(
            ConfigValue::Object(merged).to_json(),
            json!({ "admin": false, "label": { "en": "Title" } })
        );
        Ok(())
    }

    #[test]
    fn layers_apply_in_order() -> Result<(), Box<dyn Error>> {
        let defaults = map(json!({ "rootPath": "fields", "log": { "level": "info" } }))?;
        let file = map(json!({ "log": { "level": "debug", "format": "json" } }))?;
        let overrides = map(json!({ "log": { "level": "warn" } }))?;
        let merged = merge_layers([&defaults, &file, &overrides]);
        assert_eq!(
            ConfigValue::Object(merged).to_json(),
            json!({ "rootPath": "fields", "log": { "level": "warn", "format": "json" } })
        );
        Ok(())
    }
}
