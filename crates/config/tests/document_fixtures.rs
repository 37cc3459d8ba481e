//! Integration tests for document loading, composition and validation.

use fieldset_config::{compose_document_files, document_fields, load_document};
use fieldset_domain::{ConfigValue, deep_merge};
use fieldset_schema::Validator;
use fieldset_shared::ErrorCode;
use fieldset_testkit::errors::not_found_error;
use fieldset_testkit::fixtures::{
    BLOG_POST, COMPOSE_BASE, COMPOSE_OVERRIDE, PAGES_TOML, PAGES_YAML, fixture_path, load_fixture,
};
use serde_json::json;
use std::error::Error;

fn mapping(value: ConfigValue) -> Result<fieldset_domain::ConfigMap, Box<dyn Error>> {
    match value {
        ConfigValue::Object(map) => Ok(map),
        other => Err(format!("expected mapping, found {}", other.kind_name()).into()),
    }
}

#[test]
fn yaml_collection_validates() -> Result<(), Box<dyn Error>> {
    let document = load_document(&fixture_path(PAGES_YAML))?;
    let fields = document_fields(&document)?;
    let validated = Validator::default().validate(fields)?;
    assert_eq!(validated.len(), 3);
    assert!(validated.warnings.is_empty());
    Ok(())
}

#[test]
fn toml_collection_validates() -> Result<(), Box<dyn Error>> {
    let document = load_document(&fixture_path(PAGES_TOML))?;
    let validated = Validator::default().validate(document_fields(&document)?)?;
    assert_eq!(validated.len(), 2);
    Ok(())
}

#[test]
fn json_list_document_is_passed_through() -> Result<(), Box<dyn Error>> {
    let document = load_document(&fixture_path(BLOG_POST))?;
    assert_eq!(document_fields(&document)?, &load_fixture(BLOG_POST)?);
    Ok(())
}

#[test]
fn composed_files_match_deep_merge() -> Result<(), Box<dyn Error>> {
    let composed =
        compose_document_files(&fixture_path(COMPOSE_BASE), &fixture_path(COMPOSE_OVERRIDE))?;
    let expected = deep_merge(
        &mapping(load_fixture(COMPOSE_BASE)?)?,
        &mapping(load_fixture(COMPOSE_OVERRIDE)?)?,
    );
    assert_eq!(composed, ConfigValue::Object(expected));
    assert_eq!(
        composed.to_json(),
        json!({
            "admin": { "hidden": true, "position": "sidebar" },
            "hooks": { "beforeChange": [{ "$capability": "trim" }] },
            "label": { "en": "Title" }
        })
    );
    Ok(())
}

#[test]
fn missing_document_maps_to_not_found_code() -> Result<(), Box<dyn Error>> {
    let error = load_document(&fixture_path("documents/missing.json"))
        .err()
        .ok_or_else(|| std::io::Error::other("expected read error"))?;
    assert_eq!(error.code, ErrorCode::new("config", "document_not_found"));
    assert_eq!(error.code, not_found_error("missing.json").code);
    assert!(error.metadata.contains_key("path"));
    Ok(())
}
