//! Forms collection generator.

use crate::blocks::BuiltinBlock;
use crate::error::FormsError;
use crate::options::FormBuilderOptions;
use fieldset_domain::{ConfigMap, ConfigValue, deep_merge};
use fieldset_schema::{ValidatedFields, Validator};
use serde_json::json;

/// Slug used when the overrides do not name one.
pub const DEFAULT_FORMS_SLUG: &str = "forms";

/// Capability names referenced by the generated collection.
pub mod capabilities {
    /// Anyone may read forms.
    pub const PUBLIC_READ: &str = "forms.publicRead";
    /// Show the message editor when the confirmation type is `message`.
    pub const CONFIRMATION_IS_MESSAGE: &str = "forms.confirmationIsMessage";
    /// Show the redirect group when the confirmation type is `redirect`.
    pub const CONFIRMATION_IS_REDIRECT: &str = "forms.confirmationIsRedirect";
    /// Show the reference picker for internal redirects.
    pub const REDIRECT_IS_REFERENCE: &str = "forms.redirectIsReference";
    /// Show the URL input for custom redirects.
    pub const REDIRECT_IS_CUSTOM: &str = "forms.redirectIsCustom";
}

/// Build the forms collection and apply `formsOverrides`.
///
/// Block choices that are neither a built-in slug nor a mapping with a
/// `slug` string and a `fields` list are skipped with a warning.
#[must_use]
pub fn forms_collection(options: &FormBuilderOptions) -> ConfigValue {
    let slug = options
        .forms_overrides
        .get("slug")
        .and_then(ConfigValue::as_str)
        .filter(|slug| !slug.is_empty())
        .unwrap_or(DEFAULT_FORMS_SLUG);

    let blocks = resolve_blocks(&options.fields);
    tracing::debug!(slug, blocks = blocks.len(), "building forms collection");

    let mut collection = ConfigMap::new();
    collection.insert("slug".to_string(), ConfigValue::from(slug));
    collection.insert(
        "admin".to_string(),
        ConfigValue::from(json!({ "useAsTitle": "title" })),
    );
    collection.insert(
        "access".to_string(),
        ConfigValue::from(json!({ "read": capability(capabilities::PUBLIC_READ) })),
    );
    collection.insert(
        "fields".to_string(),
        ConfigValue::Array(vec![
            ConfigValue::from(json!({ "name": "title", "type": "text", "required": true })),
            blocks_field(blocks),
            ConfigValue::from(json!({ "name": "submitButtonLabel", "type": "text" })),
            confirmation_type(),
            confirmation_message(),
            redirect(&options.redirect_relationships),
            emails(),
        ]),
    );

    ConfigValue::Object(deep_merge(&collection, &options.forms_overrides))
}

/// Validate the `fields` list of a generated (and possibly overridden)
/// collection.
///
/// # Errors
///
/// Returns [`FormsError::Invalid`] with every diagnostic when the list fails
/// validation, or a collection error when there is no list to check.
pub fn validate_forms_collection(
    collection: &ConfigValue,
    validator: &Validator,
) -> Result<ValidatedFields, FormsError> {
    let fields = collection
        .as_object()
        .and_then(|map| map.get("fields"))
        .ok_or(FormsError::MissingFields)?;
    let Some(items) = fields.as_array() else {
        return Err(FormsError::FieldsNotAList {
            found: fields.kind_name(),
        });
    };

    validator.validate_fields(items).map_err(FormsError::from)
}

fn resolve_blocks(choices: &[ConfigValue]) -> Vec<ConfigValue> {
    let mut blocks = Vec::with_capacity(choices.len());
    for (index, choice) in choices.iter().enumerate() {
        match choice {
            ConfigValue::String(slug) => match BuiltinBlock::parse(slug) {
                Some(block) => blocks.push(block.definition()),
                None => tracing::warn!(index, slug = %slug, "unknown form block; skipping"),
            },
            ConfigValue::Object(map) if is_block_config(map) => blocks.push(choice.clone()),
            other => {
                tracing::warn!(index, kind = other.kind_name(), "invalid form block; skipping");
            },
        }
    }
    blocks
}

fn is_block_config(map: &ConfigMap) -> bool {
    let has_slug = map
        .get("slug")
        .and_then(ConfigValue::as_str)
        .is_some_and(|slug| !slug.is_empty());
    let has_fields = map.get("fields").and_then(ConfigValue::as_array).is_some();
    has_slug && has_fields
}

fn capability(name: &str) -> serde_json::Value {
    json!({ "$capability": name })
}

fn blocks_field(blocks: Vec<ConfigValue>) -> ConfigValue {
    let mut field = ConfigMap::new();
    field.insert("name".to_string(), ConfigValue::from("fields"));
    field.insert("type".to_string(), ConfigValue::from("blocks"));
    field.insert("blocks".to_string(), ConfigValue::Array(blocks));
    ConfigValue::Object(field)
}

fn confirmation_type() -> ConfigValue {
    ConfigValue::from(json!({
        "name": "confirmationType",
        "type": "radio",
        "admin": {
            "description": "Choose whether to display an on-page message or redirect to a different page after they submit the form.",
            "layout": "horizontal",
        },
        "options": [
            { "label": "Message", "value": "message" },
            { "label": "Redirect", "value": "redirect" },
        ],
        "defaultValue": "message",
    }))
}

fn confirmation_message() -> ConfigValue {
    ConfigValue::from(json!({
        "name": "confirmationMessage",
        "type": "richText",
        "required": true,
        "admin": { "condition": capability(capabilities::CONFIRMATION_IS_MESSAGE) },
    }))
}

fn redirect(relationships: &[String]) -> ConfigValue {
    ConfigValue::from(json!({
        "name": "redirect",
        "type": "group",
        "admin": {
            "hideGutter": true,
            "condition": capability(capabilities::CONFIRMATION_IS_REDIRECT),
        },
        "fields": [
            {
                "name": "type",
                "type": "radio",
                "options": [
                    { "label": "Internal link", "value": "reference" },
                    { "label": "Custom URL", "value": "custom" },
                ],
                "defaultValue": "reference",
                "admin": { "layout": "horizontal" },
            },
            {
                "name": "reference",
                "label": "Document to link to",
                "type": "relationship",
                "relationTo": relationships,
                "required": true,
                "maxDepth": 2,
                "admin": { "condition": capability(capabilities::REDIRECT_IS_REFERENCE) },
            },
            {
                "name": "url",
                "label": "Custom URL",
                "type": "text",
                "required": true,
                "admin": { "condition": capability(capabilities::REDIRECT_IS_CUSTOM) },
            },
        ],
    }))
}

fn emails() -> ConfigValue {
    let half = |name: &str, label: &str| {
        json!({ "type": "text", "name": name, "label": label, "admin": { "width": "50%" } })
    };
    let mut email_to = half("emailTo", "Email To");
    if let Some(map) = email_to.as_object_mut() {
        map.insert("required".to_string(), json!(true));
    }
    let mut email_from = half("emailFrom", "Email From");
    if let Some(admin) = email_from.get_mut("admin").and_then(serde_json::Value::as_object_mut) {
        admin.insert("placeholder".to_string(), json!("{{email}}"));
    }

    ConfigValue::from(json!({
        "name": "emails",
        "type": "array",
        "admin": {
            "description": "Send custom emails upon form submission. Use a comma separated list to send the same email to multiple recipients. To reference a value from this form, wrap that field's name with double curly brackets, i.e. {{firstName}}. Use {{allFields}} to include all fields.",
        },
        "fields": [
            { "type": "row", "fields": [email_to, email_from] },
            { "type": "row", "fields": [half("replyTo", "Reply To"), half("bcc", "BCC")] },
            {
                "type": "text",
                "name": "subject",
                "label": "Subject",
                "defaultValue": "You've received a new message.",
                "required": true,
            },
            {
                "type": "richText",
                "name": "message",
                "label": "Message",
                "admin": {
                    "description": "Enter the email message that should be sent in this email.",
                },
            },
        ],
    }))
}
