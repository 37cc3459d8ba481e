//! Per-variant rule table.
//!
//! Adding a field variant means adding its rule set here and a match arm in
//! [`rules_for`]. Nested objects that other attributes point at also get a
//! companion [`Shape::Object`] static (`RULES => SHAPE` in `object!`).

use crate::rules::{AttrSpec, ConditionalRule, DefaultValue, ObjectRules, Shape};
use fieldset_domain::FieldType;

macro_rules! object {
    (
        $rules:ident $(=> $shape:ident)?, $label:literal,
        base: $base:expr,
        attrs: [$($attr:expr),* $(,)?]
        $(, conditions: [$($condition:expr),* $(,)?])? $(,)?
    ) => {
        static $rules: ObjectRules = ObjectRules {
            label: $label,
            attrs: &[$($attr),*],
            base: $base,
            conditions: &[$($($condition),*)?],
        };
        $(static $shape: Shape = Shape::Object(&$rules);)?
    };
}

const FALSE: DefaultValue = DefaultValue::Bool(false);
const TRUE: DefaultValue = DefaultValue::Bool(true);

const LABEL: Shape = Shape::OneOf("string or locale map", &[Shape::Text, Shape::LocaleMap]);
const FIELD_LABEL: Shape = Shape::OneOf(
    "string, locale map or false",
    &[Shape::Text, Shape::LocaleMap, Shape::BoolLiteral(false)],
);
const DESCRIPTION: Shape = Shape::OneOf(
    "string, locale map or component",
    &[Shape::Text, Shape::LocaleMap, Shape::Component],
);
const TEXT_OR_COMPONENT: Shape =
    Shape::OneOf("string or component", &[Shape::Text, Shape::Component]);
const TEXT_OR_CAPABILITY: Shape =
    Shape::OneOf("string or capability", &[Shape::Text, Shape::Capability]);
const NUMBER_OR_CAPABILITY: Shape =
    Shape::OneOf("number or capability", &[Shape::Number, Shape::Capability]);
const BOOL_OR_CAPABILITY: Shape =
    Shape::OneOf("boolean or capability", &[Shape::Bool, Shape::Capability]);
const MAPPING_OR_CAPABILITY: Shape =
    Shape::OneOf("mapping or capability", &[Shape::Mapping, Shape::Capability]);
const ROWS_OR_CAPABILITY: Shape = Shape::OneOf(
    "list of mappings or capability",
    &[
        Shape::List {
            item: &Shape::Mapping,
            min: 0,
            max: None,
        },
        Shape::Capability,
    ],
);
const SAVE_TO_JWT: Shape = Shape::OneOf("boolean or string", &[Shape::Bool, Shape::Text]);
const SIDEBAR: Shape = Shape::Enum(&["sidebar"]);
const CAPABILITY_LIST: Shape = Shape::List {
    item: &Shape::Capability,
    min: 0,
    max: None,
};
const COMPONENT_LIST: Shape = Shape::List {
    item: &Shape::Component,
    min: 0,
    max: None,
};

const NAME: AttrSpec = AttrSpec::required("name", &Shape::Text);
const MAX_LENGTH: AttrSpec = AttrSpec::optional("maxLength", &Shape::Number);
const MIN_LENGTH: AttrSpec = AttrSpec::optional("minLength", &Shape::Number);
const MAX_ROWS: AttrSpec = AttrSpec::optional("maxRows", &Shape::Number);
const MIN_ROWS: AttrSpec = AttrSpec::optional("minRows", &Shape::Number);
const HAS_MANY: AttrSpec = AttrSpec::optional("hasMany", &Shape::Bool).with_default(FALSE);
const INTERFACE_NAME: AttrSpec = AttrSpec::optional("interfaceName", &Shape::Text);
const FIELDS: AttrSpec = AttrSpec::optional("fields", &Shape::Fields);

// -----------------------------------------------------------------------------
// Shared nested objects
// -----------------------------------------------------------------------------

object!(ADMIN_COMPONENTS => ADMIN_COMPONENTS_SHAPE, "admin components",
    base: None,
    attrs: [
        AttrSpec::optional("Cell", &Shape::Component),
        AttrSpec::optional("Field", &Shape::Component),
        AttrSpec::optional("Filter", &Shape::Component),
    ],
);

object!(BASE_ADMIN => BASE_ADMIN_SHAPE, "admin options",
    base: None,
    attrs: [
        AttrSpec::optional("className", &Shape::Text),
        AttrSpec::optional("components", &ADMIN_COMPONENTS_SHAPE)
            .with_default(DefaultValue::Object(&ADMIN_COMPONENTS)),
        AttrSpec::optional("condition", &Shape::Capability),
        AttrSpec::optional("description", &DESCRIPTION),
        AttrSpec::optional("disableBulkEdit", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("disabled", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("hidden", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("initCollapsed", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("position", &SIDEBAR),
        AttrSpec::optional("readOnly", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("style", &Shape::Mapping),
        AttrSpec::optional("width", &Shape::Text),
    ],
);

object!(ACCESS => ACCESS_SHAPE, "access controls",
    base: None,
    attrs: [
        AttrSpec::optional("create", &Shape::Capability),
        AttrSpec::optional("read", &Shape::Capability),
        AttrSpec::optional("update", &Shape::Capability),
    ],
);

object!(HOOKS => HOOKS_SHAPE, "hooks",
    base: None,
    attrs: [
        AttrSpec::optional("afterChange", &CAPABILITY_LIST).with_default(DefaultValue::EmptyList),
        AttrSpec::optional("afterRead", &CAPABILITY_LIST).with_default(DefaultValue::EmptyList),
        AttrSpec::optional("beforeChange", &CAPABILITY_LIST).with_default(DefaultValue::EmptyList),
        AttrSpec::optional("beforeValidate", &CAPABILITY_LIST).with_default(DefaultValue::EmptyList),
    ],
);

object!(LABELS => LABELS_SHAPE, "labels",
    base: None,
    attrs: [
        AttrSpec::optional("plural", &LABEL),
        AttrSpec::optional("singular", &LABEL),
    ],
);

/// Attributes shared by every variant except `ui`.
pub static FIELD_BASE: ObjectRules = ObjectRules {
    label: "fields",
    attrs: &[
        AttrSpec::optional("access", &ACCESS_SHAPE).with_default(DefaultValue::Object(&ACCESS)),
        AttrSpec::optional("admin", &BASE_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&BASE_ADMIN)),
        AttrSpec::optional("custom", &Shape::Mapping),
        AttrSpec::optional("description", &DESCRIPTION),
        AttrSpec::optional("hidden", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("hooks", &HOOKS_SHAPE).with_default(DefaultValue::Object(&HOOKS)),
        AttrSpec::optional("index", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("label", &FIELD_LABEL),
        AttrSpec::optional("localized", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("required", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("saveToJWT", &SAVE_TO_JWT).with_default(FALSE),
        AttrSpec::optional("unique", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("validate", &Shape::Capability),
    ],
    base: None,
    conditions: &[],
};

/// Custom identifier field: `text` or `number`, named `id`, never localized,
/// always required.
pub static ID_FIELD: ObjectRules = ObjectRules {
    label: "custom id fields",
    attrs: &[
        AttrSpec::optional("localized", &Shape::BoolLiteral(false)).with_default(FALSE),
        AttrSpec::optional("name", &Shape::Enum(&["id"])),
        AttrSpec::optional("required", &Shape::BoolLiteral(true)).with_default(TRUE),
    ],
    base: Some(&FIELD_BASE),
    conditions: &[],
};

// -----------------------------------------------------------------------------
// Scalar inputs
// -----------------------------------------------------------------------------

object!(TEXT_ADMIN => TEXT_ADMIN_SHAPE, "text admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("autoComplete", &Shape::Text),
        AttrSpec::optional("placeholder", &LABEL),
        AttrSpec::optional("rtl", &Shape::Bool),
    ],
);

object!(TEXT, "text fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &TEXT_ADMIN_SHAPE).with_default(DefaultValue::Object(&TEXT_ADMIN)),
        AttrSpec::optional("defaultValue", &TEXT_OR_CAPABILITY),
        MAX_LENGTH,
        MIN_LENGTH,
        NAME,
    ],
);

object!(NUMBER_ADMIN => NUMBER_ADMIN_SHAPE, "number admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("autoComplete", &Shape::Text),
        AttrSpec::optional("placeholder", &Shape::Text),
        AttrSpec::optional("step", &Shape::Number),
    ],
);

object!(NUMBER, "number fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &NUMBER_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&NUMBER_ADMIN)),
        AttrSpec::optional("defaultValue", &NUMBER_OR_CAPABILITY),
        HAS_MANY,
        AttrSpec::optional("max", &Shape::Number),
        MAX_ROWS,
        AttrSpec::optional("min", &Shape::Number),
        MIN_ROWS,
        NAME,
    ],
    conditions: [
        ConditionalRule::forbidden_unless_true("maxRows", "hasMany"),
        ConditionalRule::forbidden_unless_true("minRows", "hasMany"),
    ],
);

object!(TEXTAREA_ADMIN => TEXTAREA_ADMIN_SHAPE, "textarea admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("placeholder", &LABEL),
        AttrSpec::optional("rows", &Shape::Number),
        AttrSpec::optional("rtl", &Shape::Bool),
    ],
);

object!(TEXTAREA, "textarea fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &TEXTAREA_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&TEXTAREA_ADMIN)),
        AttrSpec::optional("defaultValue", &TEXT_OR_CAPABILITY),
        MAX_LENGTH,
        MIN_LENGTH,
        NAME,
    ],
);

object!(EMAIL_ADMIN => EMAIL_ADMIN_SHAPE, "email admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("autoComplete", &Shape::Text),
        AttrSpec::optional("placeholder", &LABEL),
    ],
);

object!(EMAIL, "email fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &EMAIL_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&EMAIL_ADMIN)),
        AttrSpec::optional("defaultValue", &TEXT_OR_CAPABILITY),
        MAX_LENGTH,
        MIN_LENGTH,
        NAME,
    ],
);

object!(CODE_ADMIN => CODE_ADMIN_SHAPE, "code admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("editorOptions", &Shape::Mapping),
        AttrSpec::optional("language", &Shape::Text),
    ],
);

object!(CODE, "code fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &CODE_ADMIN_SHAPE).with_default(DefaultValue::Object(&CODE_ADMIN)),
        AttrSpec::optional("defaultValue", &TEXT_OR_CAPABILITY),
        MAX_LENGTH,
        MIN_LENGTH,
        NAME,
    ],
);

object!(JSON, "json fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional(
            "defaultValue",
            &Shape::OneOf(
                "list or mapping",
                &[
                    Shape::List {
                        item: &Shape::Any,
                        min: 0,
                        max: None,
                    },
                    Shape::Mapping,
                ],
            ),
        ),
        NAME,
    ],
);

object!(CHECKBOX, "checkbox fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("defaultValue", &BOOL_OR_CAPABILITY),
        NAME,
    ],
);

object!(POINT, "point fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional(
            "defaultValue",
            &Shape::OneOf(
                "pair of numbers or capability",
                &[
                    Shape::List {
                        item: &Shape::Number,
                        min: 2,
                        max: Some(2),
                    },
                    Shape::Capability,
                ],
            ),
        ),
        NAME,
    ],
);

object!(DATE_PICKER => DATE_PICKER_SHAPE, "date picker options",
    base: None,
    attrs: [
        AttrSpec::optional("displayFormat", &Shape::Text),
        AttrSpec::optional("maxDate", &Shape::Date),
        AttrSpec::optional("maxTime", &Shape::Date),
        AttrSpec::optional("minDate", &Shape::Date),
        AttrSpec::optional("minTime", &Shape::Date),
        AttrSpec::optional("monthsToShow", &Shape::Number),
        AttrSpec::optional("pickerAppearance", &Shape::Text),
        AttrSpec::optional("timeFormat", &Shape::Text),
        AttrSpec::optional("timeIntervals", &Shape::Number),
    ],
);

object!(DATE_ADMIN => DATE_ADMIN_SHAPE, "date admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("date", &DATE_PICKER_SHAPE),
        AttrSpec::optional("placeholder", &LABEL),
    ],
);

object!(DATE, "date fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &DATE_ADMIN_SHAPE).with_default(DefaultValue::Object(&DATE_ADMIN)),
        AttrSpec::optional("defaultValue", &TEXT_OR_CAPABILITY),
        NAME,
    ],
);

// -----------------------------------------------------------------------------
// Choices
// -----------------------------------------------------------------------------

object!(SELECT_OPTION, "select options",
    base: None,
    attrs: [
        AttrSpec::optional("label", &LABEL),
        AttrSpec::required("value", &Shape::TextOrEmpty),
    ],
);

object!(SELECT_ADMIN => SELECT_ADMIN_SHAPE, "select admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("isClearable", &Shape::Bool).with_default(FALSE),
        AttrSpec::optional("isSortable", &Shape::Bool).with_default(FALSE),
    ],
);

static SELECT_OPTIONS: Shape = Shape::Options(&SELECT_OPTION);

object!(SELECT, "select fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &SELECT_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&SELECT_ADMIN)),
        AttrSpec::optional(
            "defaultValue",
            &Shape::OneOf(
                "string, list of strings or capability",
                &[
                    Shape::TextOrEmpty,
                    Shape::List {
                        item: &Shape::TextOrEmpty,
                        min: 0,
                        max: None,
                    },
                    Shape::Capability,
                ],
            ),
        ),
        HAS_MANY,
        NAME,
        AttrSpec::required("options", &SELECT_OPTIONS),
    ],
);

object!(RADIO_OPTION, "radio options",
    base: None,
    attrs: [
        AttrSpec::required("label", &LABEL),
        AttrSpec::required("value", &Shape::TextOrEmpty),
    ],
);

object!(RADIO_ADMIN => RADIO_ADMIN_SHAPE, "radio admin options",
    base: Some(&BASE_ADMIN),
    attrs: [AttrSpec::optional("layout", &Shape::Enum(&["horizontal", "vertical"]))],
);

static RADIO_OPTIONS: Shape = Shape::Options(&RADIO_OPTION);

object!(RADIO, "radio fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &RADIO_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&RADIO_ADMIN)),
        AttrSpec::optional(
            "defaultValue",
            &Shape::OneOf("string or capability", &[Shape::TextOrEmpty, Shape::Capability]),
        ),
        NAME,
        AttrSpec::required("options", &RADIO_OPTIONS),
    ],
);

// -----------------------------------------------------------------------------
// Containers
// -----------------------------------------------------------------------------

object!(ROW, "row fields",
    base: Some(&FIELD_BASE),
    attrs: [FIELDS],
);

object!(COLLAPSIBLE, "collapsible fields",
    base: Some(&FIELD_BASE),
    attrs: [FIELDS, AttrSpec::optional("label", &TEXT_OR_COMPONENT)],
);

object!(GROUP_ADMIN => GROUP_ADMIN_SHAPE, "group admin options",
    base: Some(&BASE_ADMIN),
    attrs: [AttrSpec::optional("hideGutter", &Shape::Bool).with_default(TRUE)],
);

object!(GROUP, "group fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &GROUP_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&GROUP_ADMIN)),
        AttrSpec::optional("defaultValue", &MAPPING_OR_CAPABILITY),
        FIELDS,
        INTERFACE_NAME,
        NAME,
    ],
);

object!(ARRAY_ADMIN_COMPONENTS => ARRAY_ADMIN_COMPONENTS_SHAPE, "array admin components",
    base: Some(&ADMIN_COMPONENTS),
    attrs: [AttrSpec::optional("RowLabel", &Shape::Component)],
);

object!(ARRAY_ADMIN => ARRAY_ADMIN_SHAPE, "array admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("components", &ARRAY_ADMIN_COMPONENTS_SHAPE)
            .with_default(DefaultValue::Object(&ARRAY_ADMIN_COMPONENTS)),
    ],
);

object!(ARRAY, "array fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &ARRAY_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&ARRAY_ADMIN)),
        AttrSpec::optional("defaultValue", &ROWS_OR_CAPABILITY),
        AttrSpec::required("fields", &Shape::Fields),
        INTERFACE_NAME,
        AttrSpec::optional("labels", &LABELS_SHAPE),
        MAX_ROWS,
        MIN_ROWS,
        NAME,
    ],
);

object!(TAB => TAB_SHAPE, "tab descriptors",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("description", &TEXT_OR_COMPONENT),
        AttrSpec::required("fields", &Shape::Fields),
        INTERFACE_NAME,
        AttrSpec::optional("label", &LABEL),
        AttrSpec::optional("localized", &Shape::Bool),
        AttrSpec::optional("name", &Shape::Text),
        AttrSpec::optional("saveToJWT", &SAVE_TO_JWT),
    ],
    conditions: [
        ConditionalRule::forbidden_when_absent("interfaceName", "name"),
        ConditionalRule::required_when_absent("label", "name"),
        ConditionalRule::required_when_present("name", "localized"),
    ],
);

object!(TABS_ADMIN => TABS_ADMIN_SHAPE, "tabs admin options",
    base: Some(&BASE_ADMIN),
    attrs: [AttrSpec::forbidden("description")],
);

static TAB_LIST: Shape = Shape::list_of(&TAB_SHAPE);

object!(TABS, "tabs fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &TABS_ADMIN_SHAPE).with_default(DefaultValue::Object(&TABS_ADMIN)),
        AttrSpec::forbidden("fields"),
        AttrSpec::forbidden("localized"),
        AttrSpec::required("tabs", &TAB_LIST),
    ],
);

object!(GRAPHQL => GRAPHQL_SHAPE, "graphQL options",
    base: None,
    attrs: [AttrSpec::optional("singularName", &Shape::Text)],
);

object!(BLOCK => BLOCK_SHAPE, "block definitions",
    base: None,
    attrs: [
        FIELDS,
        AttrSpec::optional("graphQL", &GRAPHQL_SHAPE),
        AttrSpec::optional("imageAltText", &Shape::Text),
        AttrSpec::optional("imageURL", &Shape::Text),
        INTERFACE_NAME,
        AttrSpec::optional("labels", &LABELS_SHAPE),
        AttrSpec::required("slug", &Shape::Text),
    ],
);

static BLOCK_LIST: Shape = Shape::list_of(&BLOCK_SHAPE);

object!(BLOCKS, "blocks fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::required("blocks", &BLOCK_LIST),
        AttrSpec::optional("defaultValue", &ROWS_OR_CAPABILITY),
        AttrSpec::optional("labels", &LABELS_SHAPE),
        MAX_ROWS,
        MIN_ROWS,
        NAME,
    ],
);

// -----------------------------------------------------------------------------
// References
// -----------------------------------------------------------------------------

object!(UPLOAD, "upload fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("defaultValue", &MAPPING_OR_CAPABILITY),
        AttrSpec::optional("filterOptions", &MAPPING_OR_CAPABILITY),
        AttrSpec::optional("maxDepth", &Shape::Number),
        NAME,
        AttrSpec::required("relationTo", &Shape::Text),
    ],
);

object!(RELATIONSHIP_ADMIN => RELATIONSHIP_ADMIN_SHAPE, "relationship admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("allowCreate", &Shape::Bool).with_default(TRUE),
        AttrSpec::optional("isSortable", &Shape::Bool).with_default(FALSE),
    ],
);

object!(RELATIONSHIP, "relationship fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &RELATIONSHIP_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&RELATIONSHIP_ADMIN)),
        AttrSpec::optional("defaultValue", &Shape::Capability),
        AttrSpec::optional("filterOptions", &MAPPING_OR_CAPABILITY),
        HAS_MANY,
        AttrSpec::optional("max", &Shape::Number).deprecated("Use maxRows instead."),
        AttrSpec::optional("maxDepth", &Shape::Number),
        MAX_ROWS,
        AttrSpec::optional("min", &Shape::Number).deprecated("Use minRows instead."),
        MIN_ROWS,
        NAME,
        AttrSpec::optional(
            "relationTo",
            &Shape::OneOf(
                "string or list of strings",
                &[
                    Shape::Text,
                    Shape::List {
                        item: &Shape::Text,
                        min: 0,
                        max: None,
                    },
                ],
            ),
        ),
    ],
    conditions: [
        ConditionalRule::forbidden_unless_true("max", "hasMany"),
        ConditionalRule::forbidden_unless_true("maxRows", "hasMany"),
        ConditionalRule::forbidden_unless_true("min", "hasMany"),
        ConditionalRule::forbidden_unless_true("minRows", "hasMany"),
    ],
);

// -----------------------------------------------------------------------------
// Rich text
// -----------------------------------------------------------------------------

object!(RICH_TEXT_ELEMENT, "rich text elements",
    base: None,
    attrs: [
        AttrSpec::optional("Button", &Shape::Component),
        AttrSpec::optional("Element", &Shape::Component),
        AttrSpec::required("name", &Shape::Text),
        AttrSpec::optional("plugins", &COMPONENT_LIST),
    ],
);

object!(RICH_TEXT_LEAF, "rich text leaves",
    base: None,
    attrs: [
        AttrSpec::optional("Button", &Shape::Component),
        AttrSpec::optional("Leaf", &Shape::Component),
        AttrSpec::required("name", &Shape::Text),
        AttrSpec::optional("plugins", &COMPONENT_LIST),
    ],
);

static ELEMENT_CHOICES: [Shape; 2] = [Shape::Text, Shape::Object(&RICH_TEXT_ELEMENT)];
static ELEMENT_CHOICE: Shape = Shape::OneOf("element name or definition", &ELEMENT_CHOICES);
static ELEMENT_LIST: Shape = Shape::list_of(&ELEMENT_CHOICE);

static LEAF_CHOICES: [Shape; 2] = [Shape::Text, Shape::Object(&RICH_TEXT_LEAF)];
static LEAF_CHOICE: Shape = Shape::OneOf("leaf name or definition", &LEAF_CHOICES);
static LEAF_LIST: Shape = Shape::list_of(&LEAF_CHOICE);

object!(RICH_TEXT_LINK => RICH_TEXT_LINK_SHAPE, "rich text link options",
    base: None,
    attrs: [
        AttrSpec::optional(
            "fields",
            &Shape::OneOf("list of fields or capability", &[Shape::Fields, Shape::Capability]),
        ),
    ],
);

object!(UPLOAD_COLLECTION => UPLOAD_COLLECTION_SHAPE, "upload collection options",
    base: None,
    attrs: [FIELDS],
);

static UPLOAD_COLLECTIONS: Shape = Shape::MapOf(&UPLOAD_COLLECTION_SHAPE);

object!(RICH_TEXT_UPLOAD => RICH_TEXT_UPLOAD_SHAPE, "rich text upload options",
    base: None,
    attrs: [AttrSpec::optional("collections", &UPLOAD_COLLECTIONS)],
);

object!(RICH_TEXT_ADMIN => RICH_TEXT_ADMIN_SHAPE, "rich text admin options",
    base: Some(&BASE_ADMIN),
    attrs: [
        AttrSpec::optional("elements", &ELEMENT_LIST),
        AttrSpec::optional("hideGutter", &Shape::Bool).with_default(TRUE),
        AttrSpec::optional("leaves", &LEAF_LIST),
        AttrSpec::optional("link", &RICH_TEXT_LINK_SHAPE),
        AttrSpec::optional("placeholder", &LABEL),
        AttrSpec::optional("rtl", &Shape::Bool),
        AttrSpec::optional("upload", &RICH_TEXT_UPLOAD_SHAPE),
    ],
);

object!(RICH_TEXT, "richText fields",
    base: Some(&FIELD_BASE),
    attrs: [
        AttrSpec::optional("admin", &RICH_TEXT_ADMIN_SHAPE)
            .with_default(DefaultValue::Object(&RICH_TEXT_ADMIN)),
        AttrSpec::optional("defaultValue", &ROWS_OR_CAPABILITY),
        NAME,
    ],
);

// -----------------------------------------------------------------------------
// Presentational
// -----------------------------------------------------------------------------

object!(UI_COMPONENTS => UI_COMPONENTS_SHAPE, "ui admin components",
    base: None,
    attrs: [
        AttrSpec::optional("Cell", &Shape::Component),
        AttrSpec::optional("Field", &Shape::Component),
    ],
);

object!(UI_ADMIN => UI_ADMIN_SHAPE, "ui admin options",
    base: None,
    attrs: [
        AttrSpec::optional("components", &UI_COMPONENTS_SHAPE)
            .with_default(DefaultValue::Object(&UI_COMPONENTS)),
        AttrSpec::optional("condition", &Shape::Capability),
        AttrSpec::optional("position", &SIDEBAR),
        AttrSpec::optional("width", &Shape::Text),
    ],
);

object!(UI, "ui fields",
    base: None,
    attrs: [
        AttrSpec::optional("admin", &UI_ADMIN_SHAPE).with_default(DefaultValue::Object(&UI_ADMIN)),
        AttrSpec::optional("custom", &Shape::Mapping),
        AttrSpec::optional("label", &LABEL),
        NAME,
    ],
);

/// Rule set selected by a discriminant.
#[must_use]
pub fn rules_for(field_type: FieldType) -> &'static ObjectRules {
    match field_type {
        FieldType::Array => &ARRAY,
        FieldType::Blocks => &BLOCKS,
        FieldType::Checkbox => &CHECKBOX,
        FieldType::Code => &CODE,
        FieldType::Collapsible => &COLLAPSIBLE,
        FieldType::Date => &DATE,
        FieldType::Email => &EMAIL,
        FieldType::Group => &GROUP,
        FieldType::Json => &JSON,
        FieldType::Number => &NUMBER,
        FieldType::Point => &POINT,
        FieldType::Radio => &RADIO,
        FieldType::Relationship => &RELATIONSHIP,
        FieldType::RichText => &RICH_TEXT,
        FieldType::Row => &ROW,
        FieldType::Select => &SELECT,
        FieldType::Tabs => &TABS,
        FieldType::Text => &TEXT,
        FieldType::Textarea => &TEXTAREA,
        FieldType::Ui => &UI,
        FieldType::Upload => &UPLOAD,
    }
}
