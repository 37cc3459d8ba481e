//! Declarative rule vocabulary.
//!
//! Every field variant, and every nested object a variant owns (`admin`,
//! `hooks`, tab descriptors, block definitions, ...), is described by a static
//! [`ObjectRules`] value. The walker interprets these tables and holds no
//! variant-specific logic of its own.

use fieldset_domain::{ConfigMap, ConfigValue};

/// Accepted value shape for one attribute.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Anything.
    Any,
    /// `true` or `false`.
    Bool,
    /// Exactly the given boolean.
    BoolLiteral(bool),
    /// Any number.
    Number,
    /// Non-empty string.
    Text,
    /// Any string, empty included.
    TextOrEmpty,
    /// Non-empty string or number.
    Date,
    /// Capability handle.
    Capability,
    /// Component reference descriptor.
    Component,
    /// Mapping of locale code to text.
    LocaleMap,
    /// Free-form mapping.
    Mapping,
    /// One of the listed strings.
    Enum(&'static [&'static str]),
    /// First matching alternative; the label describes the union.
    OneOf(&'static str, &'static [Self]),
    /// List with element shape and length bounds.
    List {
        /// Element shape.
        item: &'static Self,
        /// Minimum length.
        min: usize,
        /// Maximum length.
        max: Option<usize>,
    },
    /// Mapping of arbitrary keys to one shape.
    MapOf(&'static Self),
    /// Closed nested object.
    Object(&'static ObjectRules),
    /// Select/radio options: non-empty strings or option objects, at least one.
    Options(&'static ObjectRules),
    /// Nested field list, validated recursively.
    Fields,
}

impl Shape {
    /// Unbounded list of `item`.
    #[must_use]
    pub const fn list_of(item: &'static Self) -> Self {
        Self::List {
            item,
            min: 0,
            max: None,
        }
    }

    /// Human-readable description used in type mismatch messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Any => "any value".to_string(),
            Self::Bool => "boolean".to_string(),
            Self::BoolLiteral(value) => format!("literal {value}"),
            Self::Number => "number".to_string(),
            Self::Text => "non-empty string".to_string(),
            Self::TextOrEmpty => "string".to_string(),
            Self::Date => "date string or timestamp".to_string(),
            Self::Capability => "capability".to_string(),
            Self::Component => "component reference".to_string(),
            Self::LocaleMap => "locale map".to_string(),
            Self::Mapping | Self::MapOf(_) => "mapping".to_string(),
            Self::Enum(allowed) => format!("one of: {}", allowed.join(", ")),
            Self::OneOf(label, _) => (*label).to_string(),
            Self::List { item, .. } => format!("list of {}", item.describe()),
            Self::Object(rules) => format!("{} mapping", rules.label),
            Self::Options(_) => "list of options".to_string(),
            Self::Fields => "list of fields".to_string(),
        }
    }

    /// Returns true when `value` has the kind this shape could accept.
    ///
    /// Used to pick which alternative of a union explains a failure.
    #[must_use]
    pub fn accepts_kind(&self, value: &ConfigValue) -> bool {
        match self {
            Self::Any => true,
            Self::Bool | Self::BoolLiteral(_) => matches!(value, ConfigValue::Bool(_)),
            Self::Number => matches!(value, ConfigValue::Number(_)),
            Self::Text | Self::TextOrEmpty | Self::Enum(_) => {
                matches!(value, ConfigValue::String(_))
            },
            Self::Date => matches!(value, ConfigValue::String(_) | ConfigValue::Number(_)),
            Self::Capability => matches!(value, ConfigValue::Capability(_)),
            Self::Component => matches!(
                value,
                ConfigValue::String(_) | ConfigValue::Object(_) | ConfigValue::Capability(_)
            ),
            Self::LocaleMap | Self::Mapping | Self::MapOf(_) | Self::Object(_) => {
                value.is_object()
            },
            Self::List { .. } | Self::Options(_) | Self::Fields => {
                matches!(value, ConfigValue::Array(_))
            },
            Self::OneOf(_, alternatives) => alternatives
                .iter()
                .any(|alternative| alternative.accepts_kind(value)),
        }
    }
}

/// Whether an attribute must, may, or must not appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// May appear.
    Optional,
    /// Must appear.
    Required,
    /// Must not appear, overriding an inherited attribute.
    Forbidden,
}

/// Value injected for an absent attribute.
#[derive(Debug, Clone, Copy)]
pub enum DefaultValue {
    /// Boolean literal.
    Bool(bool),
    /// String literal.
    Text(&'static str),
    /// `[]`.
    EmptyList,
    /// `{}`.
    EmptyMap,
    /// `{}` filled with the object's own defaults.
    Object(&'static ObjectRules),
}

impl DefaultValue {
    /// Build the concrete value.
    #[must_use]
    pub fn materialize(self) -> ConfigValue {
        match self {
            Self::Bool(value) => ConfigValue::Bool(value),
            Self::Text(value) => ConfigValue::from(value),
            Self::EmptyList => ConfigValue::Array(Vec::new()),
            Self::EmptyMap => ConfigValue::Object(ConfigMap::new()),
            Self::Object(rules) => ConfigValue::Object(crate::defaults::defaults_for(rules)),
        }
    }
}

/// Rule for one attribute.
#[derive(Debug, Clone, Copy)]
pub struct AttrSpec {
    /// Attribute name.
    pub name: &'static str,
    /// Accepted shape.
    pub shape: &'static Shape,
    /// Presence requirement.
    pub presence: Presence,
    /// Default for an absent attribute.
    pub default: Option<DefaultValue>,
    /// Deprecation note; presence of the attribute yields a warning.
    pub deprecated: Option<&'static str>,
}

impl AttrSpec {
    /// Optional attribute.
    #[must_use]
    pub const fn optional(name: &'static str, shape: &'static Shape) -> Self {
        Self {
            name,
            shape,
            presence: Presence::Optional,
            default: None,
            deprecated: None,
        }
    }

    /// Required attribute.
    #[must_use]
    pub const fn required(name: &'static str, shape: &'static Shape) -> Self {
        Self {
            presence: Presence::Required,
            ..Self::optional(name, shape)
        }
    }

    /// Attribute that must not appear.
    #[must_use]
    pub const fn forbidden(name: &'static str) -> Self {
        Self {
            presence: Presence::Forbidden,
            ..Self::optional(name, &Shape::Any)
        }
    }

    /// Attach a default.
    #[must_use]
    pub const fn with_default(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Mark as deprecated with a replacement note.
    #[must_use]
    pub const fn deprecated(self, note: &'static str) -> Self {
        Self {
            deprecated: Some(note),
            ..self
        }
    }
}

/// Condition tested against the attribute a rule depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The attribute is anything but the literal `true` (absence included).
    IsNotTrue,
    /// The attribute is absent.
    Absent,
    /// The attribute is present, whatever its value.
    Present,
}

impl Predicate {
    /// Phrase used in diagnostics, e.g. `unless "hasMany" is true`.
    #[must_use]
    pub fn describe(self, depends_on: &str) -> String {
        match self {
            Self::IsNotTrue => format!("unless \"{depends_on}\" is true"),
            Self::Absent => format!("when \"{depends_on}\" is absent"),
            Self::Present => format!("when \"{depends_on}\" is present"),
        }
    }
}

/// Effect applied to the subject when the predicate holds.
#[derive(Debug, Clone, Copy)]
pub enum Consequence {
    /// Subject must be present.
    Required,
    /// Subject must be absent.
    Forbidden,
    /// Subject defaults to the value when absent.
    Default(DefaultValue),
}

/// Cross-attribute constraint.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalRule {
    /// Attribute the consequence applies to.
    pub subject: &'static str,
    /// Attribute the predicate inspects.
    pub depends_on: &'static str,
    /// Condition.
    pub predicate: Predicate,
    /// Effect.
    pub consequence: Consequence,
}

impl ConditionalRule {
    /// `subject` is forbidden unless `depends_on` is exactly `true`.
    #[must_use]
    pub const fn forbidden_unless_true(subject: &'static str, depends_on: &'static str) -> Self {
        Self {
            subject,
            depends_on,
            predicate: Predicate::IsNotTrue,
            consequence: Consequence::Forbidden,
        }
    }

    /// `subject` is required when `depends_on` is absent.
    #[must_use]
    pub const fn required_when_absent(subject: &'static str, depends_on: &'static str) -> Self {
        Self {
            subject,
            depends_on,
            predicate: Predicate::Absent,
            consequence: Consequence::Required,
        }
    }

    /// `subject` is required when `depends_on` is present.
    #[must_use]
    pub const fn required_when_present(subject: &'static str, depends_on: &'static str) -> Self {
        Self {
            subject,
            depends_on,
            predicate: Predicate::Present,
            consequence: Consequence::Required,
        }
    }

    /// `subject` is forbidden when `depends_on` is absent.
    #[must_use]
    pub const fn forbidden_when_absent(subject: &'static str, depends_on: &'static str) -> Self {
        Self {
            subject,
            depends_on,
            predicate: Predicate::Absent,
            consequence: Consequence::Forbidden,
        }
    }
}

/// Rule set for a closed object.
#[derive(Debug)]
pub struct ObjectRules {
    /// Plural noun used in messages, e.g. `checkbox fields`.
    pub label: &'static str,
    /// Attributes declared here; they shadow inherited ones of the same name.
    pub attrs: &'static [AttrSpec],
    /// Inherited rule set.
    pub base: Option<&'static Self>,
    /// Cross-attribute constraints.
    pub conditions: &'static [ConditionalRule],
}

impl ObjectRules {
    /// Resolve an attribute, own declarations first.
    #[must_use]
    pub fn attr(&'static self, name: &str) -> Option<&'static AttrSpec> {
        self.attrs
            .iter()
            .find(|spec| spec.name == name)
            .or_else(|| self.base.and_then(|base| base.attr(name)))
    }

    /// Every effective attribute, sorted by name.
    #[must_use]
    pub fn specs(&'static self) -> Vec<&'static AttrSpec> {
        let mut specs: Vec<&'static AttrSpec> = self.attrs.iter().collect();
        if let Some(base) = self.base {
            for inherited in base.specs() {
                if !specs.iter().any(|spec| spec.name == inherited.name) {
                    specs.push(inherited);
                }
            }
        }
        specs.sort_by_key(|spec| spec.name);
        specs
    }

    /// Constraints declared here and on every base.
    #[must_use]
    pub fn all_conditions(&'static self) -> Vec<&'static ConditionalRule> {
        let mut rules: Vec<&'static ConditionalRule> = self.conditions.iter().collect();
        if let Some(base) = self.base {
            rules.extend(base.all_conditions());
        }
        rules
    }
}
