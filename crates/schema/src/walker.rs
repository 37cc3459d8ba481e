//! Recursive descent over field trees.
//!
//! Each call returns the diagnostics of its subtree split into the node's own
//! findings and its descendants' findings. Parents append children after their
//! own records, which yields pre-order output without a shared sink.
//!
//! Descriptor lists (tabs, blocks, upload collections) sit between a node and
//! its children: an entry's own findings stay with the node only until an
//! earlier entry has reported descendants.

use crate::conditional::Effects;
use crate::defaults;
use crate::rules::{AttrSpec, ObjectRules, Presence, Shape};
use crate::table;
use fieldset_domain::{
    ComponentRef, ConfigMap, ConfigValue, Diagnostic, FieldNode, FieldPath, FieldType,
    PathSegment, Rule, TYPE_KEY,
};

/// Diagnostics and node count for one subtree.
#[derive(Debug, Default)]
pub struct Report {
    own: Vec<Diagnostic>,
    nested: Vec<Diagnostic>,
    visited: usize,
}

impl Report {
    fn push(&mut self, diagnostic: Diagnostic) {
        self.own.push(diagnostic);
    }

    /// Merge a report produced for the same node (nested objects, lists).
    fn absorb(&mut self, other: Self) {
        self.own.extend(other.own);
        self.nested.extend(other.nested);
        self.visited += other.visited;
    }

    /// Merge the report of one list or mapping entry, in entry order.
    fn absorb_entry(&mut self, other: Self) {
        if self.nested.is_empty() {
            self.own.extend(other.own);
        } else {
            self.nested.extend(other.own);
        }
        self.nested.extend(other.nested);
        self.visited += other.visited;
    }

    /// Merge a child field's report after everything the node owns.
    fn absorb_child(&mut self, other: Self) {
        self.nested.extend(other.own);
        self.nested.extend(other.nested);
        self.visited += other.visited;
    }

    fn has_errors(&self) -> bool {
        self.own
            .iter()
            .chain(&self.nested)
            .any(Diagnostic::is_error)
    }

    /// Field nodes whose discriminant was examined.
    pub const fn visited(&self) -> usize {
        self.visited
    }

    /// Diagnostics in pre-order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        let mut all = self.own;
        all.extend(self.nested);
        all
    }
}

/// Result of checking one value against one shape.
struct Checked {
    value: ConfigValue,
    report: Report,
}

impl Checked {
    fn accept(value: &ConfigValue) -> Self {
        Self {
            value: value.clone(),
            report: Report::default(),
        }
    }

    fn reject(value: &ConfigValue, path: &FieldPath, rule: Rule, message: String) -> Self {
        let mut report = Report::default();
        report.push(located(path, rule, message));
        Self {
            value: value.clone(),
            report,
        }
    }

    fn mismatch(shape: &Shape, value: &ConfigValue, path: &FieldPath) -> Self {
        Self::reject(
            value,
            path,
            Rule::TypeMismatch,
            format!("expected {}, found {}", shape.describe(), value.kind_name()),
        )
    }
}

/// Outcome for one field node.
pub struct NodeOutcome {
    /// Resolved node, absent when the discriminant could not be resolved.
    pub node: Option<FieldNode>,
    /// Diagnostics for the node and its descendants.
    pub report: Report,
}

/// Stateless tree walker.
#[derive(Debug, Clone, Copy)]
pub struct Walker {
    strict_deprecations: bool,
}

impl Walker {
    pub const fn new(strict_deprecations: bool) -> Self {
        Self {
            strict_deprecations,
        }
    }

    /// Validate one field node and everything below it.
    pub fn field(self, value: &ConfigValue, path: &FieldPath) -> NodeOutcome {
        self.typed_node(value, path, |map, path| {
            resolve_type(map, path).map(|field_type| (field_type, table::rules_for(field_type)))
        })
    }

    /// Validate a custom identifier field.
    pub fn id_field(self, value: &ConfigValue, path: &FieldPath) -> NodeOutcome {
        self.typed_node(value, path, |map, path| {
            let field_type = resolve_type(map, path)?;
            if matches!(field_type, FieldType::Text | FieldType::Number) {
                Ok((field_type, &table::ID_FIELD))
            } else {
                Err(Diagnostic::error(
                    path.key(TYPE_KEY),
                    Rule::UnknownType,
                    format!("custom id fields must be of type text or number, found \"{field_type}\""),
                )
                .with_attribute(TYPE_KEY))
            }
        })
    }

    fn typed_node<F>(self, value: &ConfigValue, path: &FieldPath, resolve: F) -> NodeOutcome
    where
        F: FnOnce(&ConfigMap, &FieldPath) -> Result<(FieldType, &'static ObjectRules), Diagnostic>,
    {
        let mut report = Report {
            visited: 1,
            ..Report::default()
        };
        let Some(map) = value.as_object() else {
            report.push(Diagnostic::error(
                path.clone(),
                Rule::TypeMismatch,
                format!("expected a field mapping, found {}", value.kind_name()),
            ));
            return NodeOutcome { node: None, report };
        };

        let (field_type, rules) = match resolve(map, path) {
            Ok(resolved) => resolved,
            Err(diagnostic) => {
                report.push(diagnostic);
                return NodeOutcome { node: None, report };
            },
        };

        let (attributes, attribute_report) = self.object(rules, map, path, Some(TYPE_KEY));
        report.absorb(attribute_report);
        NodeOutcome {
            node: Some(FieldNode::new(field_type, attributes)),
            report,
        }
    }

    fn object(
        self,
        rules: &'static ObjectRules,
        map: &ConfigMap,
        path: &FieldPath,
        discriminant: Option<&str>,
    ) -> (ConfigMap, Report) {
        let mut report = Report::default();
        let effects = Effects::evaluate(rules, map);

        let mut accepted: Vec<(&String, &ConfigValue, &'static AttrSpec)> = Vec::new();
        for (key, value) in map {
            if discriminant == Some(key.as_str()) {
                continue;
            }
            let attr_path = path.key(key.as_str());
            match rules.attr(key) {
                None => report.push(
                    Diagnostic::error(
                        attr_path,
                        Rule::DisallowedAttribute,
                        format!("\"{key}\" is not allowed on {}", rules.label),
                    )
                    .with_attribute(key.as_str()),
                ),
                Some(spec) if spec.presence == Presence::Forbidden => report.push(
                    Diagnostic::error(
                        attr_path,
                        Rule::ForbiddenAttribute,
                        format!("\"{key}\" is not allowed on {}", rules.label),
                    )
                    .with_attribute(key.as_str()),
                ),
                Some(spec) => match effects.forbidding(key) {
                    Some(rule) => report.push(
                        Diagnostic::error(
                            attr_path,
                            Rule::ForbiddenAttribute,
                            format!(
                                "\"{key}\" is not allowed {}",
                                rule.predicate.describe(rule.depends_on)
                            ),
                        )
                        .with_attribute(key.as_str()),
                    ),
                    None => accepted.push((key, value, spec)),
                },
            }
        }

        for spec in rules.specs() {
            if spec.presence == Presence::Required && !map.contains_key(spec.name) {
                report.push(
                    Diagnostic::error(
                        path.key(spec.name),
                        Rule::MissingAttribute,
                        format!("\"{}\" is required", spec.name),
                    )
                    .with_attribute(spec.name),
                );
            }
        }
        for rule in effects.required() {
            if !map.contains_key(rule.subject) {
                report.push(
                    Diagnostic::error(
                        path.key(rule.subject),
                        Rule::MissingAttribute,
                        format!(
                            "\"{}\" is required {}",
                            rule.subject,
                            rule.predicate.describe(rule.depends_on)
                        ),
                    )
                    .with_attribute(rule.subject),
                );
            }
        }

        let mut attributes = ConfigMap::new();
        for (key, value, spec) in accepted {
            let attr_path = path.key(key.as_str());
            if let Some(note) = spec.deprecated {
                let warning = Diagnostic::warning(
                    attr_path.clone(),
                    Rule::DeprecatedAttribute,
                    format!("\"{key}\" is deprecated. {note}"),
                )
                .with_attribute(key.as_str());
                report.push(if self.strict_deprecations {
                    warning.escalate()
                } else {
                    warning
                });
            }
            let checked = self.shape(spec.shape, value, &attr_path);
            report.absorb(checked.report);
            attributes.insert(key.clone(), checked.value);
        }

        defaults::inject(rules, &mut attributes, &effects);
        (attributes, report)
    }

    fn shape(self, shape: &'static Shape, value: &ConfigValue, path: &FieldPath) -> Checked {
        match shape {
            Shape::Any => Checked::accept(value),
            Shape::Bool
            | Shape::Number
            | Shape::TextOrEmpty
            | Shape::Capability
            | Shape::Mapping => {
                if shape.accepts_kind(value) {
                    Checked::accept(value)
                } else {
                    Checked::mismatch(shape, value, path)
                }
            },
            Shape::BoolLiteral(expected) => match value.as_bool() {
                Some(actual) if actual == *expected => Checked::accept(value),
                Some(_) => Checked::reject(
                    value,
                    path,
                    Rule::InvalidValue,
                    format!("must be {expected}"),
                ),
                None => Checked::mismatch(shape, value, path),
            },
            Shape::Text => match value {
                ConfigValue::String(text) if text.is_empty() => Checked::reject(
                    value,
                    path,
                    Rule::InvalidValue,
                    "must not be empty".to_string(),
                ),
                ConfigValue::String(_) => Checked::accept(value),
                _ => Checked::mismatch(shape, value, path),
            },
            Shape::Date => match value {
                ConfigValue::String(text) if text.is_empty() => Checked::reject(
                    value,
                    path,
                    Rule::InvalidValue,
                    "must not be empty".to_string(),
                ),
                ConfigValue::String(_) | ConfigValue::Number(_) => Checked::accept(value),
                _ => Checked::mismatch(shape, value, path),
            },
            Shape::Enum(allowed) => match value.as_str() {
                Some(text) if allowed.iter().any(|candidate| *candidate == text) => {
                    Checked::accept(value)
                },
                Some(text) => Checked::reject(
                    value,
                    path,
                    Rule::InvalidValue,
                    format!("\"{text}\" must be one of: {}", allowed.join(", ")),
                ),
                None => Checked::mismatch(shape, value, path),
            },
            Shape::Component => match ComponentRef::parse(value) {
                Ok(_) => Checked::accept(value),
                Err(error) => Checked::reject(value, path, Rule::InvalidComponent, error.to_string()),
            },
            Shape::LocaleMap => locale_map(value, path),
            Shape::OneOf(_, alternatives) => self.one_of(shape, alternatives, value, path),
            Shape::List { item, min, max } => self.list(item, *min, *max, value, path),
            Shape::MapOf(item) => self.map_of(item, value, path),
            Shape::Object(rules) => match value {
                ConfigValue::Object(map) => {
                    let (attributes, report) = self.object(rules, map, path, None);
                    Checked {
                        value: ConfigValue::Object(attributes),
                        report,
                    }
                },
                _ => Checked::mismatch(shape, value, path),
            },
            Shape::Options(rules) => self.options(rules, value, path),
            Shape::Fields => self.fields(value, path),
        }
    }

    fn one_of(
        self,
        shape: &'static Shape,
        alternatives: &'static [Shape],
        value: &ConfigValue,
        path: &FieldPath,
    ) -> Checked {
        let mut fallback = None;
        for alternative in alternatives {
            if !alternative.accepts_kind(value) {
                continue;
            }
            let checked = self.shape(alternative, value, path);
            if !checked.report.has_errors() {
                return checked;
            }
            if fallback.is_none() {
                fallback = Some(checked);
            }
        }
        fallback.unwrap_or_else(|| Checked::mismatch(shape, value, path))
    }

    fn list(
        self,
        item: &'static Shape,
        min: usize,
        max: Option<usize>,
        value: &ConfigValue,
        path: &FieldPath,
    ) -> Checked {
        let ConfigValue::Array(items) = value else {
            return Checked::mismatch(&Shape::list_of(item), value, path);
        };

        let mut report = Report::default();
        if items.len() < min {
            report.push(located(
                path,
                Rule::InvalidValue,
                format!("must contain at least {min} item(s)"),
            ));
        }
        if let Some(max) = max {
            if items.len() > max {
                report.push(located(
                    path,
                    Rule::InvalidValue,
                    format!("must contain at most {max} item(s)"),
                ));
            }
        }

        let mut values = Vec::with_capacity(items.len());
        for (index, entry) in items.iter().enumerate() {
            let checked = self.shape(item, entry, &path.index(index));
            report.absorb_entry(checked.report);
            values.push(checked.value);
        }
        Checked {
            value: ConfigValue::Array(values),
            report,
        }
    }

    fn map_of(self, item: &'static Shape, value: &ConfigValue, path: &FieldPath) -> Checked {
        let ConfigValue::Object(map) = value else {
            return Checked::mismatch(&Shape::Mapping, value, path);
        };

        let mut report = Report::default();
        let mut entries = ConfigMap::new();
        for (key, entry) in map {
            let checked = self.shape(item, entry, &path.key(key.as_str()));
            report.absorb_entry(checked.report);
            entries.insert(key.clone(), checked.value);
        }
        Checked {
            value: ConfigValue::Object(entries),
            report,
        }
    }

    fn options(self, rules: &'static ObjectRules, value: &ConfigValue, path: &FieldPath) -> Checked {
        let ConfigValue::Array(entries) = value else {
            return Checked::mismatch(&Shape::Options(rules), value, path);
        };
        if entries.is_empty() {
            return Checked::reject(
                value,
                path,
                Rule::InvalidOptions,
                "must contain at least 1 option".to_string(),
            );
        }

        let mut report = Report::default();
        let mut values = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let entry_path = path.index(index);
            match entry {
                ConfigValue::String(text) if text.is_empty() => report.push(located(
                    &entry_path,
                    Rule::InvalidOptions,
                    "option must not be empty".to_string(),
                )),
                ConfigValue::Object(map) => {
                    let (attributes, entry_report) = self.object(rules, map, &entry_path, None);
                    report.absorb_entry(entry_report);
                    values.push(ConfigValue::Object(attributes));
                    continue;
                },
                ConfigValue::String(_) => {},
                other => report.push(located(
                    &entry_path,
                    Rule::InvalidOptions,
                    format!(
                        "option must be a string or a mapping with \"value\", found {}",
                        other.kind_name()
                    ),
                )),
            }
            values.push(entry.clone());
        }
        Checked {
            value: ConfigValue::Array(values),
            report,
        }
    }

    fn fields(self, value: &ConfigValue, path: &FieldPath) -> Checked {
        let ConfigValue::Array(items) = value else {
            return Checked::mismatch(&Shape::Fields, value, path);
        };

        let mut report = Report::default();
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let outcome = self.field(item, &path.index(index));
            report.absorb_child(outcome.report);
            values.push(
                outcome
                    .node
                    .map_or_else(|| item.clone(), FieldNode::into_value),
            );
        }
        Checked {
            value: ConfigValue::Array(values),
            report,
        }
    }
}

fn resolve_type(map: &ConfigMap, path: &FieldPath) -> Result<FieldType, Diagnostic> {
    let type_path = path.key(TYPE_KEY);
    match map.get(TYPE_KEY) {
        None => Err(Diagnostic::error(
            type_path,
            Rule::MissingAttribute,
            "\"type\" is required",
        )
        .with_attribute(TYPE_KEY)),
        Some(ConfigValue::String(raw)) => raw.parse::<FieldType>().map_err(|error| {
            Diagnostic::error(type_path, Rule::UnknownType, error.to_string())
                .with_attribute(TYPE_KEY)
        }),
        Some(other) => Err(Diagnostic::error(
            type_path,
            Rule::UnknownType,
            format!("field type must be a string, found {}", other.kind_name()),
        )
        .with_attribute(TYPE_KEY)),
    }
}

fn locale_map(value: &ConfigValue, path: &FieldPath) -> Checked {
    let ConfigValue::Object(map) = value else {
        return Checked::mismatch(&Shape::LocaleMap, value, path);
    };
    let mut report = Report::default();
    for (locale, text) in map {
        if text.as_str().is_none() {
            report.push(located(
                &path.key(locale.as_str()),
                Rule::TypeMismatch,
                format!("expected string, found {}", text.kind_name()),
            ));
        }
    }
    Checked {
        value: value.clone(),
        report,
    }
}

/// Error at `path`, tagged with the nearest attribute name.
fn located(path: &FieldPath, rule: Rule, message: String) -> Diagnostic {
    let diagnostic = Diagnostic::error(path.clone(), rule, message);
    match attribute_of(path) {
        Some(attribute) => diagnostic.with_attribute(attribute),
        None => diagnostic,
    }
}

fn attribute_of(path: &FieldPath) -> Option<&str> {
    path.segments().iter().rev().find_map(|segment| match segment {
        PathSegment::Key(key) => Some(key.as_str()),
        PathSegment::Index(_) => None,
    })
}
