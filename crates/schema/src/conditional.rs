//! Cross-attribute constraint evaluation.

use crate::rules::{ConditionalRule, Consequence, DefaultValue, ObjectRules, Predicate};
use fieldset_domain::{ConfigMap, ConfigValue};

/// Returns true when `predicate` holds for `value`.
#[must_use]
pub fn holds(predicate: Predicate, value: Option<&ConfigValue>) -> bool {
    match predicate {
        Predicate::IsNotTrue => !value.is_some_and(ConfigValue::is_true),
        Predicate::Absent => value.is_none(),
        Predicate::Present => value.is_some(),
    }
}

/// Constraints that apply to one object, given its authored attributes.
///
/// Evaluated against the input before any default is injected, so an absent
/// `hasMany` counts as "not true" even though it later defaults to `false`.
#[derive(Debug, Default)]
pub struct Effects {
    required: Vec<&'static ConditionalRule>,
    forbidden: Vec<&'static ConditionalRule>,
    defaults: Vec<(&'static str, DefaultValue)>,
}

impl Effects {
    /// Evaluate every constraint of `rules` against `attributes`.
    #[must_use]
    pub fn evaluate(rules: &'static ObjectRules, attributes: &ConfigMap) -> Self {
        let mut effects = Self::default();
        for rule in rules.all_conditions() {
            if !holds(rule.predicate, attributes.get(rule.depends_on)) {
                continue;
            }
            match rule.consequence {
                Consequence::Required => effects.required.push(rule),
                Consequence::Forbidden => effects.forbidden.push(rule),
                Consequence::Default(value) => effects.defaults.push((rule.subject, value)),
            }
        }
        effects
    }

    /// Active rule forbidding `name`, if any.
    #[must_use]
    pub fn forbidding(&self, name: &str) -> Option<&'static ConditionalRule> {
        self.forbidden
            .iter()
            .copied()
            .find(|rule| rule.subject == name)
    }

    /// Returns true when `name` is forbidden.
    #[must_use]
    pub fn forbids(&self, name: &str) -> bool {
        self.forbidding(name).is_some()
    }

    /// Active rules requiring a subject.
    #[must_use]
    pub fn required(&self) -> &[&'static ConditionalRule] {
        &self.required
    }

    /// Active conditional defaults.
    #[must_use]
    pub fn defaults(&self) -> &[(&'static str, DefaultValue)] {
        &self.defaults
    }
}
