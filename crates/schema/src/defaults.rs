//! Default injection.

use crate::conditional::Effects;
use crate::rules::{ObjectRules, Presence};
use fieldset_domain::ConfigMap;

/// Fill absent attributes with their declared defaults.
///
/// Runs after closed-set and conditional checks. Attributes that are present,
/// statically forbidden, or forbidden by an active constraint are left alone.
pub fn inject(rules: &'static ObjectRules, attributes: &mut ConfigMap, effects: &Effects) {
    for spec in rules.specs() {
        let Some(default) = spec.default else {
            continue;
        };
        if spec.presence == Presence::Forbidden
            || effects.forbids(spec.name)
            || attributes.contains_key(spec.name)
        {
            continue;
        }
        attributes.insert(spec.name.to_string(), default.materialize());
    }

    for (subject, default) in effects.defaults() {
        if !attributes.contains_key(*subject) && !effects.forbids(subject) {
            attributes.insert((*subject).to_string(), default.materialize());
        }
    }
}

/// Defaults of an object that was not authored at all.
#[must_use]
pub fn defaults_for(rules: &'static ObjectRules) -> ConfigMap {
    let mut attributes = ConfigMap::new();
    let effects = Effects::evaluate(rules, &attributes);
    inject(rules, &mut attributes, &effects);
    attributes
}
