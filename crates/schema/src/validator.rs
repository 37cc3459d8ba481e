//! Validation entry points.

use crate::error::ValidationFailure;
use crate::walker::{NodeOutcome, Walker};
use fieldset_domain::{ConfigValue, Diagnostic, Diagnostics, FieldNode, FieldPath, Rule};
use rayon::prelude::*;
use serde::Serialize;

/// Default name of the root list in diagnostic paths.
pub const DEFAULT_ROOT_PATH: &str = "fields";

/// Knobs for one validator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Name of the root list in diagnostic paths.
    pub root_path: String,
    /// Report deprecated attributes as errors instead of warnings.
    pub strict_deprecations: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            root_path: DEFAULT_ROOT_PATH.to_string(),
            strict_deprecations: false,
        }
    }
}

impl ValidatorOptions {
    /// Replace the root path name.
    #[must_use]
    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    /// Toggle strict deprecation handling.
    #[must_use]
    pub const fn with_strict_deprecations(mut self, strict: bool) -> Self {
        self.strict_deprecations = strict;
        self
    }
}

/// Normalized output of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedFields {
    /// Normalized nodes with defaults applied.
    pub fields: Vec<FieldNode>,
    /// Non-fatal findings, in pre-order.
    pub warnings: Vec<Diagnostic>,
    /// Field nodes whose discriminant was examined.
    pub nodes_visited: usize,
}

impl ValidatedFields {
    /// Render the normalized list back into document form.
    #[must_use]
    pub fn into_value(self) -> ConfigValue {
        ConfigValue::Array(self.fields.into_iter().map(FieldNode::into_value).collect())
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the input list was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Field tree validator.
///
/// Holds no per-call state; one instance may validate any number of trees,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    /// Create a validator.
    #[must_use]
    pub const fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Active options.
    #[must_use]
    pub const fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate a document value: a list of fields or a single field.
    ///
    /// A single field mapping is treated as a one-element list, so its path
    /// is still `fields[0]`.
    ///
    /// # Errors
    ///
    /// Returns every error found in the tree, together with any warnings.
    pub fn validate(&self, input: &ConfigValue) -> Result<ValidatedFields, ValidationFailure> {
        match input {
            ConfigValue::Array(items) => self.validate_fields(items),
            ConfigValue::Object(_) => self.validate_fields(std::slice::from_ref(input)),
            other => Err(ValidationFailure {
                errors: vec![Diagnostic::error(
                    self.root(),
                    Rule::TypeMismatch,
                    format!("expected a list of fields, found {}", other.kind_name()),
                )],
                warnings: Vec::new(),
                nodes_visited: 0,
            }),
        }
    }

    /// Validate a list of field nodes.
    ///
    /// # Errors
    ///
    /// Returns every error found in the list, together with any warnings.
    pub fn validate_fields(
        &self,
        fields: &[ConfigValue],
    ) -> Result<ValidatedFields, ValidationFailure> {
        let root = self.root();
        let walker = self.walker();
        let outcomes = fields
            .iter()
            .enumerate()
            .map(|(index, field)| walker.field(field, &root.index(index)))
            .collect();
        Self::finish(outcomes)
    }

    /// Validate a custom identifier field.
    ///
    /// The field must be a `text` or `number` field; it is reported under the
    /// `id` path.
    ///
    /// # Errors
    ///
    /// Returns the errors found in the field.
    pub fn validate_id_field(
        &self,
        input: &ConfigValue,
    ) -> Result<ValidatedFields, ValidationFailure> {
        let outcome = self.walker().id_field(input, &FieldPath::root("id"));
        Self::finish(vec![outcome])
    }

    /// Validate independent documents in parallel.
    ///
    /// Results keep the order of `inputs`.
    #[must_use]
    pub fn validate_many(
        &self,
        inputs: &[ConfigValue],
    ) -> Vec<Result<ValidatedFields, ValidationFailure>> {
        inputs.par_iter().map(|input| self.validate(input)).collect()
    }

    fn root(&self) -> FieldPath {
        FieldPath::root(self.options.root_path.as_str())
    }

    const fn walker(&self) -> Walker {
        Walker::new(self.options.strict_deprecations)
    }

    fn finish(outcomes: Vec<NodeOutcome>) -> Result<ValidatedFields, ValidationFailure> {
        let mut diagnostics = Diagnostics::new();
        let mut fields = Vec::with_capacity(outcomes.len());
        let mut nodes_visited = 0;
        for outcome in outcomes {
            nodes_visited += outcome.report.visited();
            diagnostics.extend(outcome.report.into_diagnostics());
            fields.extend(outcome.node);
        }

        let (errors, warnings) = diagnostics.partition();
        tracing::debug!(
            nodes_visited,
            errors = errors.len(),
            warnings = warnings.len(),
            "validated field tree"
        );

        if errors.is_empty() {
            Ok(ValidatedFields {
                fields,
                warnings,
                nodes_visited,
            })
        } else {
            Err(ValidationFailure {
                errors,
                warnings,
                nodes_visited,
            })
        }
    }
}

/// Validate with default options.
///
/// # Errors
///
/// Returns every error found in the tree, together with any warnings.
pub fn validate(input: &ConfigValue) -> Result<ValidatedFields, ValidationFailure> {
    Validator::default().validate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    #[test]
    fn scalar_input_is_rejected_at_the_root() -> Result<(), Box<dyn Error>> {
        let failure = validate(&ConfigValue::from("text"))
            .err()
            .ok_or_else(|| std::io::Error::other("expected failure"))?;
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(
            failure.first_error().map(|error| error.path.to_string()),
            Some("fields".to_string())
        );
        assert_eq!(failure.nodes_visited, 0);
        Ok(())
    }

    #[test]
    fn single_field_is_a_one_element_list() -> Result<(), Box<dyn Error>> {
        let failure = validate(&ConfigValue::from(json!({ "type": "text" })))
            .err()
            .ok_or_else(|| std::io::Error::other("expected failure"))?;
        assert_eq!(
            failure.first_error().map(|error| error.path.to_string()),
            Some("fields[0].name".to_string())
        );
        Ok(())
    }

    #[test]
    fn empty_list_is_valid() -> Result<(), Box<dyn Error>> {
        let validated = validate(&ConfigValue::Array(Vec::new()))?;
        assert!(validated.is_empty());
        assert_eq!(validated.nodes_visited, 0);
        Ok(())
    }

    #[test]
    fn root_path_is_configurable() -> Result<(), Box<dyn Error>> {
        let validator = Validator::new(ValidatorOptions::default().with_root_path("blocks"));
        let failure = validator
            .validate(&ConfigValue::from(json!([{ "type": "nope" }])))
            .err()
            .ok_or_else(|| std::io::Error::other("expected failure"))?;
        assert_eq!(
            failure.first_error().map(|error| error.path.to_string()),
            Some("blocks[0].type".to_string())
        );
        Ok(())
    }

    #[test]
    fn id_field_must_be_text_or_number() -> Result<(), Box<dyn Error>> {
        let validator = Validator::default();
        let validated =
            validator.validate_id_field(&ConfigValue::from(json!({ "type": "number", "name": "id" })))?;
        assert_eq!(
            validated
                .fields
                .first()
                .and_then(|node| node.attribute("required")),
            Some(&ConfigValue::Bool(true))
        );

        let failure = validator
            .validate_id_field(&ConfigValue::from(json!({ "type": "date", "name": "id" })))
            .err()
            .ok_or_else(|| std::io::Error::other("expected failure"))?;
        assert_eq!(
            failure.first_error().map(|error| error.path.to_string()),
            Some("id.type".to_string())
        );

        let failure = validator
            .validate_id_field(&ConfigValue::from(
                json!({ "type": "text", "name": "id", "localized": true }),
            ))
            .err()
            .ok_or_else(|| std::io::Error::other("expected failure"))?;
        assert_eq!(
            failure.first_error().map(|error| error.rule),
            Some(Rule::InvalidValue)
        );
        Ok(())
    }

    #[test]
    fn id_field_required_must_be_literal_true() -> Result<(), Box<dyn Error>> {
        let validator = Validator::default();
        for (required, rule) in [
            (json!(false), Rule::InvalidValue),
            (json!(1), Rule::TypeMismatch),
        ] {
            let failure = validator
                .validate_id_field(&ConfigValue::from(
                    json!({ "type": "text", "name": "id", "required": required }),
                ))
                .err()
                .ok_or_else(|| std::io::Error::other("expected failure"))?;
            assert_eq!(
                failure
                    .first_error()
                    .map(|error| (error.path.to_string(), error.rule)),
                Some(("id.required".to_string(), rule))
            );
        }
        Ok(())
    }

    #[test]
    fn validate_many_keeps_input_order() {
        let inputs = vec![
            ConfigValue::from(json!([{ "type": "text", "name": "a" }])),
            ConfigValue::from(json!([{ "type": "nope" }])),
            ConfigValue::from(json!([])),
        ];
        let results = Validator::default().validate_many(&inputs);
        let outcomes: Vec<bool> = results.iter().map(Result::is_ok).collect();
        assert_eq!(outcomes, [true, false, true]);
    }
}
