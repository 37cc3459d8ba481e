//! Validation diagnostics.
//!
//! Diagnostics are plain records returned from a validation call. Nothing is
//! written to a global sink; callers decide whether to print, log or discard.

use crate::path::FieldPath;
use serde::Serialize;
use std::fmt;

/// Whether a diagnostic blocks acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks acceptance of the offending subtree.
    Error,
    /// Reported but never blocks.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => formatter.write_str("error"),
            Self::Warning => formatter.write_str("warning"),
        }
    }
}

/// Rule that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Discriminant outside the closed set.
    UnknownType,
    /// Attribute outside the variant's allowed set.
    DisallowedAttribute,
    /// Required attribute is absent.
    MissingAttribute,
    /// Attribute forbidden by a conditional constraint.
    ForbiddenAttribute,
    /// Value has the wrong kind.
    TypeMismatch,
    /// Value has the right kind but an unacceptable content.
    InvalidValue,
    /// Option list entry is malformed.
    InvalidOptions,
    /// Component reference has an unsupported shape.
    InvalidComponent,
    /// Attribute is accepted but deprecated.
    DeprecatedAttribute,
}

impl Rule {
    /// Stable rule identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownType => "unknown_type",
            Self::DisallowedAttribute => "disallowed_attribute",
            Self::MissingAttribute => "missing_attribute",
            Self::ForbiddenAttribute => "forbidden_attribute",
            Self::TypeMismatch => "type_mismatch",
            Self::InvalidValue => "invalid_value",
            Self::InvalidOptions => "invalid_options",
            Self::InvalidComponent => "invalid_component",
            Self::DeprecatedAttribute => "deprecated_attribute",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One finding produced while validating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Location of the offending node or attribute.
    pub path: FieldPath,
    /// Severity.
    pub severity: Severity,
    /// Producing rule.
    pub rule: Rule,
    /// Attribute the finding refers to, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Build an error.
    pub fn error(path: FieldPath, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            path,
            severity: Severity::Error,
            rule,
            attribute: None,
            message: message.into(),
        }
    }

    /// Build a warning.
    pub fn warning(path: FieldPath, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(path, rule, message)
        }
    }

    /// Attach the attribute name.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Promote to error severity.
    #[must_use]
    pub fn escalate(mut self) -> Self {
        self.severity = Severity::Error;
        self
    }

    /// Returns true for errors.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} at {}: {} [{}]",
            self.severity, self.path, self.message, self.rule
        )
    }
}

/// Ordered collection of diagnostics from one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    records: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append one record.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true when at least one error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.records.iter().any(Diagnostic::is_error)
    }

    /// Iterate every record in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.records.iter()
    }

    /// Iterate errors in order.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(|record| record.is_error())
    }

    /// Iterate warnings in order.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(|record| !record.is_error())
    }

    /// Split into `(errors, warnings)`, keeping relative order.
    #[must_use]
    pub fn partition(self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
        self.records.into_iter().partition(Diagnostic::is_error)
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(records: Vec<Diagnostic>) -> Self {
        Self { records }
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_keeps_order() {
        let root = FieldPath::root("fields");
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::error(root.index(0), Rule::MissingAttribute, "a"));
        diagnostics.push(Diagnostic::warning(
            root.index(1),
            Rule::DeprecatedAttribute,
            "b",
        ));
        diagnostics.push(Diagnostic::error(root.index(2), Rule::UnknownType, "c"));

        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors().count(), 2);
        assert_eq!(diagnostics.warnings().count(), 1);

        let (errors, warnings) = diagnostics.partition();
        let messages: Vec<_> = errors.iter().map(|error| error.message.as_str()).collect();
        assert_eq!(messages, ["a", "c"]);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn escalate_promotes_warning() {
        let warning = Diagnostic::warning(FieldPath::root("x"), Rule::DeprecatedAttribute, "old")
            .with_attribute("max");
        assert!(!warning.is_error());
        let error = warning.escalate();
        assert!(error.is_error());
        assert_eq!(error.attribute.as_deref(), Some("max"));
    }

    #[test]
    fn serializes_path_as_string() -> Result<(), serde_json::Error> {
        let diagnostic = Diagnostic::error(
            FieldPath::root("fields").index(0).key("options"),
            Rule::DisallowedAttribute,
            "no",
        )
        .with_attribute("options");
        let encoded = serde_json::to_value(&diagnostic)?;
        assert_eq!(encoded["path"], "fields[0].options");
        assert_eq!(encoded["rule"], "disallowed_attribute");
        assert_eq!(encoded["severity"], "error");
        Ok(())
    }
}
