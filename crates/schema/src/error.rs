//! Validation failure type.

use fieldset_domain::Diagnostic;
use fieldset_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::fmt;

/// A tree that produced at least one error.
///
/// Carries every diagnostic in pre-order, split by severity, so callers can
/// report the whole batch at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    /// Error diagnostics, in pre-order.
    pub errors: Vec<Diagnostic>,
    /// Warnings collected alongside the errors.
    pub warnings: Vec<Diagnostic>,
    /// Field nodes whose discriminant was examined.
    pub nodes_visited: usize,
}

impl ValidationFailure {
    /// Stable error code used when the failure crosses crate boundaries.
    #[must_use]
    pub fn error_code() -> ErrorCode {
        ErrorCode::new("schema", "invalid_fields")
    }

    /// First error in traversal order.
    #[must_use]
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.errors.first()
    }

    /// Errors and warnings in one list, errors first.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .cloned()
            .collect()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "field configuration has {} error(s)",
            self.errors.len()
        )?;
        if let Some(first) = self.first_error() {
            write!(formatter, "; first at {}: {}", first.path, first.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationFailure> for ErrorEnvelope {
    fn from(failure: ValidationFailure) -> Self {
        let mut envelope = Self::expected(ValidationFailure::error_code(), failure.to_string())
            .with_metadata("error_count", failure.errors.len().to_string())
            .with_metadata("warning_count", failure.warnings.len().to_string());
        if let Some(first) = failure.first_error() {
            envelope = envelope
                .with_metadata("first_error_path", first.path.to_string())
                .with_metadata("first_error_rule", first.rule.as_str());
        }
        envelope
    }
}
