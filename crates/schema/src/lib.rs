//! # fieldset-schema
//!
//! Declarative rule tables for every field variant and the walker that
//! checks field trees against them.
//!
//! Validation accumulates every finding in one pass. Errors and warnings are
//! reported in pre-order with a full path to the offending node or attribute.
//! A tree with no errors comes back normalized, with defaults filled in.
//!
//! This crate depends on `domain` and `shared` only.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Cross-attribute constraint evaluation.
pub mod conditional;
/// Default injection.
pub mod defaults;
/// Validation failure type.
pub mod error;
/// Rule vocabulary: shapes, presence, constraints.
pub mod rules;
/// Per-variant rule sets.
pub mod table;
/// Public validation entry points.
pub mod validator;

mod walker;

pub use error::ValidationFailure;
pub use rules::{
    AttrSpec, ConditionalRule, Consequence, DefaultValue, ObjectRules, Predicate, Presence, Shape,
};
pub use table::{FIELD_BASE, ID_FIELD, rules_for};
pub use validator::{
    DEFAULT_ROOT_PATH, ValidatedFields, Validator, ValidatorOptions, validate,
};

/// Returns the schema crate version.
#[must_use]
pub const fn schema_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
