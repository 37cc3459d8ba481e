//! # fieldset-forms
//!
//! Generates the `forms` collection for a form builder: a fixed set of
//! collection fields plus a `blocks` field whose choices are built-in or
//! custom form inputs. Caller overrides are deep-merged over the result,
//! which can then be checked with the schema validator.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Built-in form blocks.
pub mod blocks;
/// Collection generator and validation.
pub mod collection;
/// Forms error type.
pub mod error;
/// Generator options.
pub mod options;

pub use blocks::BuiltinBlock;
pub use collection::{DEFAULT_FORMS_SLUG, capabilities, forms_collection, validate_forms_collection};
pub use error::FormsError;
pub use options::{DEFAULT_REDIRECT_RELATIONSHIPS, FormBuilderOptions};

/// Returns the forms crate version.
#[must_use]
pub const fn forms_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
