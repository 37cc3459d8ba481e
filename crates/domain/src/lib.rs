//! # fieldset-domain
//!
//! Data model for field configuration trees.
//!
//! - **Values** - `ConfigValue`, `ConfigMap`, `Capability`
//! - **Fields** - `FieldType`, `FieldNode`, `ComponentRef`
//! - **Diagnostics** - `FieldPath`, `Diagnostic`, `Diagnostics`
//! - **Merge** - `deep_merge`, `merge_layers`
//!
//! ## Dependency Rules
//!
//! - Depends only on the `shared` crate
//! - Pure data and functions, no I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use fieldset_shared::shared_crate_version;

pub mod capability;
pub mod component;
pub mod diagnostics;
pub mod field_type;
pub mod merge;
pub mod node;
pub mod path;
pub mod value;

pub use capability::Capability;
pub use component::{ComponentRef, ComponentShapeError};
pub use diagnostics::{Diagnostic, Diagnostics, Rule, Severity};
pub use field_type::{FieldType, FieldTypeError};
pub use merge::{deep_merge, merge_layers, merge_value};
pub use node::{FieldNode, TYPE_KEY};
pub use path::{FieldPath, PathSegment};
pub use value::{CAPABILITY_MARKER, ConfigMap, ConfigValue};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_crate_compiles() {
        assert!(!domain_crate_version().is_empty());
    }

    #[test]
    fn domain_depends_on_shared() {
        assert!(!shared_crate_version().is_empty());
    }
}
