//! # fieldset-testkit
//!
//! Builders and on-disk fixtures for field documents.
//! This crate depends on `domain` and `shared`.

pub mod builders;
pub mod errors;
pub mod fixtures;

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldset_domain::domain_crate_version;
    use fieldset_shared::shared_crate_version;

    #[test]
    fn testkit_crate_compiles() {
        let version = testkit_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn testkit_can_use_domain_and_shared() {
        assert!(!domain_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }

    #[test]
    fn error_fixtures_are_available() {
        let codes = errors::document_io_codes();
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn builders_are_available() {
        let field = builders::text("title");
        assert!(field.is_object());
    }
}
