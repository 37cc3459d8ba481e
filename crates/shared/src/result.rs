//! Result helpers for shared error handling.

use crate::errors::{ErrorCode, ErrorEnvelope};

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Extension helpers for attaching context to fallible operations.
pub trait ResultExt<T> {
    /// Replace any error with an expected envelope carrying `code`, keeping the
    /// original message under the `cause` metadata key.
    fn or_expected(self, code: ErrorCode, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn or_expected(self, code: ErrorCode, message: &str) -> Result<T> {
        self.map_err(|error| {
            ErrorEnvelope::expected(code, message).with_metadata("cause", error.to_string())
        })
    }
}
