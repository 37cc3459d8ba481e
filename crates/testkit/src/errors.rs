//! Canonical error envelopes for tests.

use fieldset_shared::{ErrorCode, ErrorEnvelope};
use std::io;

/// Codes the loaders emit for unreadable documents, one per I/O outcome.
pub fn document_io_codes() -> Vec<ErrorCode> {
    [
        io::ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied,
        io::ErrorKind::Other,
    ]
    .into_iter()
    .map(|kind| ErrorCode::io_failure("config", "document", kind))
    .collect()
}

/// A rejected settings document.
pub fn invalid_settings_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::new("config", "invalid_settings"), "invalid settings")
}

/// A missing field document, shaped like the loader's error.
pub fn not_found_error(path: &str) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::io_failure("config", "document", io::ErrorKind::NotFound),
        format!("failed to read document: {path}"),
    )
    .with_metadata("path", path)
}
