use fieldset_shared::ErrorEnvelope;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    Internal = 1,
    InvalidInput = 2,
    Io = 3,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Exit code for a structured error.
    ///
    /// File access failures map to `Io` whatever their kind, other expected
    /// errors to `InvalidInput`, everything else to `Internal`.
    #[must_use]
    pub fn for_envelope(error: &ErrorEnvelope) -> Self {
        let code = error.code.code();
        let is_io = code == "io"
            || code.ends_with("_io")
            || code.ends_with("not_found")
            || code.ends_with("permission_denied");

        if is_io {
            Self::Io
        } else if error.is_expected() {
            Self::InvalidInput
        } else {
            Self::Internal
        }
    }
}

#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::Io,
            Self::Serialization(_) => ExitCode::Internal,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(formatter, "io error: {error}"),
            Self::Serialization(error) => write!(formatter, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldset_shared::ErrorCode;

    #[test]
    fn file_errors_map_to_io() {
        let error = ErrorEnvelope::expected(
            ErrorCode::new("config", "document_not_found"),
            "failed to read document",
        );
        assert_eq!(ExitCode::for_envelope(&error), ExitCode::Io);

        let error = ErrorEnvelope::unexpected(
            ErrorCode::io_failure("config", "config_file", std::io::ErrorKind::Other),
            "disk gone",
        );
        assert_eq!(ExitCode::for_envelope(&error), ExitCode::Io);
    }

    #[test]
    fn expected_errors_map_to_invalid_input() {
        let error = ErrorEnvelope::expected(
            ErrorCode::new("schema", "invalid_fields"),
            "field tree is invalid",
        );
        assert_eq!(ExitCode::for_envelope(&error), ExitCode::InvalidInput);
    }

    #[test]
    fn other_errors_are_internal() {
        let error = ErrorEnvelope::unexpected(ErrorCode::internal(), "broken");
        assert_eq!(ExitCode::for_envelope(&error), ExitCode::Internal);
    }
}
