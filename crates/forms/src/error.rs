//! Forms error type.

use fieldset_schema::ValidationFailure;
use fieldset_shared::{ErrorCode, ErrorEnvelope};

/// Failures while building or checking the forms collection.
#[derive(Debug, thiserror::Error)]
pub enum FormsError {
    /// Options document did not match the expected shape.
    #[error("invalid form builder options: {0}")]
    InvalidOptions(serde_json::Error),

    /// Collection has no `fields` key.
    #[error("forms collection has no field list")]
    MissingFields,

    /// Collection `fields` is not a list.
    #[error("forms collection fields must be a list, found {found}")]
    FieldsNotAList {
        /// Kind of the value found.
        found: &'static str,
    },

    /// The merged field list failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),
}

impl FormsError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidOptions(_) => ErrorCode::new("forms", "invalid_options"),
            Self::MissingFields | Self::FieldsNotAList { .. } => {
                ErrorCode::new("forms", "invalid_collection")
            },
            Self::Invalid(_) => ValidationFailure::error_code(),
        }
    }
}

impl From<FormsError> for ErrorEnvelope {
    fn from(error: FormsError) -> Self {
        let code = error.error_code();
        let message = error.to_string();

        match error {
            FormsError::Invalid(failure) => failure.into(),
            FormsError::FieldsNotAList { found } => {
                Self::expected(code, message).with_metadata("found", found)
            },
            FormsError::InvalidOptions(_) | FormsError::MissingFields => {
                Self::expected(code, message)
            },
        }
    }
}
