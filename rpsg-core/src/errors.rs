use crate::units::{ConversionError, ParseError};
use thiserror::Error;

/// Error type for invalid configuration operations.
///
/// Errors are raised when a value is assigned or a variant is resolved,
/// never while rendering an already-validated configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RPSGError {
    /// The value has the wrong category for the field (a string for a float, ...).
    #[error("{field}: expected {expected}, got {got}")]
    Type {
        field: String,
        expected: String,
        got: String,
    },
    /// The value has the right category but is outside the field's domain.
    #[error("{field}: {message}")]
    Value { field: String, message: String },
    #[error("Wrong input units. Expected {expected}, got {got}")]
    UnitMismatch { expected: String, got: String },
    #[error("Unknown {family} variant {value:?}")]
    UnknownVariant { family: String, value: String },
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Could not parse unit: {0}")]
    UnitParse(String),
    #[error("Unknown field {0:?}")]
    UnknownField(String),
    #[error("{0} cannot be read back from a configuration")]
    ReadUnsupported(String),
    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl RPSGError {
    pub(crate) fn type_error(
        field: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::Type {
            field: field.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    pub(crate) fn value_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Value {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ConversionError> for RPSGError {
    fn from(e: ConversionError) -> Self {
        match e {
            ConversionError::IncompatibleDimensions {
                from_unit, to_unit, ..
            } => Self::UnitMismatch {
                expected: to_unit,
                got: from_unit,
            },
            ConversionError::ParseError(e) => e.into(),
        }
    }
}

impl From<ParseError> for RPSGError {
    fn from(e: ParseError) -> Self {
        Self::UnitParse(e.to_string())
    }
}

/// Convenience type for `Result<T, RPSGError>`.
pub type RPSGResult<T> = Result<T, RPSGError>;
