use std::num::ParseFloatError;

use thiserror::Error;

/// Reasons a single field could not be decoded.
///
/// These are recoverable: the field is dropped from the record and
/// extraction carries on with the next descriptor.
///
/// # Examples
/// ```
/// use ruche_core::FieldError;
///
/// let err = FieldError::TooShort { needed: 19, actual: 12 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("field text is not valid UTF-8")]
    NotUtf8,
    #[error("field is empty after trimming padding")]
    Empty,
    #[error("invalid decimal number {text:?}: {source}")]
    InvalidNumber {
        text: String,
        source: ParseFloatError,
    },
    #[error("non-finite number {text:?}")]
    NonFinite { text: String },
}
