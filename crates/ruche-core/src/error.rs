use thiserror::Error;

use crate::formats::FieldError;

/// Request-fatal decoding failures, one variant per pipeline stage.
///
/// # Examples
/// ```
/// use ruche_core::{DecodeError, ErrorKind};
///
/// let err = DecodeError::UnknownFormat { len: 12 };
/// assert_eq!(err.kind(), ErrorKind::UnknownFormat);
/// assert!(err.to_string().contains("12 bytes"));
/// ```
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("unknown payload format: no layout matches {len} bytes")]
    UnknownFormat { len: usize },
    #[error("legacy single-value payload: {0}")]
    LegacyValue(#[source] FieldError),
}

/// Coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidHex,
    UnknownFormat,
    FieldDecodeFailure,
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::InvalidHex(_) => ErrorKind::InvalidHex,
            DecodeError::UnknownFormat { .. } => ErrorKind::UnknownFormat,
            DecodeError::LegacyValue(_) => ErrorKind::FieldDecodeFailure,
        }
    }
}
