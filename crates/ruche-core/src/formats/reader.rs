use std::ops::Range;

use super::error::FieldError;

/// Bytes the firmware pads numeric text fields with.
const PADDING: &[char] = &['\0', ' '];

pub struct FieldReader<'a> {
    payload: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn covers(&self, range: &Range<usize>) -> bool {
        range.end <= self.payload.len()
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], FieldError> {
        self.payload.get(range.clone()).ok_or(FieldError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FieldError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(FieldError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_le(&self, offset: usize) -> Result<u16, FieldError> {
        let bytes = self.read_slice(offset..offset + 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read padded decimal text and parse it as a finite float.
    pub fn read_ascii_decimal(&self, range: Range<usize>) -> Result<f64, FieldError> {
        let bytes = self.read_slice(range)?;
        parse_ascii_decimal(bytes)
    }
}

pub(crate) fn parse_ascii_decimal(bytes: &[u8]) -> Result<f64, FieldError> {
    let text = std::str::from_utf8(bytes).map_err(|_| FieldError::NotUtf8)?;
    let text = text.trim_matches(PADDING);
    if text.is_empty() {
        return Err(FieldError::Empty);
    }
    let value: f64 = text.parse().map_err(|source| FieldError::InvalidNumber {
        text: text.to_string(),
        source,
    })?;
    if !value.is_finite() {
        return Err(FieldError::NonFinite {
            text: text.to_string(),
        });
    }
    Ok(value)
}
