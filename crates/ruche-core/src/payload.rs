//! Wire payload decoding (hex text to raw bytes).

use crate::error::DecodeError;

/// Hex-decoded device payload, owned by a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload(Vec<u8>);

impl RawPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for RawPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Decode the hex text carried in a webhook body.
///
/// Accepts upper- and lower-case digits. Odd lengths and any non-hex
/// character (whitespace included) are rejected.
///
/// # Examples
/// ```
/// use ruche_core::decode_hex;
///
/// let raw = decode_hex("52657374617274")?;
/// assert_eq!(raw.as_bytes(), b"Restart");
/// # Ok::<(), ruche_core::DecodeError>(())
/// ```
///
/// # Errors
/// Returns [`DecodeError::InvalidHex`] when the text is not valid hex.
pub fn decode_hex(text: &str) -> Result<RawPayload, DecodeError> {
    let bytes = hex::decode(text)?;
    Ok(RawPayload::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::decode_hex;
    use crate::error::{DecodeError, ErrorKind};

    #[test]
    fn decodes_mixed_case() {
        let raw = decode_hex("00aBcD").unwrap();
        assert_eq!(raw.as_bytes(), &[0x00, 0xab, 0xcd]);
    }

    #[test]
    fn empty_text_is_empty_payload() {
        let raw = decode_hex("").unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn rejects_odd_length() {
        let err = decode_hex("abc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidHex);
    }

    #[test]
    fn rejects_non_hex_characters() {
        for text in ["zz", "0g", "12 4", " 1234", "12-4"] {
            let err = decode_hex(text).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidHex(_)), "{text:?} accepted");
        }
    }
}
