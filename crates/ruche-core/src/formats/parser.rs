use tracing::warn;

use super::error::FieldError;
use super::layout::{Encoding, FieldDescriptor, FieldRole, FormatSpec, LEGACY_FIELD_NAME};
use super::reader::{FieldReader, parse_ascii_decimal};
use crate::error::DecodeError;
use crate::payload::RawPayload;

/// Outcome of decoding one declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResult {
    pub name: &'static str,
    pub role: FieldRole,
    pub outcome: Result<f64, FieldError>,
}

impl FieldResult {
    pub fn value(&self) -> Option<f64> {
        self.outcome.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.outcome.as_ref().err()
    }
}

/// Decode every field of `spec` from the payload, in declared order.
///
/// A field that fails to decode is reported in its [`FieldResult`] and
/// logged; the remaining fields are still decoded. Optional fields whose
/// byte range lies past the end of the payload are skipped.
///
/// # Examples
/// ```
/// use ruche_core::{HIVE_BINARY_V2, decode_hex, extract};
///
/// let raw = decode_hex("002008301100003a01150038f010e8044340e8")?;
/// let results = extract(&raw, &HIVE_BINARY_V2);
/// assert_eq!(results.len(), 10);
/// assert!(results.iter().all(|field| field.outcome.is_ok()));
/// # Ok::<(), ruche_core::DecodeError>(())
/// ```
pub fn extract(raw: &RawPayload, spec: &FormatSpec) -> Vec<FieldResult> {
    let reader = FieldReader::new(raw.as_bytes());
    spec.fields
        .iter()
        .filter(|field| field.required || reader.covers(&field.range()))
        .map(|field| {
            let outcome = decode_field(&reader, field);
            if let Err(err) = &outcome {
                warn!(
                    field = field.name,
                    format = spec.name,
                    error = %err,
                    "field decode failed, dropping it from the record"
                );
            }
            FieldResult {
                name: field.name,
                role: field.role,
                outcome,
            }
        })
        .collect()
}

fn decode_field(reader: &FieldReader<'_>, field: &FieldDescriptor) -> Result<f64, FieldError> {
    match field.encoding {
        Encoding::AsciiDecimal => Ok(reader.read_ascii_decimal(field.range())? / field.scale),
        Encoding::Uint16LeScaled => Ok(f64::from(reader.read_u16_le(field.offset)?) / field.scale),
        Encoding::Uint8 => Ok(f64::from(reader.read_u8(field.offset)?) / field.scale),
    }
}

/// Decode a legacy payload: the whole payload is one ASCII number.
///
/// # Errors
/// Returns [`DecodeError::LegacyValue`]; there is no other field to salvage.
pub fn extract_legacy(raw: &RawPayload) -> Result<FieldResult, DecodeError> {
    let value = parse_ascii_decimal(raw.as_bytes()).map_err(DecodeError::LegacyValue)?;
    Ok(FieldResult {
        name: LEGACY_FIELD_NAME,
        role: FieldRole::Value,
        outcome: Ok(value),
    })
}
