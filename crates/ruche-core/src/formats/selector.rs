use tracing::debug;

use super::layout::{self, FORMAT_SPECS, FormatSpec};
use crate::error::DecodeError;
use crate::payload::RawPayload;

/// Control payloads that carry no measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    Restart,
}

/// Result of format dispatch for one payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectedFormat {
    Sentinel(Sentinel),
    /// Oldest firmware: one bare ASCII number.
    LegacySingleValue,
    Structured(&'static FormatSpec),
}

impl SelectedFormat {
    pub fn name(&self) -> &'static str {
        match self {
            SelectedFormat::Sentinel(Sentinel::Restart) => "restart",
            SelectedFormat::LegacySingleValue => "legacy-single-value",
            SelectedFormat::Structured(spec) => spec.name,
        }
    }
}

/// Choose how a payload should be decoded.
///
/// The restart sentinel wins over everything, short payloads are legacy
/// single values, then an exact nominal-width match, then the layout with
/// the widest required span that still fits. Trailing bytes beyond a
/// layout's last field are ignored.
///
/// # Examples
/// ```
/// use ruche_core::{RawPayload, SelectedFormat, Sentinel, select};
///
/// let raw = RawPayload::new(b"Restart".to_vec());
/// assert_eq!(select(&raw)?, SelectedFormat::Sentinel(Sentinel::Restart));
///
/// let raw = RawPayload::new(b"21.5".to_vec());
/// assert_eq!(select(&raw)?, SelectedFormat::LegacySingleValue);
/// # Ok::<(), ruche_core::DecodeError>(())
/// ```
///
/// # Errors
/// Returns [`DecodeError::UnknownFormat`] when no layout fits the length.
pub fn select(raw: &RawPayload) -> Result<SelectedFormat, DecodeError> {
    select_from(raw, &FORMAT_SPECS)
}

pub(crate) fn select_from(
    raw: &RawPayload,
    specs: &[&'static FormatSpec],
) -> Result<SelectedFormat, DecodeError> {
    let bytes = raw.as_bytes();
    if bytes == layout::RESTART_SENTINEL {
        return Ok(SelectedFormat::Sentinel(Sentinel::Restart));
    }
    if bytes.len() <= layout::LEGACY_MAX_LEN {
        return Ok(SelectedFormat::LegacySingleValue);
    }

    let len = bytes.len();
    let spec = specs
        .iter()
        .find(|spec| spec.nominal_width == len)
        .or_else(|| {
            specs
                .iter()
                .filter(|spec| spec.accepts_len(len))
                .max_by_key(|spec| spec.required_span())
        })
        .copied()
        .ok_or(DecodeError::UnknownFormat { len })?;

    debug!(format = spec.name, len, "selected payload format");
    Ok(SelectedFormat::Structured(spec))
}
