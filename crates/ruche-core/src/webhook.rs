//! Webhook body model and the end-to-end decoding pipeline.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::error::DecodeError;
use crate::formats::{SelectedFormat, Sentinel, extract, extract_legacy, select};
use crate::payload::decode_hex;
use crate::record::{Location, NormalizedRecord, RequestContext, normalize};
use crate::sink::Point;

/// Measurement name every decoded record is stored under.
pub const MEASUREMENT: &str = "raw";

/// Uplink notification posted by the device network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub stream_id: String,
    #[serde(default)]
    pub model: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    #[serde(default)]
    pub location: Location,
    pub value: UplinkValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UplinkValue {
    /// Hex-encoded device payload.
    pub payload: String,
}

impl WebhookRequest {
    pub fn context(&self) -> RequestContext {
        RequestContext {
            stream_id: self.stream_id.clone(),
            model: self.model.clone(),
            location: self.location.clone(),
        }
    }
}

/// A field that was dropped from the record, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiagnostic {
    pub field: String,
    pub message: String,
}

/// Record produced from one uplink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedPayload {
    /// Name of the layout the payload was decoded with.
    pub format: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    pub record: NormalizedRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FieldDiagnostic>,
}

impl DecodedPayload {
    pub fn point(&self) -> Point {
        Point {
            measurement: MEASUREMENT.to_string(),
            tags: self.record.tags.clone(),
            values: self.record.values.clone(),
            timestamp: self.created,
        }
    }
}

/// Successful pipeline results. A restart is neither a record nor an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Restart,
    Record(DecodedPayload),
}

/// Decode one webhook body into a record.
///
/// # Examples
/// ```
/// use ruche_core::{Outcome, WebhookRequest, decode_webhook};
///
/// let body = r#"{
///     "streamId": "s1",
///     "model": "hive",
///     "created": "2024-05-01T10:00:00Z",
///     "location": {"provider": "net", "alt": 1.0, "accuracy": 2.0, "lon": 3.0, "lat": 4.0},
///     "value": {"payload": "52657374617274"}
/// }"#;
/// let request: WebhookRequest = serde_json::from_str(body).unwrap();
/// assert_eq!(decode_webhook(&request)?, Outcome::Restart);
/// # Ok::<(), ruche_core::DecodeError>(())
/// ```
///
/// # Errors
/// Returns a [`DecodeError`] naming the failed stage: hex decoding, format
/// selection, or the legacy single value.
pub fn decode_webhook(request: &WebhookRequest) -> Result<Outcome, DecodeError> {
    decode_payload(&request.value.payload, &request.context(), request.created)
}

/// Decode a hex payload with explicit request context.
pub fn decode_payload(
    payload: &str,
    context: &RequestContext,
    created: OffsetDateTime,
) -> Result<Outcome, DecodeError> {
    let raw = decode_hex(payload)?;
    let selected = select(&raw)?;

    let fields = match selected {
        SelectedFormat::Sentinel(Sentinel::Restart) => {
            info!(stream_id = %context.stream_id, "restart sentinel received, ignoring");
            return Ok(Outcome::Restart);
        }
        SelectedFormat::LegacySingleValue => vec![extract_legacy(&raw)?],
        SelectedFormat::Structured(spec) => extract(&raw, spec),
    };

    let failures = fields
        .iter()
        .filter_map(|field| {
            field.error().map(|err| FieldDiagnostic {
                field: field.name.to_string(),
                message: err.to_string(),
            })
        })
        .collect();

    Ok(Outcome::Record(DecodedPayload {
        format: selected.name().to_string(),
        created,
        record: normalize(&fields, context),
        failures,
    }))
}
