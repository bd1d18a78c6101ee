//! Assembly of decoded fields and request context into one record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::formats::{FieldResult, FieldRole};

/// Network-provided device position, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub alt: f64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub lat: f64,
}

/// Request metadata merged into every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub stream_id: String,
    pub model: String,
    pub location: Location,
}

/// Format-independent measurement record.
///
/// Failed fields are absent from `values`; a missing key never stands for
/// zero.
///
/// # Examples
/// ```
/// use ruche_core::NormalizedRecord;
///
/// let record = NormalizedRecord::default();
/// assert!(record.values.is_empty());
/// assert!(record.tags.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub values: BTreeMap<String, f64>,
    pub tags: BTreeMap<String, String>,
}

/// Merge field results and request context into a record.
///
/// Pure: the same inputs always produce an identical record.
///
/// # Examples
/// ```
/// use ruche_core::{RequestContext, decode_hex, extract, normalize, HIVE_BINARY_V2};
///
/// let raw = decode_hex("002008301100003a01150038f010e8044340e8")?;
/// let record = normalize(&extract(&raw, &HIVE_BINARY_V2), &RequestContext::default());
/// assert_eq!(record.tags["rucher_id"], "0");
/// assert_eq!(record.values["hum"], 44.0);
/// # Ok::<(), ruche_core::DecodeError>(())
/// ```
pub fn normalize(fields: &[FieldResult], context: &RequestContext) -> NormalizedRecord {
    let mut record = NormalizedRecord::default();

    for field in fields {
        let Some(value) = field.value() else {
            continue;
        };
        match field.role {
            FieldRole::Value => {
                record.values.insert(field.name.to_string(), value);
            }
            FieldRole::Tag => {
                record.tags.insert(field.name.to_string(), value.to_string());
            }
        }
    }

    let location = &context.location;
    record
        .values
        .insert("location_alt".to_string(), location.alt);
    record
        .values
        .insert("location_accuracy".to_string(), location.accuracy);
    record
        .values
        .insert("location_lon".to_string(), location.lon);
    record
        .values
        .insert("location_lat".to_string(), location.lat);

    record
        .tags
        .insert("stream_id".to_string(), context.stream_id.clone());
    record.tags.insert("model".to_string(), context.model.clone());
    record
        .tags
        .insert("location_provider".to_string(), location.provider.clone());

    record
}
