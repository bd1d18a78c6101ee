//! Ruche core library: decoding of hive sensor uplinks.
//!
//! Hives report through a device network that posts a JSON webhook carrying
//! a hex-encoded payload. This crate turns that payload into a normalized
//! record ready for time-series storage: hex text feeds the format selector,
//! which picks a firmware layout (layout/reader/parser), and the decoded
//! fields are merged with request context into a deterministic record.
//! Decoding is byte-oriented and side-effect free; all I/O lives in `sink`
//! implementations and in the CLI.
//!
//! Invariants:
//! - Layouts are static data; selecting one never allocates or locks.
//! - A field that fails to decode is dropped and reported, never zeroed.
//! - The `Restart` sentinel is a successful outcome without a record.
//!
//! Version française (résumé):
//! Cette crate décode les trames des ruches : texte hexadécimal -> sélection
//! du format (par longueur et sentinelle) -> extraction champ par champ ->
//! enregistrement normalisé (valeurs + tags). Un champ corrompu est ignoré
//! sans bloquer les autres ; « Restart » est ignoré sans erreur.
//!
//! # Examples
//! ```
//! use ruche_core::{Outcome, RequestContext, decode_payload};
//! use time::OffsetDateTime;
//!
//! let outcome = decode_payload(
//!     "002008301100003a01150038f010e8044340e8",
//!     &RequestContext::default(),
//!     OffsetDateTime::UNIX_EPOCH,
//! )?;
//! let Outcome::Record(decoded) = outcome else { unreachable!() };
//! assert_eq!(decoded.format, "hive-binary-v2");
//! assert_eq!(decoded.record.values["temp"], 20.8);
//! # Ok::<(), ruche_core::DecodeError>(())
//! ```

mod error;
pub mod formats;
mod payload;
mod record;
mod sink;
mod webhook;

pub use error::{DecodeError, ErrorKind};
pub use formats::{
    Encoding, FORMAT_SPECS, FieldDescriptor, FieldError, FieldResult, FieldRole, FormatId,
    FormatSpec, HIVE_ASCII_V1, HIVE_BINARY_V2, SelectedFormat, Sentinel, extract, extract_legacy,
    select,
};
pub use payload::{RawPayload, decode_hex};
pub use record::{Location, NormalizedRecord, RequestContext, normalize};
pub use sink::{
    ConnectionTarget, LineProtocolSink, MetricsSink, Point, SinkError, TargetError, encode_point,
    render_point,
};
pub use webhook::{
    DecodedPayload, FieldDiagnostic, MEASUREMENT, Outcome, UplinkValue, WebhookRequest,
    decode_payload, decode_webhook,
};
