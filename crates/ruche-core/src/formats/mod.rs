//! Hive payload layouts and field decoding.
//!
//! Follows the same layering for every firmware revision:
//! - `layout`: declarative field tables (source of truth for offsets)
//! - `selector`: length/sentinel based dispatch to a layout
//! - `reader`: safe byte access and padding conventions
//! - `parser`: per-field decoding into `FieldResult`s
//! - `error`: per-field failures
//!
//! Adding a firmware revision means adding a `FormatSpec` to the layout
//! table; no decoding code changes. Field failures never abort a record,
//! except for the legacy single-value format where the field is the record.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod selector;

pub use error::FieldError;
pub use layout::{
    Encoding, FORMAT_SPECS, FieldDescriptor, FieldRole, FormatId, FormatSpec, HIVE_ASCII_V1,
    HIVE_BINARY_V2,
};
pub use parser::{FieldResult, extract, extract_legacy};
pub use selector::{SelectedFormat, Sentinel, select};
