//! Byte layouts of every known hive firmware revision.
//!
//! Offsets here are the single source of truth; readers and parsers never
//! index the payload with literals of their own.

use std::ops::Range;

/// Control text sent by a hive after a reboot instead of measurements.
pub const RESTART_SENTINEL: &[u8] = b"Restart";

/// Payloads up to this many bytes carry one bare ASCII number.
pub const LEGACY_MAX_LEN: usize = 5;

/// Field name used for the single legacy measurement.
pub const LEGACY_FIELD_NAME: &str = "value";

/// How the bytes of a field are turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Fixed-width decimal text, NUL or space padded.
    AsciiDecimal,
    /// Unsigned 16-bit little-endian integer divided by the scale.
    Uint16LeScaled,
    /// Single unsigned byte divided by the scale.
    Uint8,
}

/// Where a decoded field ends up in the normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Value,
    /// Numeric identifier promoted to a tag.
    Tag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub encoding: Encoding,
    pub scale: f64,
    pub required: bool,
    pub role: FieldRole,
}

impl FieldDescriptor {
    pub const fn ascii(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
            encoding: Encoding::AsciiDecimal,
            scale: 1.0,
            required: true,
            role: FieldRole::Value,
        }
    }

    pub const fn u16_le(name: &'static str, offset: usize, scale: f64) -> Self {
        Self {
            name,
            offset,
            width: 2,
            encoding: Encoding::Uint16LeScaled,
            scale,
            required: true,
            role: FieldRole::Value,
        }
    }

    pub const fn u8_tag(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            width: 1,
            encoding: Encoding::Uint8,
            scale: 1.0,
            required: true,
            role: FieldRole::Tag,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatId {
    HiveAsciiV1,
    HiveBinaryV2,
}

/// Named payload layout for one firmware revision.
#[derive(Debug, PartialEq)]
pub struct FormatSpec {
    pub id: FormatId,
    pub name: &'static str,
    /// Payload length emitted by firmware that sends every field.
    pub nominal_width: usize,
    pub fields: &'static [FieldDescriptor],
}

impl FormatSpec {
    /// Bytes needed to hold every required field.
    pub fn required_span(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.offset + field.width)
            .max()
            .unwrap_or(0)
    }

    /// Whether a payload of `len` bytes holds every required field.
    /// Bytes past the last declared field are ignored.
    pub fn accepts_len(&self, len: usize) -> bool {
        self.required_span() <= len
    }
}

// 0-6 temp sxx.xx, 6-11 hum xx.xx, 11-17 lum xxx.xx, 17-21 bat x.xx,
// 21-25 solar x.xx, 25-49 masses xx.xxx, 49-69 late-added hive temps xx.xx
const HIVE_ASCII_V1_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::ascii("temp", 0, 6),
    FieldDescriptor::ascii("hum", 6, 5),
    FieldDescriptor::ascii("lum", 11, 6),
    FieldDescriptor::ascii("bat_tension", 17, 4),
    FieldDescriptor::ascii("sol_tension", 21, 4),
    FieldDescriptor::ascii("mass_r1", 25, 6),
    FieldDescriptor::ascii("mass_r2", 31, 6),
    FieldDescriptor::ascii("mass_r3", 37, 6),
    FieldDescriptor::ascii("mass_r4", 43, 6),
    FieldDescriptor::ascii("temp_r1", 49, 5).optional(),
    FieldDescriptor::ascii("temp_r2", 54, 5).optional(),
    FieldDescriptor::ascii("temp_r3", 59, 5).optional(),
    FieldDescriptor::ascii("temp_r4", 64, 5).optional(),
];

const HIVE_BINARY_V2_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::u8_tag("rucher_id", 0),
    FieldDescriptor::u16_le("temp", 1, 100.0),
    FieldDescriptor::u16_le("hum", 3, 100.0),
    FieldDescriptor::u16_le("lum", 5, 100.0),
    FieldDescriptor::u16_le("bat_tension", 7, 100.0),
    FieldDescriptor::u16_le("sol_tension", 9, 100.0),
    FieldDescriptor::u16_le("hive_1", 11, 100.0),
    FieldDescriptor::u16_le("hive_2", 13, 100.0),
    FieldDescriptor::u16_le("hive_3", 15, 100.0),
    FieldDescriptor::u16_le("hive_4", 17, 100.0),
];

pub static HIVE_ASCII_V1: FormatSpec = FormatSpec {
    id: FormatId::HiveAsciiV1,
    name: "hive-ascii-v1",
    nominal_width: 69,
    fields: HIVE_ASCII_V1_FIELDS,
};

pub static HIVE_BINARY_V2: FormatSpec = FormatSpec {
    id: FormatId::HiveBinaryV2,
    name: "hive-binary-v2",
    nominal_width: 19,
    fields: HIVE_BINARY_V2_FIELDS,
};

/// Every structured layout the decoder knows about.
pub static FORMAT_SPECS: [&FormatSpec; 2] = [&HIVE_ASCII_V1, &HIVE_BINARY_V2];
