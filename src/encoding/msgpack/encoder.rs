// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MessagePack encoder.
//!
//! Every write picks the narrowest tag that represents its argument without
//! loss. Multi-byte payloads are big-endian.

use super::codec::MSGPACK_CODEC_NAME;
use super::tags;
use crate::core::{CodecError, CodecValue, Result};

/// Default initial capacity for the encoder buffer.
const DEFAULT_CAPACITY: usize = 16;

/// 2^63 and 2^64 as f64, the bounds of integral floats written as integers.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const U64_LIMIT_F64: f64 = 18_446_744_073_709_551_616.0;

/// MessagePack encoder writing into an owned buffer.
///
/// # Example
///
/// ```
/// use bytestream_codecs::encoding::msgpack::MsgPackEncoder;
///
/// let mut encoder = MsgPackEncoder::new();
/// encoder.array_header(3).unwrap();
/// encoder.uint(1).uint(2).uint(3);
/// assert_eq!(encoder.finish(), vec![0x93, 0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Default)]
pub struct MsgPackEncoder {
    buffer: Vec<u8>,
}

impl MsgPackEncoder {
    /// Create a new encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new encoder with the specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Get a reference to the encoded data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the encoder and return the encoded data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    /// Clear the encoder, keeping its allocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    // ========================================================================
    // Scalars
    // ========================================================================

    pub fn nil(&mut self) -> &mut Self {
        self.buffer.push(tags::NIL);
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.buffer.push(if value { tags::TRUE } else { tags::FALSE });
        self
    }

    /// Write an unsigned integer in the narrowest unsigned form.
    pub fn uint(&mut self, value: u64) -> &mut Self {
        if value <= tags::POSITIVE_FIXINT_MAX as u64 {
            self.buffer.push(value as u8);
        } else if let Ok(v) = u8::try_from(value) {
            self.buffer.extend_from_slice(&[tags::UINT8, v]);
        } else if let Ok(v) = u16::try_from(value) {
            self.tagged(tags::UINT16, &v.to_be_bytes());
        } else if let Ok(v) = u32::try_from(value) {
            self.tagged(tags::UINT32, &v.to_be_bytes());
        } else {
            self.tagged(tags::UINT64, &value.to_be_bytes());
        }
        self
    }

    /// Write a signed integer.
    ///
    /// Non-negative values take the unsigned forms; negative values use a
    /// negative fixint or the narrowest signed form.
    pub fn int(&mut self, value: i64) -> &mut Self {
        if value >= 0 {
            return self.uint(value as u64);
        }

        if value >= tags::NEGATIVE_FIXINT_MIN {
            self.buffer.push(value as i8 as u8);
        } else if let Ok(v) = i8::try_from(value) {
            self.buffer.extend_from_slice(&[tags::INT8, v as u8]);
        } else if let Ok(v) = i16::try_from(value) {
            self.tagged(tags::INT16, &v.to_be_bytes());
        } else if let Ok(v) = i32::try_from(value) {
            self.tagged(tags::INT32, &v.to_be_bytes());
        } else {
            self.tagged(tags::INT64, &value.to_be_bytes());
        }
        self
    }

    /// Write a single precision float, preserving its bit pattern.
    pub fn float32(&mut self, value: f32) -> &mut Self {
        self.tagged(tags::FLOAT32, &value.to_bits().to_be_bytes());
        self
    }

    /// Write a double precision float, preserving its bit pattern.
    pub fn float64(&mut self, value: f64) -> &mut Self {
        self.tagged(tags::FLOAT64, &value.to_bits().to_be_bytes());
        self
    }

    /// Write a number: integral finite values as integers, anything else
    /// (fractional, NaN, infinite, negative zero) as a double.
    pub fn number(&mut self, value: f64) -> &mut Self {
        let integral = value.is_finite()
            && value.fract() == 0.0
            && !(value == 0.0 && value.is_sign_negative());

        if integral && (I64_MIN_F64..0.0).contains(&value) {
            self.int(value as i64)
        } else if integral && (0.0..U64_LIMIT_F64).contains(&value) {
            self.uint(value as u64)
        } else {
            self.float64(value)
        }
    }

    pub fn str(&mut self, value: &str) -> Result<&mut Self> {
        let len = value.len();
        if len <= tags::FIXSTR_MAX_LEN {
            self.buffer.push(tags::FIXSTR | len as u8);
        } else {
            self.length_prefix(len, "string", [tags::STR8, tags::STR16, tags::STR32])?;
        }
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(self)
    }

    pub fn bin(&mut self, value: &[u8]) -> Result<&mut Self> {
        self.length_prefix(value.len(), "bytes", [tags::BIN8, tags::BIN16, tags::BIN32])?;
        self.buffer.extend_from_slice(value);
        Ok(self)
    }

    /// Write an extension payload with its application type.
    pub fn ext(&mut self, type_id: i8, data: &[u8]) -> Result<&mut Self> {
        match data.len() {
            1 => self.buffer.push(tags::FIXEXT1),
            2 => self.buffer.push(tags::FIXEXT2),
            4 => self.buffer.push(tags::FIXEXT4),
            8 => self.buffer.push(tags::FIXEXT8),
            16 => self.buffer.push(tags::FIXEXT16),
            len => {
                self.length_prefix(len, "ext", [tags::EXT8, tags::EXT16, tags::EXT32])?;
            }
        }
        self.buffer.push(type_id as u8);
        self.buffer.extend_from_slice(data);
        Ok(self)
    }

    // ========================================================================
    // Containers
    // ========================================================================

    /// Write an array header announcing `len` elements.
    pub fn array_header(&mut self, len: usize) -> Result<&mut Self> {
        if len <= tags::FIXCOLLECTION_MAX_LEN {
            self.buffer.push(tags::FIXARRAY | len as u8);
        } else {
            self.collection_prefix(len, "array", tags::ARRAY16, tags::ARRAY32)?;
        }
        Ok(self)
    }

    /// Write a map header announcing `len` entries.
    pub fn map_header(&mut self, len: usize) -> Result<&mut Self> {
        if len <= tags::FIXCOLLECTION_MAX_LEN {
            self.buffer.push(tags::FIXMAP | len as u8);
        } else {
            self.collection_prefix(len, "map", tags::MAP16, tags::MAP32)?;
        }
        Ok(self)
    }

    /// Write a complete value tree.
    ///
    /// Undefined array elements are written as nil and undefined map values
    /// are skipped; a root undefined value is written as nil.
    pub fn value(&mut self, value: &CodecValue) -> Result<&mut Self> {
        match value {
            CodecValue::Undefined | CodecValue::Null => {
                self.nil();
            }
            CodecValue::Bool(b) => {
                self.bool(*b);
            }
            CodecValue::Int(i) => {
                self.int(*i);
            }
            CodecValue::UInt(u) => {
                self.uint(*u);
            }
            CodecValue::Float32(f) => {
                self.float32(*f);
            }
            CodecValue::Float64(f) => {
                self.number(*f);
            }
            CodecValue::String(s) => {
                self.str(s)?;
            }
            CodecValue::Bytes(b) => {
                self.bin(b)?;
            }
            CodecValue::Ext(type_id, data) => {
                self.ext(*type_id, data)?;
            }
            CodecValue::Array(items) => {
                self.array_header(items.len())?;
                for item in items {
                    self.value(item)?;
                }
            }
            CodecValue::Map(map) => {
                let present = map.values().filter(|v| !v.is_undefined()).count();
                self.map_header(present)?;
                for (key, item) in map.iter().filter(|(_, v)| !v.is_undefined()) {
                    self.str(key)?;
                    self.value(item)?;
                }
            }
        }
        Ok(self)
    }

    fn tagged(&mut self, tag: u8, payload: &[u8]) {
        self.buffer.push(tag);
        self.buffer.extend_from_slice(payload);
    }

    /// Write an 8/16/32-bit length prefix for str, bin, and ext payloads.
    fn length_prefix(&mut self, len: usize, what: &str, forms: [u8; 3]) -> Result<()> {
        if let Ok(v) = u8::try_from(len) {
            self.tagged(forms[0], &[v]);
        } else if let Ok(v) = u16::try_from(len) {
            self.tagged(forms[1], &v.to_be_bytes());
        } else if let Ok(v) = u32::try_from(len) {
            self.tagged(forms[2], &v.to_be_bytes());
        } else {
            return Err(too_long(what, len));
        }
        Ok(())
    }

    /// Write a 16/32-bit length prefix for arrays and maps.
    fn collection_prefix(&mut self, len: usize, what: &str, tag16: u8, tag32: u8) -> Result<()> {
        if let Ok(v) = u16::try_from(len) {
            self.tagged(tag16, &v.to_be_bytes());
        } else if let Ok(v) = u32::try_from(len) {
            self.tagged(tag32, &v.to_be_bytes());
        } else {
            return Err(too_long(what, len));
        }
        Ok(())
    }
}

fn too_long(what: &str, len: usize) -> CodecError {
    CodecError::unsupported_value(
        MSGPACK_CODEC_NAME,
        what,
        format!("length {len} exceeds the 32-bit limit"),
    )
}
