// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MessagePack cursor for bounds-checked reads.
//!
//! Every read is checked against the remaining input and fails with
//! `CodecError::BufferTooShort` instead of reading past the end.

use byteorder::{BigEndian, ByteOrder};

use crate::core::{CodecError, Result};

/// Read position over a MessagePack buffer.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use bytestream_codecs::encoding::msgpack::MsgPackCursor;
///
/// let data = [0xcd, 0x01, 0x00];
/// let mut cursor = MsgPackCursor::new(&data);
/// assert_eq!(cursor.read_u8()?, 0xcd);
/// assert_eq!(cursor.read_u16()?, 256);
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
pub struct MsgPackCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> MsgPackCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the next `count` bytes and advance past them.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(self.read_bytes(8)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    /// Read a single precision float with its exact bit pattern.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read a double precision float with its exact bit pattern.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Check that `count` items of at least `min_item_size` bytes each can
    /// still follow.
    ///
    /// Run before allocating for a declared length so a hostile header cannot
    /// request more memory than the input could ever fill.
    pub fn check_length(&self, count: usize, min_item_size: usize) -> Result<()> {
        let needed = count.saturating_mul(min_item_size);
        if needed > self.remaining() {
            return Err(CodecError::length_exceeded(
                count,
                self.offset,
                self.data.len(),
            ));
        }
        Ok(())
    }
}
