// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MessagePack encoding/decoding module.
//!
//! Provides the binary codec:
//! - [`encoder`] - Tag-selecting writer
//! - [`cursor`] - Bounds-checked big-endian reader
//! - [`decoder`] - Tag dispatch back to values
//! - [`codec`] - [`Codec`](crate::Codec) implementation

pub mod codec;
pub mod cursor;
pub mod decoder;
pub mod encoder;

pub use codec::{MsgPackCodec, MSGPACK_CODEC_NAME};
pub use cursor::MsgPackCursor;
pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;

/// MessagePack type tags.
///
/// Ranges (`POSITIVE_FIXINT`, `FIXMAP`, ...) name the first byte of the range;
/// the low bits of those tags carry the value or length.
pub mod tags {
    /// 0x00..=0x7f
    pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;
    /// 0x80..=0x8f
    pub const FIXMAP: u8 = 0x80;
    /// 0x90..=0x9f
    pub const FIXARRAY: u8 = 0x90;
    /// 0xa0..=0xbf
    pub const FIXSTR: u8 = 0xa0;
    pub const NIL: u8 = 0xc0;
    /// Reserved, never valid.
    pub const NEVER_USED: u8 = 0xc1;
    pub const FALSE: u8 = 0xc2;
    pub const TRUE: u8 = 0xc3;
    pub const BIN8: u8 = 0xc4;
    pub const BIN16: u8 = 0xc5;
    pub const BIN32: u8 = 0xc6;
    pub const EXT8: u8 = 0xc7;
    pub const EXT16: u8 = 0xc8;
    pub const EXT32: u8 = 0xc9;
    pub const FLOAT32: u8 = 0xca;
    pub const FLOAT64: u8 = 0xcb;
    pub const UINT8: u8 = 0xcc;
    pub const UINT16: u8 = 0xcd;
    pub const UINT32: u8 = 0xce;
    pub const UINT64: u8 = 0xcf;
    pub const INT8: u8 = 0xd0;
    pub const INT16: u8 = 0xd1;
    pub const INT32: u8 = 0xd2;
    pub const INT64: u8 = 0xd3;
    pub const FIXEXT1: u8 = 0xd4;
    pub const FIXEXT2: u8 = 0xd5;
    pub const FIXEXT4: u8 = 0xd6;
    pub const FIXEXT8: u8 = 0xd7;
    pub const FIXEXT16: u8 = 0xd8;
    pub const STR8: u8 = 0xd9;
    pub const STR16: u8 = 0xda;
    pub const STR32: u8 = 0xdb;
    pub const ARRAY16: u8 = 0xdc;
    pub const ARRAY32: u8 = 0xdd;
    pub const MAP16: u8 = 0xde;
    pub const MAP32: u8 = 0xdf;
    /// 0xe0..=0xff
    pub const NEGATIVE_FIXINT: u8 = 0xe0;

    /// Longest length stored in a fixstr tag.
    pub const FIXSTR_MAX_LEN: usize = 31;
    /// Longest length stored in a fixarray or fixmap tag.
    pub const FIXCOLLECTION_MAX_LEN: usize = 15;
    /// Smallest value stored in a negative fixint tag.
    pub const NEGATIVE_FIXINT_MIN: i64 = -32;
}
