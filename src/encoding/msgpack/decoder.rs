// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MessagePack decoder.
//!
//! Reads the leading tag of each value and dispatches to the fixed-size or
//! length-prefixed reader for it. Open arrays and maps are kept on an explicit
//! stack rather than the call stack, so nesting depth is bounded by the input
//! length alone. Any malformed input (unknown tag, truncation, invalid UTF-8,
//! non-string map key, trailing bytes) aborts the whole decode.

use super::codec::MSGPACK_CODEC_NAME;
use super::cursor::MsgPackCursor;
use super::tags;
use crate::core::{CodecError, CodecValue, Result, ValueMap};

/// MessagePack decoder.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use bytestream_codecs::encoding::msgpack::MsgPackDecoder;
/// use bytestream_codecs::CodecValue;
///
/// let value = MsgPackDecoder::new().decode(&[0x93, 0x01, 0x02, 0x03])?;
/// assert_eq!(
///     value,
///     CodecValue::Array(vec![CodecValue::Int(1), CodecValue::Int(2), CodecValue::Int(3)])
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MsgPackDecoder {
    _private: (),
}

/// What a single tag read produced.
enum Item {
    /// A complete scalar, string, binary, or extension value.
    Value(CodecValue),
    /// Array header with its element count.
    Array(usize),
    /// Map header with its entry count.
    Map(usize),
}

/// A container still collecting children.
enum Frame {
    Array {
        items: Vec<CodecValue>,
        remaining: usize,
    },
    Map {
        map: ValueMap,
        remaining: usize,
        /// Key read and waiting for its value
        key: Option<String>,
        /// Where the pending key started
        key_position: usize,
    },
}

impl Frame {
    fn into_value(self) -> CodecValue {
        match self {
            Frame::Array { items, .. } => CodecValue::Array(items),
            Frame::Map { map, .. } => CodecValue::Map(map),
        }
    }
}

impl MsgPackDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Decode exactly one value occupying the whole buffer.
    pub fn decode(&self, data: &[u8]) -> Result<CodecValue> {
        let mut cursor = MsgPackCursor::new(data);
        let value = self.read_value(&mut cursor)?;
        if !cursor.is_at_end() {
            return Err(CodecError::malformed(
                MSGPACK_CODEC_NAME,
                format!(
                    "{} trailing bytes after value at position {}",
                    cursor.remaining(),
                    cursor.position()
                ),
            ));
        }
        Ok(value)
    }

    /// Decode the next complete value at the cursor.
    pub fn read_value(&self, cursor: &mut MsgPackCursor<'_>) -> Result<CodecValue> {
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            if let Some(Frame::Map { key: None, key_position, .. }) = stack.last_mut() {
                *key_position = cursor.position();
            }

            let mut value = match self.read_item(cursor)? {
                Item::Value(value) => value,
                Item::Array(len) => {
                    // every element takes at least its tag byte
                    cursor.check_length(len, 1)?;
                    if len > 0 {
                        stack.push(Frame::Array {
                            items: Vec::with_capacity(len),
                            remaining: len,
                        });
                        continue;
                    }
                    CodecValue::Array(Vec::new())
                }
                Item::Map(len) => {
                    // every entry takes at least a key tag and a value tag
                    cursor.check_length(len, 2)?;
                    if len > 0 {
                        stack.push(Frame::Map {
                            map: ValueMap::with_capacity(len),
                            remaining: len,
                            key: None,
                            key_position: 0,
                        });
                        continue;
                    }
                    CodecValue::Map(ValueMap::new())
                }
            };

            // Hand the value to its parent, closing every container it completes.
            loop {
                match stack.last_mut() {
                    None => return Ok(value),
                    Some(Frame::Array { items, remaining }) => {
                        items.push(value);
                        *remaining -= 1;
                        if *remaining > 0 {
                            break;
                        }
                    }
                    Some(Frame::Map {
                        map,
                        remaining,
                        key,
                        key_position,
                    }) => match key.take() {
                        None => {
                            match value {
                                CodecValue::String(k) => *key = Some(k),
                                other => {
                                    return Err(CodecError::malformed(
                                        MSGPACK_CODEC_NAME,
                                        format!(
                                            "map key at position {key_position} is {}, expected string",
                                            other.type_name()
                                        ),
                                    ));
                                }
                            }
                            break;
                        }
                        Some(k) => {
                            map.insert(k, value);
                            *remaining -= 1;
                            if *remaining > 0 {
                                break;
                            }
                        }
                    },
                }

                value = match stack.pop() {
                    Some(frame) => frame.into_value(),
                    None => break,
                };
            }
        }
    }

    /// Read one tag and whatever fixed payload follows it.
    fn read_item(&self, cursor: &mut MsgPackCursor<'_>) -> Result<Item> {
        let position = cursor.position();
        let tag = cursor.read_u8()?;

        let value = match tag {
            0x00..=tags::POSITIVE_FIXINT_MAX => CodecValue::Int(tag as i64),
            0x80..=0x8f => return Ok(Item::Map((tag & 0x0f) as usize)),
            0x90..=0x9f => return Ok(Item::Array((tag & 0x0f) as usize)),
            0xa0..=0xbf => self.read_str(cursor, (tag & 0x1f) as usize)?,
            tags::NIL => CodecValue::Null,
            tags::FALSE => CodecValue::Bool(false),
            tags::TRUE => CodecValue::Bool(true),

            tags::BIN8 => {
                let len = cursor.read_u8()? as usize;
                CodecValue::Bytes(cursor.read_bytes(len)?.to_vec())
            }
            tags::BIN16 => {
                let len = cursor.read_u16()? as usize;
                CodecValue::Bytes(cursor.read_bytes(len)?.to_vec())
            }
            tags::BIN32 => {
                let len = cursor.read_u32()? as usize;
                CodecValue::Bytes(cursor.read_bytes(len)?.to_vec())
            }

            tags::EXT8 => {
                let len = cursor.read_u8()? as usize;
                self.read_ext(cursor, len)?
            }
            tags::EXT16 => {
                let len = cursor.read_u16()? as usize;
                self.read_ext(cursor, len)?
            }
            tags::EXT32 => {
                let len = cursor.read_u32()? as usize;
                self.read_ext(cursor, len)?
            }

            tags::FLOAT32 => CodecValue::Float32(cursor.read_f32()?),
            tags::FLOAT64 => CodecValue::Float64(cursor.read_f64()?),

            tags::UINT8 => CodecValue::Int(cursor.read_u8()? as i64),
            tags::UINT16 => CodecValue::Int(cursor.read_u16()? as i64),
            tags::UINT32 => CodecValue::Int(cursor.read_u32()? as i64),
            tags::UINT64 => CodecValue::from(cursor.read_u64()?),

            tags::INT8 => CodecValue::Int(cursor.read_i8()? as i64),
            tags::INT16 => CodecValue::Int(cursor.read_i16()? as i64),
            tags::INT32 => CodecValue::Int(cursor.read_i32()? as i64),
            tags::INT64 => CodecValue::Int(cursor.read_i64()?),

            tags::FIXEXT1 => self.read_ext(cursor, 1)?,
            tags::FIXEXT2 => self.read_ext(cursor, 2)?,
            tags::FIXEXT4 => self.read_ext(cursor, 4)?,
            tags::FIXEXT8 => self.read_ext(cursor, 8)?,
            tags::FIXEXT16 => self.read_ext(cursor, 16)?,

            tags::STR8 => {
                let len = cursor.read_u8()? as usize;
                self.read_str(cursor, len)?
            }
            tags::STR16 => {
                let len = cursor.read_u16()? as usize;
                self.read_str(cursor, len)?
            }
            tags::STR32 => {
                let len = cursor.read_u32()? as usize;
                self.read_str(cursor, len)?
            }

            tags::ARRAY16 => return Ok(Item::Array(cursor.read_u16()? as usize)),
            tags::ARRAY32 => return Ok(Item::Array(cursor.read_u32()? as usize)),
            tags::MAP16 => return Ok(Item::Map(cursor.read_u16()? as usize)),
            tags::MAP32 => return Ok(Item::Map(cursor.read_u32()? as usize)),

            tags::NEGATIVE_FIXINT..=0xff => CodecValue::Int(tag as i8 as i64),

            tags::NEVER_USED => return Err(CodecError::invalid_tag(tag, position)),
        };

        Ok(Item::Value(value))
    }

    fn read_str(&self, cursor: &mut MsgPackCursor<'_>, len: usize) -> Result<CodecValue> {
        let position = cursor.position();
        let bytes = cursor.read_bytes(len)?;
        let s = std::str::from_utf8(bytes).map_err(|e| {
            CodecError::malformed(
                MSGPACK_CODEC_NAME,
                format!("invalid UTF-8 in string at position {position}: {e}"),
            )
        })?;
        Ok(CodecValue::String(s.to_string()))
    }

    fn read_ext(&self, cursor: &mut MsgPackCursor<'_>, len: usize) -> Result<CodecValue> {
        let type_id = cursor.read_i8()?;
        let data = cursor.read_bytes(len)?;
        Ok(CodecValue::Ext(type_id, data.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(data: &[u8]) -> Result<CodecValue> {
        MsgPackDecoder::new().decode(data)
    }

    #[test]
    fn test_decode_fixints() {
        assert!(matches!(decode(&[0x2a]), Ok(CodecValue::Int(42))));
        assert!(matches!(decode(&[0xff]), Ok(CodecValue::Int(-1))));
        assert!(matches!(decode(&[0xe0]), Ok(CodecValue::Int(-32))));
    }

    #[test]
    fn test_decode_wide_ints() {
        assert!(matches!(decode(&[0xcc, 0xff]), Ok(CodecValue::Int(255))));
        assert!(matches!(decode(&[0xd1, 0xff, 0x7f]), Ok(CodecValue::Int(-129))));
        assert!(matches!(
            decode(&[0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            Ok(CodecValue::UInt(u64::MAX))
        ));
        assert!(matches!(decode(&[0xcf, 0, 0, 0, 0, 0, 0, 0, 7]), Ok(CodecValue::Int(7))));
    }

    #[test]
    fn test_decode_bin_and_ext() {
        assert_eq!(decode(&[0xc4, 0x02, 0xab, 0xcd]).unwrap(), CodecValue::Bytes(vec![0xab, 0xcd]));
        assert_eq!(decode(&[0xd4, 0x07, 0x01]).unwrap(), CodecValue::Ext(7, vec![0x01]));
        assert_eq!(decode(&[0xc7, 0x00, 0xfe]).unwrap(), CodecValue::Ext(-2, vec![]));
    }

    #[test]
    fn test_decode_never_used_tag() {
        let err = decode(&[0x91, 0xc1]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidTag { tag: 0xc1, position: 1 }));
    }

    #[test]
    fn test_decode_truncated_scalar() {
        let err = decode(&[0xcb, 0x7f, 0xf0]).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooShort { requested: 8, .. }));
    }

    #[test]
    fn test_decode_truncated_map() {
        let err = decode(&[0x81]).unwrap_err();
        assert!(err.is_malformed_input());
        let err = decode(&[0x81, 0xa1, 0x61]).unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_decode_hostile_length() {
        let err = decode(&[0xdd, 0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, CodecError::LengthExceeded { .. }));
    }

    #[test]
    fn test_decode_non_string_key() {
        let err = decode(&[0x81, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedInput { .. }));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = decode(&[0xa2, 0xc3, 0x28]).unwrap_err();
        assert!(matches!(err, CodecError::MalformedInput { .. }));
    }

    #[test]
    fn test_malformed_errors_name_the_codec() {
        let inputs: [&[u8]; 3] = [&[0xc0, 0xc0], &[0xa1, 0xff], &[0x81, 0x01, 0x02]];
        for data in inputs {
            match decode(data).unwrap_err() {
                CodecError::MalformedInput { codec, .. } => assert_eq!(codec, MSGPACK_CODEC_NAME),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let err = decode(&[0xc0, 0xc0]).unwrap_err();
        assert!(err.to_string().contains("1 trailing bytes"));
    }

    #[test]
    fn test_decode_empty_buffer() {
        assert!(matches!(
            decode(&[]),
            Err(CodecError::BufferTooShort { requested: 1, available: 0, .. })
        ));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let value = decode(&[0x82, 0xa1, 0x61, 0x01, 0xa1, 0x61, 0x02]).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], CodecValue::Int(2));
    }

    #[test]
    fn test_decode_deeply_nested_arrays() {
        const DEPTH: usize = 2000;
        let mut data = vec![0x91; DEPTH];
        data.push(0x01);

        let value = decode(&data).unwrap();
        let mut current = &value;
        let mut depth = 0;
        while let CodecValue::Array(items) = current {
            assert_eq!(items.len(), 1);
            current = &items[0];
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
        assert_eq!(*current, CodecValue::Int(1));
    }

    #[test]
    fn test_decode_deeply_nested_maps() {
        const DEPTH: usize = 1000;
        let mut data = [0x81, 0xa1, 0x6b].repeat(DEPTH);
        data.push(0xc0);

        let value = decode(&data).unwrap();
        let mut current = &value;
        let mut depth = 0;
        while let CodecValue::Map(map) = current {
            assert_eq!(map.len(), 1);
            current = &map["k"];
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
        assert_eq!(*current, CodecValue::Null);
    }

    #[test]
    fn test_decode_deep_truncated_input() {
        let err = decode(&vec![0x91; 100_000]).unwrap_err();
        assert!(matches!(err, CodecError::LengthExceeded { .. }));
    }

    #[test]
    fn test_decode_nested_non_string_key_position() {
        // {"a": {[]: nil}}
        let err = decode(&[0x81, 0xa1, 0x61, 0x81, 0x90, 0xc0]).unwrap_err();
        assert!(err.to_string().contains("position 4"), "{err}");
    }

    #[test]
    fn test_decode_sibling_containers() {
        // [[1], {"a": [2, 3]}, 4]
        let data = [0x93, 0x91, 0x01, 0x81, 0xa1, 0x61, 0x92, 0x02, 0x03, 0x04];
        let value = decode(&data).unwrap();
        let mut inner = ValueMap::new();
        inner.insert(
            "a".to_string(),
            CodecValue::Array(vec![CodecValue::Int(2), CodecValue::Int(3)]),
        );
        assert_eq!(
            value,
            CodecValue::Array(vec![
                CodecValue::Array(vec![CodecValue::Int(1)]),
                CodecValue::Map(inner),
                CodecValue::Int(4),
            ])
        );
    }
}
