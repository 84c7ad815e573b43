// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! MessagePack codec implementation.
//!
//! The format is self-describing, so [`CodecOptions`] are accepted and
//! ignored. Unlike the JSON codec, non-finite floats survive a round trip
//! with their exact bit patterns, and malformed input is a hard error.

use super::decoder::MsgPackDecoder;
use super::encoder::MsgPackEncoder;
use crate::core::{CodecOptions, CodecValue, Result};
use crate::encoding::codec::Codec;

/// Lookup name of the MessagePack codec.
pub const MSGPACK_CODEC_NAME: &str = "msgpack";

const MSGPACK_MIME_TYPES: &[&str] = &["application/msgpack", "application/x-msgpack"];

/// Binary MessagePack codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackCodec {
    decoder: MsgPackDecoder,
}

impl MsgPackCodec {
    /// Create a new MessagePack codec.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Codec for MsgPackCodec {
    fn name(&self) -> &str {
        MSGPACK_CODEC_NAME
    }

    fn display_name(&self) -> &str {
        "MessagePack"
    }

    fn mime_types(&self) -> &[&'static str] {
        MSGPACK_MIME_TYPES
    }

    fn encode(&self, value: &CodecValue, _options: &CodecOptions) -> Result<Vec<u8>> {
        let mut encoder = MsgPackEncoder::new();
        encoder.value(value)?;
        Ok(encoder.finish())
    }

    fn decode(&self, data: &[u8], _options: &CodecOptions) -> Result<Option<CodecValue>> {
        self.decoder.decode(data).map(Some)
    }
}
