// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified codec interface.
//!
//! A [`Codec`] pairs encode and decode for exactly one serialization format
//! and describes itself with a lookup name and the MIME types it answers to.
//! The [`CodecRegistry`](super::CodecRegistry) indexes codecs by both.
//!
//! ## Example
//!
//! ```
//! use bytestream_codecs::encoding::{Codec, JsonCodec};
//! use bytestream_codecs::{CodecOptions, CodecValue};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = JsonCodec::new();
//! let bytes = codec.encode(&CodecValue::from(42), &CodecOptions::new())?;
//! assert_eq!(bytes, b"42");
//! assert_eq!(codec.decode(&bytes, &CodecOptions::new())?, Some(CodecValue::from(42)));
//! # Ok(())
//! # }
//! ```

use crate::core::{CodecOptions, CodecValue, Result};

/// Encode/decode implementation for one serialization format.
pub trait Codec: Send + Sync {
    /// Unique lookup name (e.g., "json", "msgpack").
    fn name(&self) -> &str;

    /// Human-readable format name.
    fn display_name(&self) -> &str;

    /// MIME types that resolve to this codec, in preference order.
    fn mime_types(&self) -> &[&'static str];

    /// Encode a value to bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedValue` when the value is outside what
    /// the format can represent.
    fn encode(&self, value: &CodecValue, options: &CodecOptions) -> Result<Vec<u8>>;

    /// Decode bytes to a value.
    ///
    /// `Ok(None)` means the input could not be decoded and the codec chose to
    /// recover locally; codecs that treat malformed input as fatal return an
    /// error instead.
    fn decode(&self, data: &[u8], options: &CodecOptions) -> Result<Option<CodecValue>>;
}

impl std::fmt::Debug for dyn Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("name", &self.name())
            .field("mime_types", &self.mime_types())
            .finish()
    }
}
