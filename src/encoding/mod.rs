// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec implementations and dispatch.
//!
//! - [`codec`] - Unified codec interface
//! - [`json`] - Textual JSON codec
//! - [`msgpack`] - Binary MessagePack codec
//! - [`registry`] - Codec registry with name and MIME type lookup

pub mod codec;
pub mod json;
pub mod msgpack;
pub mod registry;

pub use codec::Codec;
pub use json::{JsonCodec, JSON_CODEC_NAME};
pub use msgpack::{MsgPackCodec, MSGPACK_CODEC_NAME};
pub use registry::{builtin_codecs, global_registry, CodecRegistry, CodecRegistryBuilder};
