// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Bytestream Codecs
//!
//! Pluggable codec registry over object serialization formats.
//!
//! Callers serialize a [`CodecValue`] to bytes and back, choosing the format
//! by codec name or MIME type, without format-specific code:
//! - **JSON** (`json`, `application/json`) in [`encoding::json`]
//! - **MessagePack** (`msgpack`, `application/msgpack`) in [`encoding::msgpack`]
//! - **Registry** with name and MIME lookup in [`encoding::registry`]
//! - **Configuration** from TOML in [`config`]
//!
//! ## Example: Dispatch by name
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bytestream_codecs::{global_registry, CodecOptions, CodecValue};
//!
//! let registry = global_registry();
//! let value: CodecValue = [("foo", CodecValue::from("bar"))].into_iter().collect();
//!
//! let bytes = registry.serialize("msgpack", &value, &CodecOptions::new())?;
//! assert_eq!(bytes, [0x81, 0xa3, 0x66, 0x6f, 0x6f, 0xa3, 0x62, 0x61, 0x72]);
//!
//! let decoded = registry.deserialize("msgpack", &bytes, &CodecOptions::new())?;
//! assert_eq!(decoded, Some(value));
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Dispatch by MIME type
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bytestream_codecs::{global_registry, CodecOptions};
//!
//! let codec = global_registry().get_codec("application/json").expect("registered");
//! let value = codec.decode(b"[1,2,3]", &CodecOptions::new())?;
//! assert!(value.is_some());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, CodecOptions, CodecValue, Indent, Result, ValueHook, ValueMap};

// Codecs and registry
pub mod encoding;

pub use encoding::{global_registry, Codec, CodecRegistry, CodecRegistryBuilder};

// Registry configuration
pub mod config;

pub use config::RegistryConfig;
