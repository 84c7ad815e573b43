// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec registry for name- and MIME-based codec selection.
//!
//! The registry is built once from an explicit list of codecs and is
//! read-only afterward, so it can be shared across threads without locking.
//!
//! - [`CodecRegistry::get_codec`] resolves a codec name or a MIME type.
//! - [`CodecRegistry::serialize`] / [`CodecRegistry::deserialize`] resolve
//!   **by name only**; callers dispatching on MIME type go through
//!   `get_codec` and call the codec directly.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bytestream_codecs::encoding::CodecRegistry;
//! use bytestream_codecs::{CodecOptions, CodecValue};
//!
//! let registry = CodecRegistry::with_builtin_codecs();
//! let options = CodecOptions::new();
//!
//! let bytes = registry.serialize("msgpack", &CodecValue::from(42), &options)?;
//! assert_eq!(bytes, vec![0x2a]);
//!
//! let codec = registry.get_codec("application/json").unwrap();
//! assert_eq!(codec.name(), "json");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::core::{CodecError, CodecOptions, CodecValue, Result};
use crate::encoding::codec::Codec;
use crate::encoding::json::JsonCodec;
use crate::encoding::msgpack::MsgPackCodec;

/// Registry of codecs indexed by name and by MIME type.
#[derive(Debug)]
pub struct CodecRegistry {
    by_name: HashMap<String, Arc<dyn Codec>>,
    by_mime_type: HashMap<String, String>,
    /// Codec names in first-registration order
    order: Vec<String>,
}

impl CodecRegistry {
    /// Build a registry from a list of codecs.
    ///
    /// Later codecs win name and MIME type conflicts.
    pub fn new<I>(codecs: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Codec>>,
    {
        let mut builder = Self::builder();
        for codec in codecs {
            builder = builder.register(codec);
        }
        builder.build()
    }

    /// Start building a registry.
    pub fn builder() -> CodecRegistryBuilder {
        CodecRegistryBuilder::default()
    }

    /// Registry holding no codecs.
    pub fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
            by_mime_type: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry holding the built-in JSON and MessagePack codecs.
    pub fn with_builtin_codecs() -> Self {
        Self::new(builtin_codecs())
    }

    /// Check whether `key` is a known codec name or MIME type.
    pub fn is_supported(&self, key: &str) -> bool {
        self.by_name.contains_key(key) || self.by_mime_type.contains_key(key)
    }

    /// Resolve a codec by name, falling back to MIME type.
    ///
    /// Returns `None` when `key` is neither.
    pub fn get_codec(&self, key: &str) -> Option<&Arc<dyn Codec>> {
        self.by_name.get(key).or_else(|| {
            self.by_mime_type
                .get(key)
                .and_then(|name| self.by_name.get(name))
        })
    }

    /// Encode `value` with the codec registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnknownCodec` if `name` is not a registered codec
    /// name (MIME types are not accepted here). Encode errors are returned
    /// unchanged.
    pub fn serialize(
        &self,
        name: &str,
        value: &CodecValue,
        options: &CodecOptions,
    ) -> Result<Vec<u8>> {
        self.codec_by_name(name)?.encode(value, options)
    }

    /// Decode `data` with the codec registered under `name`.
    ///
    /// `Ok(None)` is the codec's own "could not decode" result.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnknownCodec` if `name` is not a registered codec
    /// name. Decode errors are returned unchanged.
    pub fn deserialize(
        &self,
        name: &str,
        data: &[u8],
        options: &CodecOptions,
    ) -> Result<Option<CodecValue>> {
        self.codec_by_name(name)?.decode(data, options)
    }

    /// Registered codec names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Flattened MIME type to codec name mapping.
    pub fn mime_types(&self) -> &HashMap<String, String> {
        &self.by_mime_type
    }

    /// Get the number of registered codecs.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no codecs are registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn codec_by_name(&self, name: &str) -> Result<&Arc<dyn Codec>> {
        self.by_name
            .get(name)
            .ok_or_else(|| CodecError::unknown_codec(name))
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_builtin_codecs()
    }
}

/// Builder collecting codecs and MIME aliases before the registry freezes.
#[derive(Default)]
pub struct CodecRegistryBuilder {
    codecs: Vec<Arc<dyn Codec>>,
    aliases: Vec<(String, String)>,
}

impl CodecRegistryBuilder {
    /// Register a codec under its own name and MIME types.
    pub fn register(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codecs.push(codec);
        self
    }

    /// Map an extra MIME type to a codec name.
    ///
    /// Aliases apply after every codec's own MIME types, so they win
    /// conflicts.
    pub fn register_mime_alias(
        mut self,
        mime_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.aliases.push((mime_type.into(), name.into()));
        self
    }

    /// Freeze the registry.
    ///
    /// Aliases pointing at unregistered names are skipped with a warning.
    pub fn build(self) -> CodecRegistry {
        let mut registry = CodecRegistry::empty();

        for codec in self.codecs {
            let name = codec.name().to_string();
            for mime_type in codec.mime_types() {
                map_mime_type(&mut registry.by_mime_type, mime_type, &name);
            }
            if registry.by_name.insert(name.clone(), codec).is_some() {
                warn!(codec = %name, "codec name registered twice, replacing earlier codec");
            } else {
                registry.order.push(name);
            }
        }

        for (mime_type, name) in self.aliases {
            if !registry.by_name.contains_key(&name) {
                warn!(
                    mime_type = %mime_type,
                    codec = %name,
                    "ignoring MIME alias for unregistered codec"
                );
                continue;
            }
            map_mime_type(&mut registry.by_mime_type, &mime_type, &name);
        }

        debug!(
            codecs = registry.by_name.len(),
            mime_types = registry.by_mime_type.len(),
            "codec registry built"
        );

        registry
    }
}

fn map_mime_type(by_mime_type: &mut HashMap<String, String>, mime_type: &str, name: &str) {
    if let Some(previous) = by_mime_type.insert(mime_type.to_string(), name.to_string()) {
        if previous != name {
            warn!(
                mime_type,
                previous = %previous,
                codec = name,
                "MIME type claimed by another codec, last registration wins"
            );
        }
    }
}

/// The built-in codecs, in registration order.
pub fn builtin_codecs() -> Vec<Arc<dyn Codec>> {
    vec![Arc::new(JsonCodec::new()), Arc::new(MsgPackCodec::new())]
}

/// Global codec registry.
///
/// Built from the built-in codecs on first use. For custom codec sets, build
/// a `CodecRegistry` directly.
static GLOBAL_REGISTRY: OnceLock<CodecRegistry> = OnceLock::new();

/// Get the global codec registry.
///
/// # Example
///
/// ```
/// use bytestream_codecs::encoding::global_registry;
///
/// assert!(global_registry().is_supported("json"));
/// assert!(global_registry().is_supported("application/msgpack"));
/// ```
pub fn global_registry() -> &'static CodecRegistry {
    GLOBAL_REGISTRY.get_or_init(CodecRegistry::with_builtin_codecs)
}
