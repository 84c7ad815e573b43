// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Registry configuration.
//!
//! Selects which built-in codecs a registry holds, adds MIME aliases, and sets
//! codec-level behavior, loaded from TOML:
//!
//! ```toml
//! codecs = ["json", "msgpack"]
//!
//! [mime_aliases]
//! "text/json" = "json"
//!
//! [json]
//! reject_non_finite = false
//! ```
//!
//! Every field is optional; an empty document enables all built-in codecs.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::core::{CodecError, Result};
use crate::encoding::{
    Codec, CodecRegistry, JsonCodec, MsgPackCodec, JSON_CODEC_NAME, MSGPACK_CODEC_NAME,
};

/// Names of the codecs a configuration can enable.
pub const BUILTIN_CODEC_NAMES: &[&str] = &[JSON_CODEC_NAME, MSGPACK_CODEC_NAME];

/// Settings for the JSON codec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JsonSettings {
    /// Reject NaN/Infinity instead of writing `null`.
    pub reject_non_finite: bool,
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Built-in codecs to register, in order.
    pub codecs: Vec<String>,
    /// Extra MIME type to codec name mappings.
    pub mime_aliases: BTreeMap<String, String>,
    /// JSON codec settings.
    pub json: JsonSettings,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            codecs: BUILTIN_CODEC_NAMES.iter().map(|n| n.to_string()).collect(),
            mime_aliases: BTreeMap::new(),
            json: JsonSettings::default(),
        }
    }
}

impl RegistryConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CodecError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check codec names and alias targets.
    pub fn validate(&self) -> Result<()> {
        for name in &self.codecs {
            if !BUILTIN_CODEC_NAMES.contains(&name.as_str()) {
                return Err(CodecError::config(format!(
                    "unknown codec '{name}', expected one of: {}",
                    BUILTIN_CODEC_NAMES.join(", ")
                )));
            }
        }

        for (mime_type, name) in &self.mime_aliases {
            if !self.codecs.contains(name) {
                return Err(CodecError::config(format!(
                    "MIME alias '{mime_type}' points at codec '{name}', which is not enabled"
                )));
            }
        }

        Ok(())
    }

    /// Validate and build a registry.
    pub fn build_registry(&self) -> Result<CodecRegistry> {
        self.validate()?;

        let mut builder = CodecRegistry::builder();
        for name in &self.codecs {
            builder = builder.register(self.builtin_codec(name)?);
        }
        for (mime_type, name) in &self.mime_aliases {
            builder = builder.register_mime_alias(mime_type.clone(), name.clone());
        }

        Ok(builder.build())
    }

    fn builtin_codec(&self, name: &str) -> Result<Arc<dyn Codec>> {
        match name {
            JSON_CODEC_NAME if self.json.reject_non_finite => {
                Ok(Arc::new(JsonCodec::rejecting_non_finite()))
            }
            JSON_CODEC_NAME => Ok(Arc::new(JsonCodec::new())),
            MSGPACK_CODEC_NAME => Ok(Arc::new(MsgPackCodec::new())),
            other => Err(CodecError::config(format!("unknown codec '{other}'"))),
        }
    }
}
