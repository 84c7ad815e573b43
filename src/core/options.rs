// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-call codec options.
//!
//! [`CodecOptions`] is passed through the registry untouched; each codec reads
//! the fields it understands. The binary codec reads none of them.

use std::fmt;
use std::sync::Arc;

use super::value::CodecValue;

/// Longest indent unit honored by textual output.
pub const MAX_INDENT: usize = 10;

/// Pre-encode or post-decode value transform.
///
/// `key` is the map key or decimal array index the value sits under, or `""`
/// for the root value. Returning [`CodecValue::Undefined`] drops the value
/// where the codec supports omission.
pub trait ValueHook: Send + Sync {
    /// Transform one value.
    fn apply(&self, key: &str, value: CodecValue) -> CodecValue;
}

impl<F> ValueHook for F
where
    F: Fn(&str, CodecValue) -> CodecValue + Send + Sync,
{
    fn apply(&self, key: &str, value: CodecValue) -> CodecValue {
        self(key, value)
    }
}

/// Whitespace inserted by textual codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    /// Indent each level by this many spaces.
    Spaces(usize),
    /// Indent each level with this literal text.
    Text(String),
}

impl Indent {
    /// The per-level indent unit, clamped to [`MAX_INDENT`] characters.
    ///
    /// Returns `None` when the unit is empty, meaning compact output.
    pub fn unit(&self) -> Option<String> {
        let unit: String = match self {
            Indent::Spaces(n) => " ".repeat((*n).min(MAX_INDENT)),
            Indent::Text(s) => s.chars().take(MAX_INDENT).collect(),
        };
        (!unit.is_empty()).then_some(unit)
    }
}

/// Options forwarded to [`Codec::encode`](crate::Codec::encode) and
/// [`Codec::decode`](crate::Codec::decode).
#[derive(Clone, Default)]
pub struct CodecOptions {
    /// Rewrites values before encoding (textual codec).
    pub replacer: Option<Arc<dyn ValueHook>>,
    /// Rewrites values after decoding (textual codec).
    pub reviver: Option<Arc<dyn ValueHook>>,
    /// Output formatting (textual codec).
    pub indent: Option<Indent>,
    /// Restricts and orders the keys written for every map (textual codec).
    pub key_allowlist: Option<Vec<String>>,
}

impl CodecOptions {
    /// Options with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pre-encode hook.
    pub fn with_replacer(mut self, hook: impl ValueHook + 'static) -> Self {
        self.replacer = Some(Arc::new(hook));
        self
    }

    /// Set the post-decode hook.
    pub fn with_reviver(mut self, hook: impl ValueHook + 'static) -> Self {
        self.reviver = Some(Arc::new(hook));
        self
    }

    /// Set output indentation.
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Only write these map keys, in this order.
    pub fn with_key_allowlist<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_allowlist = Some(keys.into_iter().map(Into::into).collect());
        self
    }
}

impl fmt::Debug for CodecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecOptions")
            .field("replacer", &self.replacer.is_some())
            .field("reviver", &self.reviver.is_some())
            .field("indent", &self.indent)
            .field("key_allowlist", &self.key_allowlist)
            .finish()
    }
}
