// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # JSON Codec
//!
//! Textual codec backed by `serde_json`.
//!
//! Encoding converts a [`CodecValue`] tree into a `serde_json::Value`, applying
//! the replacer hook top-down, and serializes it compactly or with the
//! requested indent. Decoding parses into a `serde_json::Value` and converts
//! back, applying the reviver hook bottom-up.
//!
//! Non-finite floats have no JSON form and become `null` unless the codec was
//! built with [`JsonCodec::rejecting_non_finite`]. Decode failures are logged
//! and reported as `Ok(None)`.
//!
//! ## Example
//!
//! ```
//! use bytestream_codecs::encoding::{Codec, JsonCodec};
//! use bytestream_codecs::{CodecOptions, CodecValue, Indent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = JsonCodec::new();
//! let value: CodecValue = [("foo", CodecValue::from("bar"))].into_iter().collect();
//!
//! let compact = codec.encode(&value, &CodecOptions::new())?;
//! assert_eq!(compact, br#"{"foo":"bar"}"#);
//!
//! let pretty = codec.encode(&value, &CodecOptions::new().with_indent(Indent::Spaces(2)))?;
//! assert_eq!(pretty, b"{\n  \"foo\": \"bar\"\n}");
//!
//! assert_eq!(codec.decode(b"{not json", &CodecOptions::new())?, None);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::core::{CodecError, CodecOptions, CodecValue, Result, ValueHook, ValueMap};
use crate::encoding::codec::Codec;

/// Lookup name of the JSON codec.
pub const JSON_CODEC_NAME: &str = "json";

const JSON_MIME_TYPES: &[&str] = &["application/json"];

/// 2^53 - 1, the largest integer every f64 below it represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Textual JSON codec.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    /// Fail on NaN/Infinity instead of writing `null`
    reject_non_finite: bool,
}

impl JsonCodec {
    /// Create a JSON codec that writes non-finite floats as `null`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON codec that rejects non-finite floats with
    /// `CodecError::UnsupportedValue`.
    pub fn rejecting_non_finite() -> Self {
        Self {
            reject_non_finite: true,
        }
    }

    /// Whether non-finite floats are rejected rather than written as `null`.
    pub fn rejects_non_finite(&self) -> bool {
        self.reject_non_finite
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// Convert a value to JSON, returning `None` when it should be omitted.
    fn to_json(
        &self,
        key: &str,
        value: &CodecValue,
        options: &CodecOptions,
    ) -> Result<Option<serde_json::Value>> {
        let replaced;
        let value = match &options.replacer {
            Some(hook) => {
                replaced = hook.apply(key, value.clone());
                &replaced
            }
            None => value,
        };

        let json = match value {
            CodecValue::Undefined => return Ok(None),
            CodecValue::Null => serde_json::Value::Null,
            CodecValue::Bool(b) => serde_json::Value::Bool(*b),
            CodecValue::Int(i) => serde_json::Value::from(*i),
            CodecValue::UInt(u) => serde_json::Value::from(*u),
            CodecValue::Float32(f) => self.float_to_json(*f as f64, value)?,
            CodecValue::Float64(f) => self.float_to_json(*f, value)?,
            CodecValue::String(s) => serde_json::Value::String(s.clone()),
            CodecValue::Bytes(_) | CodecValue::Ext(_, _) => {
                return Err(CodecError::unsupported_value(
                    JSON_CODEC_NAME,
                    value.type_name(),
                    "no JSON representation",
                ));
            }
            CodecValue::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let element = self.to_json(&index.to_string(), item, options)?;
                    values.push(element.unwrap_or(serde_json::Value::Null));
                }
                serde_json::Value::Array(values)
            }
            CodecValue::Map(map) => serde_json::Value::Object(self.map_to_json(map, options)?),
        };

        Ok(Some(json))
    }

    fn map_to_json(
        &self,
        map: &ValueMap,
        options: &CodecOptions,
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        let mut obj = serde_json::Map::new();

        match &options.key_allowlist {
            Some(keys) => {
                for key in keys {
                    if obj.contains_key(key) {
                        continue;
                    }
                    if let Some(item) = map.get(key) {
                        if let Some(json) = self.to_json(key, item, options)? {
                            obj.insert(key.clone(), json);
                        }
                    }
                }
            }
            None => {
                for (key, item) in map {
                    if let Some(json) = self.to_json(key, item, options)? {
                        obj.insert(key.clone(), json);
                    }
                }
            }
        }

        Ok(obj)
    }

    /// Integral floats within the exactly representable range are written
    /// without a fraction, so `42.0` encodes as `42`.
    fn float_to_json(&self, f: f64, original: &CodecValue) -> Result<serde_json::Value> {
        let integral = f.is_finite()
            && f.fract() == 0.0
            && f.abs() <= MAX_SAFE_INTEGER
            && !(f == 0.0 && f.is_sign_negative());
        if integral {
            return Ok(serde_json::Value::from(f as i64));
        }

        match serde_json::Number::from_f64(f) {
            Some(n) => Ok(serde_json::Value::Number(n)),
            None if self.reject_non_finite => Err(CodecError::unsupported_value(
                JSON_CODEC_NAME,
                original.type_name(),
                format!("non-finite number {f}"),
            )),
            None => Ok(serde_json::Value::Null),
        }
    }

    fn write_json(json: &serde_json::Value, options: &CodecOptions) -> Result<Vec<u8>> {
        let unit = options.indent.as_ref().and_then(|indent| indent.unit());
        let Some(unit) = unit else {
            return serde_json::to_vec(json)
                .map_err(|e| CodecError::unsupported_value(JSON_CODEC_NAME, "value", e.to_string()));
        };

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(unit.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        json.serialize(&mut serializer)
            .map_err(|e| CodecError::unsupported_value(JSON_CODEC_NAME, "value", e.to_string()))?;
        Ok(buf)
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    /// Parse one complete JSON text with no nesting limit.
    fn parse(data: &[u8]) -> serde_json::Result<serde_json::Value> {
        let mut deserializer = serde_json::Deserializer::from_slice(data);
        deserializer.disable_recursion_limit();
        let json = serde_json::Value::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(json)
    }

    /// Convert parsed JSON to a value, reviving children before parents.
    fn from_json(key: &str, json: serde_json::Value, reviver: Option<&dyn ValueHook>) -> CodecValue {
        let value = match json {
            serde_json::Value::Null => CodecValue::Null,
            serde_json::Value::Bool(b) => CodecValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CodecValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    CodecValue::UInt(u)
                } else {
                    // serde_json numbers are always one of i64, u64, or f64
                    CodecValue::Float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => CodecValue::String(s),
            serde_json::Value::Array(arr) => CodecValue::Array(
                arr.into_iter()
                    .enumerate()
                    .map(|(index, item)| Self::from_json(&index.to_string(), item, reviver))
                    .collect(),
            ),
            serde_json::Value::Object(obj) => {
                let mut map = ValueMap::with_capacity(obj.len());
                for (k, item) in obj {
                    let revived = Self::from_json(&k, item, reviver);
                    if !revived.is_undefined() {
                        map.insert(k, revived);
                    }
                }
                CodecValue::Map(map)
            }
        };

        match reviver {
            Some(hook) => hook.apply(key, value),
            None => value,
        }
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        JSON_CODEC_NAME
    }

    fn display_name(&self) -> &str {
        "JavaScript Object Notation (JSON)"
    }

    fn mime_types(&self) -> &[&'static str] {
        JSON_MIME_TYPES
    }

    fn encode(&self, value: &CodecValue, options: &CodecOptions) -> Result<Vec<u8>> {
        match self.to_json("", value, options)? {
            Some(json) => Self::write_json(&json, options),
            None => Err(CodecError::unsupported_value(
                JSON_CODEC_NAME,
                CodecValue::Undefined.type_name(),
                "root value produces no JSON text",
            )),
        }
    }

    fn decode(&self, data: &[u8], options: &CodecOptions) -> Result<Option<CodecValue>> {
        let json = match Self::parse(data) {
            Ok(json) => json,
            Err(e) => {
                debug!(
                    codec = JSON_CODEC_NAME,
                    error = %e,
                    len = data.len(),
                    "could not decode input"
                );
                return Ok(None);
            }
        };

        let value = Self::from_json("", json, options.reviver.as_deref());
        Ok((!value.is_undefined()).then_some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &CodecValue) -> Vec<u8> {
        JsonCodec::new().encode(value, &CodecOptions::new()).unwrap()
    }

    fn decode(data: &[u8]) -> Option<CodecValue> {
        JsonCodec::new().decode(data, &CodecOptions::new()).unwrap()
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode(&CodecValue::Null), b"null");
        assert_eq!(encode(&CodecValue::from("")), b"\"\"");
        assert_eq!(encode(&CodecValue::from(42)), b"42");
        assert_eq!(encode(&CodecValue::from(42.5)), b"42.5");
        assert_eq!(encode(&CodecValue::Bool(false)), b"false");
    }

    #[test]
    fn test_encode_integral_float_as_integer() {
        assert_eq!(encode(&CodecValue::Float64(42.0)), b"42");
        assert_eq!(encode(&CodecValue::Float32(-3.0)), b"-3");
        assert_eq!(encode(&CodecValue::Float64(-0.0)), b"-0.0");
        assert_eq!(encode(&CodecValue::Float64(1e300)), b"1e300");
    }

    #[test]
    fn test_encode_non_finite_as_null() {
        assert_eq!(encode(&CodecValue::Float64(f64::NAN)), b"null");
        assert_eq!(encode(&CodecValue::Float32(f32::INFINITY)), b"null");
    }

    #[test]
    fn test_encode_undefined_map_value_omitted() {
        let value: CodecValue = [("a", CodecValue::Undefined), ("b", CodecValue::Int(1))]
            .into_iter()
            .collect();
        assert_eq!(encode(&value), br#"{"b":1}"#);
    }

    #[test]
    fn test_encode_undefined_array_element_is_null() {
        let value = CodecValue::Array(vec![CodecValue::Undefined, CodecValue::Int(1)]);
        assert_eq!(encode(&value), b"[null,1]");
    }

    #[test]
    fn test_encode_preserves_insertion_order() {
        let value: CodecValue = [("z", CodecValue::Int(1)), ("a", CodecValue::Int(2))]
            .into_iter()
            .collect();
        assert_eq!(encode(&value), br#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_decode_numbers() {
        assert!(matches!(decode(b"42"), Some(CodecValue::Int(42))));
        assert!(matches!(
            decode(b"18446744073709551615"),
            Some(CodecValue::UInt(u64::MAX))
        ));
        assert!(matches!(decode(b"-1.5"), Some(CodecValue::Float64(f)) if f == -1.5));
    }

    #[test]
    fn test_decode_null_literal() {
        assert!(matches!(decode(b"null"), Some(CodecValue::Null)));
        assert_eq!(decode(b"\"null\""), Some(CodecValue::from("null")));
    }

    #[test]
    fn test_decode_syntax_error_is_none() {
        assert_eq!(decode(b"{\"a\":"), None);
        assert_eq!(decode(b""), None);
        assert_eq!(decode(b"NaN"), None);
        assert_eq!(decode(&[0xff, 0xfe]), None);
    }

    #[test]
    fn test_reviver_runs_bottom_up() {
        let seen = std::sync::Mutex::new(Vec::new());
        let hook = |key: &str, value: CodecValue| {
            seen.lock().unwrap().push(key.to_string());
            value
        };
        let value = JsonCodec::from_json(
            "",
            serde_json::json!({"a": [1, 2], "b": true}),
            Some(&hook),
        );
        assert!(value.is_container());
        assert_eq!(*seen.lock().unwrap(), vec!["0", "1", "a", "b", ""]);
    }
}
