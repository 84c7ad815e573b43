// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! Provides the structured value every codec encodes from and decodes to.
//! Scalars, ordered sequences, and string-keyed maps cover what both the
//! textual and the binary formats can express.

use std::fmt;

use indexmap::IndexMap;

/// String-keyed map preserving insertion order.
///
/// Keys are unique; inserting an existing key replaces its value in place.
pub type ValueMap = IndexMap<String, CodecValue>;

/// Unified value type for serialized data.
///
/// # Equality
///
/// Comparison is deep and numeric-aware: integer and float variants compare
/// by mathematical value (`Int(42) == UInt(42) == Float64(42.0)`), floats with
/// identical bit patterns are equal (so a `NaN` equals itself), and map
/// equality ignores key order.
#[derive(Debug, Clone, Default)]
pub enum CodecValue {
    /// Absent value. Omitted as a map property, nil/null as an array element.
    #[default]
    Undefined,

    Null,

    Bool(bool),

    // Decoders produce Int whenever the value fits; UInt only above i64::MAX
    Int(i64),
    UInt(u64),

    Float32(f32),
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Opaque binary payload
    Bytes(Vec<u8>),

    /// Application-typed payload, MessagePack extension types.
    Ext(i8, Vec<u8>),

    Array(Vec<CodecValue>),

    Map(ValueMap),
}

/// Numeric view used for cross-variant comparison.
#[derive(Clone, Copy)]
enum Numeric {
    Integer(i128),
    Float(f64),
}

impl Numeric {
    fn equals(self, other: Numeric) -> bool {
        match (self, other) {
            (Numeric::Integer(a), Numeric::Integer(b)) => a == b,
            (Numeric::Float(a), Numeric::Float(b)) => a.to_bits() == b.to_bits() || a == b,
            (Numeric::Integer(i), Numeric::Float(f)) | (Numeric::Float(f), Numeric::Integer(i)) => {
                f.is_finite() && f.fract() == 0.0 && f as i128 == i
            }
        }
    }
}

impl CodecValue {
    // ========================================================================
    // Type Checking Predicates
    // ========================================================================

    /// Check if this value is a numeric type (integers or floats).
    pub fn is_numeric(&self) -> bool {
        self.numeric().is_some()
    }

    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(self, CodecValue::Int(_) | CodecValue::UInt(_))
    }

    /// Check if this value is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, CodecValue::Float32(_) | CodecValue::Float64(_))
    }

    /// Check if this value is a container type (array or map).
    pub fn is_container(&self) -> bool {
        matches!(self, CodecValue::Array(_) | CodecValue::Map(_))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CodecValue::Null)
    }

    /// Check if this value is absent.
    pub fn is_undefined(&self) -> bool {
        matches!(self, CodecValue::Undefined)
    }

    // ========================================================================
    // Type Conversion Methods
    // ========================================================================

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Int(v) => Some(*v as f64),
            CodecValue::UInt(v) => Some(*v as f64),
            CodecValue::Float32(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CodecValue::Int(v) => Some(*v),
            CodecValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to u64 (for non-negative integers only).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            CodecValue::Int(v) => u64::try_from(*v).ok(),
            CodecValue::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get the inner boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CodecValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CodecValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<CodecValue>> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get the inner map.
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            CodecValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner map.
    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            CodecValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a map property by key.
    pub fn get(&self, key: &str) -> Option<&CodecValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Undefined => "undefined",
            CodecValue::Null => "null",
            CodecValue::Bool(_) => "bool",
            CodecValue::Int(_) => "int",
            CodecValue::UInt(_) => "uint",
            CodecValue::Float32(_) => "float32",
            CodecValue::Float64(_) => "float64",
            CodecValue::String(_) => "string",
            CodecValue::Bytes(_) => "bytes",
            CodecValue::Ext(_, _) => "ext",
            CodecValue::Array(_) => "array",
            CodecValue::Map(_) => "map",
        }
    }

    fn numeric(&self) -> Option<Numeric> {
        match self {
            CodecValue::Int(v) => Some(Numeric::Integer(*v as i128)),
            CodecValue::UInt(v) => Some(Numeric::Integer(*v as i128)),
            CodecValue::Float32(v) => Some(Numeric::Float(*v as f64)),
            CodecValue::Float64(v) => Some(Numeric::Float(*v)),
            _ => None,
        }
    }
}

impl PartialEq for CodecValue {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.numeric(), other.numeric()) {
            return a.equals(b);
        }
        match (self, other) {
            (CodecValue::Undefined, CodecValue::Undefined) => true,
            (CodecValue::Null, CodecValue::Null) => true,
            (CodecValue::Bool(a), CodecValue::Bool(b)) => a == b,
            (CodecValue::String(a), CodecValue::String(b)) => a == b,
            (CodecValue::Bytes(a), CodecValue::Bytes(b)) => a == b,
            (CodecValue::Ext(ta, a), CodecValue::Ext(tb, b)) => ta == tb && a == b,
            (CodecValue::Array(a), CodecValue::Array(b)) => a == b,
            (CodecValue::Map(a), CodecValue::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for CodecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecValue::Undefined => write!(f, "undefined"),
            CodecValue::Null => write!(f, "null"),
            CodecValue::Bool(v) => write!(f, "{v}"),
            CodecValue::Int(v) => write!(f, "{v}"),
            CodecValue::UInt(v) => write!(f, "{v}"),
            CodecValue::Float32(v) => write!(f, "{v}"),
            CodecValue::Float64(v) => write!(f, "{v}"),
            CodecValue::String(v) => write!(f, "\"{v}\""),
            CodecValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            CodecValue::Ext(t, v) => write!(f, "Ext({t}, <{} bytes>)", v.len()),
            CodecValue::Array(v) => write!(f, "[{} elements]", v.len()),
            CodecValue::Map(v) => write!(f, "{{{} entries}}", v.len()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for CodecValue {
    fn from(v: bool) -> Self {
        CodecValue::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for CodecValue {
            fn from(v: $t) -> Self {
                CodecValue::Int(v as i64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for CodecValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => CodecValue::Int(i),
            Err(_) => CodecValue::UInt(v),
        }
    }
}

impl From<f32> for CodecValue {
    fn from(v: f32) -> Self {
        CodecValue::Float32(v)
    }
}

impl From<f64> for CodecValue {
    fn from(v: f64) -> Self {
        CodecValue::Float64(v)
    }
}

impl From<&str> for CodecValue {
    fn from(v: &str) -> Self {
        CodecValue::String(v.to_string())
    }
}

impl From<String> for CodecValue {
    fn from(v: String) -> Self {
        CodecValue::String(v)
    }
}

impl From<Vec<u8>> for CodecValue {
    fn from(v: Vec<u8>) -> Self {
        CodecValue::Bytes(v)
    }
}

impl From<Vec<CodecValue>> for CodecValue {
    fn from(v: Vec<CodecValue>) -> Self {
        CodecValue::Array(v)
    }
}

impl From<ValueMap> for CodecValue {
    fn from(v: ValueMap) -> Self {
        CodecValue::Map(v)
    }
}

impl<T: Into<CodecValue>> From<Option<T>> for CodecValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CodecValue::Null, Into::into)
    }
}

impl FromIterator<CodecValue> for CodecValue {
    fn from_iter<I: IntoIterator<Item = CodecValue>>(iter: I) -> Self {
        CodecValue::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, CodecValue)> for CodecValue {
    fn from_iter<I: IntoIterator<Item = (K, CodecValue)>>(iter: I) -> Self {
        CodecValue::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_checking() {
        assert!(CodecValue::Int(42).is_numeric());
        assert!(CodecValue::Int(42).is_integer());
        assert!(CodecValue::Float64(2.5).is_float());
        assert!(!CodecValue::Float64(2.5).is_integer());
        assert!(!CodecValue::from("hello").is_numeric());
        assert!(CodecValue::Null.is_null());
        assert!(CodecValue::default().is_undefined());
        assert!(CodecValue::Array(vec![]).is_container());
        assert!(CodecValue::Map(ValueMap::new()).is_container());
    }

    #[test]
    fn test_numeric_equality_across_variants() {
        assert_eq!(CodecValue::Int(42), CodecValue::UInt(42));
        assert_eq!(CodecValue::Int(42), CodecValue::Float64(42.0));
        assert_eq!(CodecValue::Float32(42.5), CodecValue::Float64(42.5));
        assert_ne!(CodecValue::Int(42), CodecValue::Float64(42.5));
        assert_ne!(CodecValue::Int(-1), CodecValue::UInt(u64::MAX));
        assert_ne!(CodecValue::Int(0), CodecValue::Bool(false));
    }

    #[test]
    fn test_nan_equals_same_bits() {
        assert_eq!(CodecValue::Float64(f64::NAN), CodecValue::Float64(f64::NAN));
        assert_eq!(
            CodecValue::Float64(f64::INFINITY),
            CodecValue::Float64(f64::INFINITY)
        );
        assert_ne!(
            CodecValue::Float64(f64::INFINITY),
            CodecValue::Float64(f64::NEG_INFINITY)
        );
        assert_ne!(CodecValue::Float64(f64::NAN), CodecValue::Null);
        assert_eq!(CodecValue::Float64(0.0), CodecValue::Float64(-0.0));
    }

    #[test]
    fn test_map_equality_ignores_order() {
        let a: CodecValue = [("x", CodecValue::Int(1)), ("y", CodecValue::Int(2))]
            .into_iter()
            .collect();
        let b: CodecValue = [("y", CodecValue::Int(2)), ("x", CodecValue::Int(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_as_i64_and_u64() {
        assert_eq!(CodecValue::Int(42).as_i64(), Some(42));
        assert_eq!(CodecValue::UInt(u64::MAX).as_i64(), None);
        assert_eq!(CodecValue::UInt(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(CodecValue::Int(-1).as_u64(), None);
        assert_eq!(CodecValue::Float64(2.5).as_i64(), None);
    }

    #[test]
    fn test_from_u64_prefers_int() {
        assert!(matches!(CodecValue::from(7u64), CodecValue::Int(7)));
        assert!(matches!(CodecValue::from(u64::MAX), CodecValue::UInt(u64::MAX)));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CodecValue::from(None::<i32>), CodecValue::Null);
        assert_eq!(CodecValue::from(Some("a")), CodecValue::from("a"));
    }

    #[test]
    fn test_get() {
        let value: CodecValue = [("foo", CodecValue::from("bar"))].into_iter().collect();
        assert_eq!(value.get("foo").and_then(CodecValue::as_str), Some("bar"));
        assert_eq!(value.get("missing"), None);
        assert_eq!(CodecValue::Int(1).get("foo"), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(CodecValue::Undefined.type_name(), "undefined");
        assert_eq!(CodecValue::Int(0).type_name(), "int");
        assert_eq!(CodecValue::Ext(1, vec![]).type_name(), "ext");
        assert_eq!(CodecValue::Map(ValueMap::new()).type_name(), "map");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CodecValue::Bool(true)), "true");
        assert_eq!(format!("{}", CodecValue::Int(42)), "42");
        assert_eq!(format!("{}", CodecValue::from("test")), "\"test\"");
        assert_eq!(format!("{}", CodecValue::Bytes(vec![1, 2, 3])), "<3 bytes>");
        assert_eq!(format!("{}", CodecValue::Array(vec![])), "[0 elements]");
        assert_eq!(format!("{}", CodecValue::Null), "null");
    }
}
