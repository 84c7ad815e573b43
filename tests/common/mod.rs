// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use bytestream_codecs::{CodecOptions, CodecValue, ValueMap};

// ============================================================================
// Value Builders
// ============================================================================

/// Build a map value from key/value pairs, keeping their order.
pub fn map<const N: usize>(entries: [(&str, CodecValue); N]) -> CodecValue {
    let map: ValueMap = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    CodecValue::Map(map)
}

/// Build an array value.
pub fn array<const N: usize>(items: [CodecValue; N]) -> CodecValue {
    CodecValue::Array(items.into())
}

/// Build a string value.
pub fn string(s: &str) -> CodecValue {
    CodecValue::String(s.to_string())
}

/// The value set every codec must round-trip, with the codec's own name as
/// one of the strings.
pub fn shared_values(codec_name: &str) -> Vec<CodecValue> {
    vec![
        CodecValue::Null,
        string(""),
        string(codec_name),
        CodecValue::Int(42),
        CodecValue::Float64(42.5),
        CodecValue::Bool(true),
        CodecValue::Bool(false),
        array([]),
        array([CodecValue::Int(1), CodecValue::Int(2), CodecValue::Int(3)]),
        array([string("a"), string("b"), string("c")]),
        map([]),
        map([("foo", string("bar"))]),
    ]
}

/// Floats with no textual representation.
pub fn non_finite_values() -> Vec<CodecValue> {
    vec![
        CodecValue::Float64(f64::NAN),
        CodecValue::Float64(f64::INFINITY),
        CodecValue::Float64(f64::NEG_INFINITY),
    ]
}

/// A nested document mixing every textual type.
pub fn nested_document() -> CodecValue {
    map([
        ("id", CodecValue::Int(7)),
        ("name", string("sensor")),
        ("ratio", CodecValue::Float64(0.25)),
        ("active", CodecValue::Bool(true)),
        ("tags", array([string("a"), string("b")])),
        (
            "meta",
            map([
                ("owner", CodecValue::Null),
                ("limits", array([CodecValue::Int(-1), CodecValue::Int(300)])),
            ]),
        ),
    ])
}

/// Options with every field unset.
pub fn no_options() -> CodecOptions {
    CodecOptions::new()
}
