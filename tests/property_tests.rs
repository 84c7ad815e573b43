// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Property-based round-trip tests for both codecs.

use proptest::prelude::*;

use bytestream_codecs::encoding::{Codec, JsonCodec, MsgPackCodec};
use bytestream_codecs::{CodecOptions, CodecValue, Indent, ValueMap};

/// Values the textual format can represent.
fn arb_json_value() -> impl Strategy<Value = CodecValue> {
    let leaf = prop_oneof![
        Just(CodecValue::Null),
        any::<bool>().prop_map(CodecValue::Bool),
        any::<i64>().prop_map(CodecValue::Int),
        any::<u64>().prop_map(CodecValue::UInt),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(CodecValue::Float64),
        ".*".prop_map(CodecValue::String),
    ];

    leaf.prop_recursive(
        4,  // depth
        64, // size
        8,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(CodecValue::Array),
                prop::collection::vec((".*", inner), 0..8).prop_map(|entries| {
                    CodecValue::Map(entries.into_iter().collect::<ValueMap>())
                }),
            ]
        },
    )
}

/// Values the binary format can represent, including non-finite floats.
fn arb_msgpack_value() -> impl Strategy<Value = CodecValue> {
    let leaf = prop_oneof![
        Just(CodecValue::Null),
        any::<bool>().prop_map(CodecValue::Bool),
        any::<i64>().prop_map(CodecValue::Int),
        any::<u64>().prop_map(CodecValue::UInt),
        any::<f32>().prop_map(CodecValue::Float32),
        any::<f64>().prop_map(CodecValue::Float64),
        Just(CodecValue::Float64(f64::NAN)),
        Just(CodecValue::Float64(f64::INFINITY)),
        Just(CodecValue::Float64(f64::NEG_INFINITY)),
        ".*".prop_map(CodecValue::String),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(CodecValue::Bytes),
        (any::<i8>(), prop::collection::vec(any::<u8>(), 0..20))
            .prop_map(|(type_id, data)| CodecValue::Ext(type_id, data)),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..20).prop_map(CodecValue::Array),
            prop::collection::vec((".*", inner), 0..20).prop_map(|entries| {
                CodecValue::Map(entries.into_iter().collect::<ValueMap>())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn json_round_trip(value in arb_json_value()) {
        let codec = JsonCodec::new();
        let encoded = codec.encode(&value, &CodecOptions::new()).expect("encode");
        let decoded = codec.decode(&encoded, &CodecOptions::new()).expect("decode");
        prop_assert_eq!(decoded, Some(value));
    }

    #[test]
    fn json_indent_does_not_change_value(value in arb_json_value(), width in 0usize..12) {
        let codec = JsonCodec::new();
        let options = CodecOptions::new().with_indent(Indent::Spaces(width));
        let pretty = codec.encode(&value, &options).expect("encode");
        let compact = codec.encode(&value, &CodecOptions::new()).expect("encode");
        prop_assert_eq!(
            codec.decode(&pretty, &CodecOptions::new()).expect("decode"),
            codec.decode(&compact, &CodecOptions::new()).expect("decode")
        );
    }

    #[test]
    fn msgpack_round_trip(value in arb_msgpack_value()) {
        let codec = MsgPackCodec::new();
        let encoded = codec.encode(&value, &CodecOptions::new()).expect("encode");
        let decoded = codec.decode(&encoded, &CodecOptions::new()).expect("decode");
        prop_assert_eq!(decoded, Some(value));
    }

    #[test]
    fn msgpack_decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = MsgPackCodec::new().decode(&data, &CodecOptions::new());
    }

    #[test]
    fn json_decode_never_errors(data in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert!(JsonCodec::new().decode(&data, &CodecOptions::new()).is_ok());
    }
}
