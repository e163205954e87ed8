//! Property tests for the binary protocol over arbitrary struct trees.

use bytes::Bytes;
use hbase_thrift_core::{
    GenericStruct, TBinaryInputProtocol, TInputProtocol, TType, TValue, ThriftValue,
};
use proptest::prelude::*;

fn leaf_strategy() -> impl Strategy<Value = TValue> {
    prop_oneof![
        any::<bool>().prop_map(TValue::Bool),
        any::<i8>().prop_map(TValue::I8),
        any::<i16>().prop_map(TValue::I16),
        any::<i32>().prop_map(TValue::I32),
        any::<i64>().prop_map(TValue::I64),
        // Finite doubles only; NaN breaks PartialEq.
        (-1.0e12f64..1.0e12).prop_map(TValue::Double),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(|b| TValue::Binary(Bytes::from(b))),
    ]
}

fn struct_strategy(
    value: impl Strategy<Value = TValue>,
) -> impl Strategy<Value = GenericStruct> {
    prop::collection::vec((any::<i16>(), value), 0..6).prop_map(|fields| {
        fields
            .into_iter()
            .fold(GenericStruct::new(), |acc, (id, value)| acc.with_field(id, value))
    })
}

fn value_strategy() -> impl Strategy<Value = TValue> {
    leaf_strategy().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            struct_strategy(inner.clone()).prop_map(TValue::Struct),
            prop::collection::vec(any::<i32>(), 0..8).prop_map(|items| TValue::List {
                element_type: TType::I32,
                elements: items.into_iter().map(TValue::I32).collect(),
            }),
            prop::collection::vec(struct_strategy(inner.clone()), 0..3).prop_map(|items| {
                TValue::List {
                    element_type: TType::Struct,
                    elements: items.into_iter().map(TValue::Struct).collect(),
                }
            }),
            prop::collection::vec(any::<i16>(), 0..5).prop_map(|items| TValue::Set {
                element_type: TType::I16,
                elements: items.into_iter().map(TValue::I16).collect(),
            }),
            prop::collection::vec(
                (prop::collection::vec(any::<u8>(), 0..6), any::<i64>()),
                0..4
            )
            .prop_map(|entries| TValue::Map {
                key_type: TType::String,
                value_type: TType::I64,
                entries: entries
                    .into_iter()
                    .map(|(k, v)| (TValue::Binary(Bytes::from(k)), TValue::I64(v)))
                    .collect(),
            }),
        ]
    })
}

proptest! {
    /// Decoding an encoded struct yields the same tree.
    #[test]
    fn prop_generic_round_trip(value in struct_strategy(value_strategy())) {
        let bytes = value.to_bytes().unwrap();
        let decoded = GenericStruct::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, value);
    }

    /// Skipping a struct consumes exactly its encoding.
    #[test]
    fn prop_skip_consumes_whole_struct(
        value in struct_strategy(value_strategy()),
        trailer in any::<i32>(),
    ) {
        let mut bytes = value.to_bytes().unwrap();
        bytes.extend_from_slice(&trailer.to_be_bytes());

        let mut input = TBinaryInputProtocol::new(&bytes);
        input.skip(TType::Struct).unwrap();
        prop_assert_eq!(input.remaining(), 4);
        prop_assert_eq!(input.read_i32().unwrap(), trailer);
    }

    /// Every strict prefix of an encoding is rejected.
    #[test]
    fn prop_truncated_input_rejected(value in struct_strategy(value_strategy())) {
        let bytes = value.to_bytes().unwrap();
        for len in 0..bytes.len() {
            prop_assert!(GenericStruct::from_bytes(&bytes[..len]).is_err());
        }
    }

    /// Arbitrary bytes never panic the decoder.
    #[test]
    fn prop_arbitrary_bytes_do_not_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = GenericStruct::from_bytes(&data);
        let mut input = TBinaryInputProtocol::new(&data);
        let _ = input.skip(TType::Struct);
    }
}
