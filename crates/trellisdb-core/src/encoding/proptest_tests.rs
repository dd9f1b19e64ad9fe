//! Property-based tests for identifier round-trips and key ordering.

#![allow(clippy::expect_used, clippy::float_cmp)]

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use crate::encoding::{
    AttributeIid, ObjectIid, ThingIid, TypeIid, TypeKind, VertexIid,
};
use crate::types::AttributeValue;

/// Strategy for generating arbitrary type kinds.
fn arb_type_kind() -> impl Strategy<Value = TypeKind> {
    prop_oneof![
        Just(TypeKind::Entity),
        Just(TypeKind::Relation),
        Just(TypeKind::Role),
        Just(TypeKind::Attribute),
    ]
}

/// Strategy for generating arbitrary type identifiers.
fn arb_type_iid() -> impl Strategy<Value = TypeIid> {
    (arb_type_kind(), any::<u16>()).prop_map(|(kind, counter)| TypeIid::new(kind, counter))
}

/// Strategy for type identifiers that can own default-form instances.
fn arb_object_owner() -> impl Strategy<Value = TypeIid> {
    (
        prop_oneof![Just(TypeKind::Entity), Just(TypeKind::Relation), Just(TypeKind::Role)],
        any::<u16>(),
    )
        .prop_map(|(kind, counter)| TypeIid::new(kind, counter))
}

/// Strategy for generating arbitrary default-form thing identifiers.
fn arb_object_iid() -> impl Strategy<Value = ObjectIid> {
    (arb_object_owner(), any::<u64>()).prop_map(|(owner, counter)| {
        ObjectIid::new(&owner, counter).expect("owner is never an attribute type")
    })
}

/// Strategy for attribute-type identifiers.
fn arb_attribute_owner() -> impl Strategy<Value = TypeIid> {
    any::<u16>().prop_map(|counter| TypeIid::new(TypeKind::Attribute, counter))
}

/// Timestamps spanning years 1 through 9999 at millisecond granularity.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (-62_135_596_800_000_i64..=253_402_300_799_999).prop_filter_map(
        "timestamp must be in range",
        |millis| DateTime::from_timestamp_millis(millis),
    )
}

/// Strategy for generating arbitrary attribute values.
fn arb_attribute_value() -> impl Strategy<Value = AttributeValue> {
    prop_oneof![
        any::<bool>().prop_map(AttributeValue::Boolean),
        any::<i64>().prop_map(AttributeValue::Integer),
        // Filter out NaN since NaN != NaN
        any::<f64>().prop_filter("not NaN", |f| !f.is_nan()).prop_map(AttributeValue::Float),
        ".{0,40}".prop_map(AttributeValue::Text),
        arb_timestamp().prop_map(AttributeValue::Timestamp),
    ]
}

/// Strategy for generating arbitrary attribute identifiers.
fn arb_attribute_iid() -> impl Strategy<Value = AttributeIid> {
    (arb_attribute_owner(), arb_attribute_value()).prop_map(|(owner, value)| {
        AttributeIid::of(&owner, &value).expect("generated values always fit")
    })
}

/// Strategy for generating arbitrary thing identifiers of either form.
fn arb_thing_iid() -> impl Strategy<Value = ThingIid> {
    prop_oneof![
        arb_object_iid().prop_map(ThingIid::from),
        arb_attribute_iid().prop_map(ThingIid::from),
    ]
}

/// Strategy for generating arbitrary vertex identifiers.
fn arb_vertex_iid() -> impl Strategy<Value = VertexIid> {
    prop_oneof![
        arb_type_iid().prop_map(VertexIid::from),
        arb_thing_iid().prop_map(VertexIid::from),
    ]
}

proptest! {
    #[test]
    fn type_iid_roundtrip(iid in arb_type_iid()) {
        let decoded = TypeIid::decode(iid.as_bytes()).expect("decoding should succeed");
        prop_assert_eq!(decoded.kind(), iid.kind());
        prop_assert_eq!(decoded.counter(), iid.counter());
        prop_assert_eq!(decoded, iid);
    }

    #[test]
    fn object_iid_roundtrip(iid in arb_object_iid()) {
        let decoded = ObjectIid::decode(iid.as_bytes()).expect("decoding should succeed");
        prop_assert_eq!(decoded.counter(), iid.counter());
        prop_assert_eq!(decoded.type_iid(), iid.type_iid());
        prop_assert_eq!(decoded, iid);
    }

    #[test]
    fn attribute_iid_roundtrip(owner in arb_attribute_owner(), value in arb_attribute_value()) {
        let iid = AttributeIid::of(&owner, &value).expect("encoding should succeed");
        let decoded = AttributeIid::decode(iid.as_bytes()).expect("decoding should succeed");
        prop_assert_eq!(decoded.value(), value);
        prop_assert_eq!(decoded.type_iid(), owner);
        prop_assert_eq!(decoded, iid);
    }

    #[test]
    fn thing_iid_roundtrip(thing in arb_thing_iid()) {
        let decoded = ThingIid::decode(thing.as_bytes()).expect("decoding should succeed");
        prop_assert_eq!(decoded, thing);
    }

    #[test]
    fn vertex_iid_roundtrip(vertex in arb_vertex_iid()) {
        let decoded = VertexIid::decode(vertex.as_bytes()).expect("decoding should succeed");
        prop_assert_eq!(decoded, vertex);
    }

    /// Exactly one typed accessor succeeds for any attribute identifier.
    #[test]
    fn one_cast_accessor_succeeds(iid in arb_attribute_iid()) {
        let succeeded = [
            iid.as_boolean().is_ok(),
            iid.as_integer().is_ok(),
            iid.as_float().is_ok(),
            iid.as_text().is_ok(),
            iid.as_timestamp().is_ok(),
        ];
        prop_assert_eq!(succeeded.iter().filter(|ok| **ok).count(), 1);
    }

    #[test]
    fn integer_keys_order_numerically(a in any::<i64>(), b in any::<i64>()) {
        let owner = TypeIid::new(TypeKind::Attribute, 1);
        let ka = AttributeIid::of(&owner, &AttributeValue::Integer(a))
            .expect("encoding should succeed");
        let kb = AttributeIid::of(&owner, &AttributeValue::Integer(b))
            .expect("encoding should succeed");
        prop_assert_eq!(a.cmp(&b), ka.as_bytes().cmp(kb.as_bytes()));
    }

    /// Float keys follow the IEEE total order, which refines `<` on floats.
    #[test]
    fn float_keys_order_numerically(
        a in any::<f64>().prop_filter("not NaN", |f| !f.is_nan()),
        b in any::<f64>().prop_filter("not NaN", |f| !f.is_nan()),
    ) {
        let owner = TypeIid::new(TypeKind::Attribute, 1);
        let ka = AttributeIid::of(&owner, &AttributeValue::Float(a))
            .expect("encoding should succeed");
        let kb = AttributeIid::of(&owner, &AttributeValue::Float(b))
            .expect("encoding should succeed");
        prop_assert_eq!(a.total_cmp(&b), ka.as_bytes().cmp(kb.as_bytes()));
    }

    #[test]
    fn timestamp_keys_order_chronologically(a in arb_timestamp(), b in arb_timestamp()) {
        let owner = TypeIid::new(TypeKind::Attribute, 1);
        let ka = AttributeIid::of(&owner, &AttributeValue::Timestamp(a))
            .expect("encoding should succeed");
        let kb = AttributeIid::of(&owner, &AttributeValue::Timestamp(b))
            .expect("encoding should succeed");
        prop_assert_eq!(a.cmp(&b), ka.as_bytes().cmp(kb.as_bytes()));
    }

    #[test]
    fn object_keys_order_by_counter(a in any::<u64>(), b in any::<u64>()) {
        let owner = TypeIid::new(TypeKind::Entity, 1);
        let ka = ObjectIid::new(&owner, a).expect("owner is an entity type");
        let kb = ObjectIid::new(&owner, b).expect("owner is an entity type");
        prop_assert_eq!(a.cmp(&b), ka.as_bytes().cmp(kb.as_bytes()));
    }

    /// Every schema identifier sorts before every data identifier.
    #[test]
    fn schema_sorts_before_data(type_iid in arb_type_iid(), thing in arb_thing_iid()) {
        prop_assert!(type_iid.as_bytes() < thing.as_bytes());
    }

    /// Identifiers concatenated into a composite key extract back out.
    #[test]
    fn extraction_recovers_identifiers_from_composite_keys(
        first in arb_vertex_iid(),
        second in arb_vertex_iid(),
    ) {
        let mut buf = Vec::new();
        buf.extend_from_slice(first.as_bytes());
        buf.extend_from_slice(second.as_bytes());

        let offset = first.as_bytes().len();
        let extracted_first = VertexIid::extract(&buf, 0).expect("extraction should succeed");
        let extracted_second =
            VertexIid::extract(&buf, offset).expect("extraction should succeed");
        prop_assert_eq!(extracted_first, first);
        prop_assert_eq!(extracted_second, second);
    }

    /// Corrupted/arbitrary bytes should not crash, only return errors.
    #[test]
    fn arbitrary_bytes_dont_crash(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        // This should either succeed or return an error, never panic
        let _ = VertexIid::decode(&bytes);
    }

    /// Arbitrary offsets, including overflowing ones, should not crash.
    #[test]
    fn arbitrary_extractions_dont_crash(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        from in any::<usize>(),
    ) {
        let _ = VertexIid::extract(&bytes, from);
    }

    /// Truncated identifiers should return errors, not panic.
    #[test]
    fn truncated_identifiers_are_rejected(vertex in arb_vertex_iid()) {
        let encoded = vertex.as_bytes();
        for end in 0..encoded.len() {
            prop_assert!(VertexIid::decode(&encoded[..end]).is_err());
        }
    }

    /// Mutated identifiers should return errors or valid values, never panic.
    #[test]
    fn mutated_identifiers_dont_panic(
        vertex in arb_vertex_iid(),
        mutation_idx in any::<usize>(),
        mutation_val in any::<u8>(),
    ) {
        let mut encoded = vertex.as_bytes().to_vec();
        let idx = mutation_idx % encoded.len();
        encoded[idx] = mutation_val;
        // Should either succeed or return error, never panic
        let _ = VertexIid::decode(&encoded);
    }
}
