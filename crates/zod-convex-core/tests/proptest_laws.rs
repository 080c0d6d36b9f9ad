//! Property-based tests for the conversion laws.
//!
//! Generates arbitrary convertible schema trees (primitives, composites and
//! wrappers, depth-limited) and checks that the wrapper, numeric and shape
//! laws hold for every generated inner node.

use proptest::prelude::*;
use zod_convex_core::schema::StringFormat;
use zod_convex_core::{convert, convert_shape, z, SchemaNode, ValidatorNode};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_field_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,10}"
}

fn arb_leaf() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        Just(z::any()),
        Just(z::boolean()),
        Just(z::number()),
        Just(z::int32()),
        Just(z::bigint()),
        Just(z::null()),
        Just(z::string()),
        (0..StringFormat::BUILT_IN.len())
            .prop_map(|i| z::string_format(StringFormat::BUILT_IN[i].clone())),
        "[a-z]{1,6}".prop_map(|s| z::literal(s)),
        "[a-z]{1,6}".prop_map(|s| z::zid(s)),
    ]
}

fn arb_node() -> impl Strategy<Value = SchemaNode> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(SchemaNode::array),
            inner.clone().prop_map(SchemaNode::optional),
            inner.clone().prop_map(SchemaNode::nullable),
            inner.clone().prop_map(SchemaNode::readonly),
            inner.clone().prop_map(|n| n.catch(0)),
            proptest::collection::vec(inner.clone(), 1..4).prop_map(|options| z::union(options)),
            proptest::collection::vec(inner.clone(), 1..4).prop_map(|items| z::tuple(items)),
            proptest::collection::vec((arb_field_name(), inner.clone()), 0..4)
                .prop_map(|fields| z::object(fields)),
            inner.prop_map(|value| z::record(z::string(), value)),
        ]
    })
}

// ---------------------------------------------------------------------------
// Laws
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn conversion_is_deterministic(node in arb_node()) {
        let first = convert(&node).unwrap();
        let second = convert(&node).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn nonoptional_strips_nullish_optional_layer(
        node in arb_node().prop_filter("optional roots normalise differently", |n| !n.is_optional())
    ) {
        let inner = convert(&node).unwrap();
        let expected = ValidatorNode::union([inner, ValidatorNode::Null]);
        prop_assert_eq!(convert(&z::nonoptional(z::nullish(node.clone()))).unwrap(), expected.clone());
        prop_assert_eq!(
            convert(&z::optional(z::nonoptional(z::nullish(node)))).unwrap(),
            ValidatorNode::optional(expected)
        );
    }

    #[test]
    fn optional_never_nests(node in arb_node()) {
        let converted = convert(&node.optional().optional()).unwrap();
        match converted {
            ValidatorNode::Optional(inner) => prop_assert!(!inner.is_optional()),
            other => prop_assert!(false, "expected optional, got {:?}", other),
        }
    }

    #[test]
    fn unions_are_flat_and_distinct(node in arb_node()) {
        fn check(v: &ValidatorNode) -> bool {
            match v {
                ValidatorNode::Union(members) => {
                    !members.is_empty()
                        && members
                            .iter()
                            .enumerate()
                            .all(|(i, m)| !members[..i].contains(m))
                        && members.iter().all(|m| !matches!(m, ValidatorNode::Union(_)) && check(m))
                }
                ValidatorNode::Array(e) | ValidatorNode::Optional(e) => check(e),
                ValidatorNode::Object(fields) => fields.values().all(check),
                ValidatorNode::Record { key, value } => check(key) && check(value),
                _ => true,
            }
        }
        prop_assert!(check(&convert(&node).unwrap()));
    }

    #[test]
    fn shape_matches_object(fields in proptest::collection::vec((arb_field_name(), arb_node()), 0..5)) {
        let shape = z::shape(fields.clone());
        let from_shape = convert_shape(&shape).unwrap();
        let from_object = convert(&z::object(fields)).unwrap();
        prop_assert_eq!(from_shape, from_object);
    }

    #[test]
    fn transparent_wrappers_are_erased(node in arb_node()) {
        let plain = convert(&node).unwrap();
        prop_assert_eq!(convert(&node.clone().readonly()).unwrap(), plain.clone());
        prop_assert_eq!(convert(&node.clone().catch("x")).unwrap(), plain.clone());
        prop_assert_eq!(convert(&z::lazy({
            let node = node.clone();
            move || node.clone()
        })).unwrap(), plain.clone());
        prop_assert_eq!(convert(&z::string().pipe(node)).unwrap(), plain);
    }
}
