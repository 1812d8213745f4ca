use formobj::{decode, decode_wire, encode, encode_wire, mapping_to_json, DecodeOptions, Mapping, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    "[a-z0-9 ]{0,6}".prop_map(Value::scalar)
}

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,3}".prop_map(String::from)
}

/// Arbitrary trees. With `sparse`, absent values and empty containers are
/// mixed in.
fn tree(sparse: bool) -> impl Strategy<Value = Value> {
    let min = usize::from(!sparse);
    let leaf = if sparse {
        prop_oneof![1 => Just(Value::Absent), 4 => scalar()].boxed()
    } else {
        scalar().boxed()
    };
    leaf.prop_recursive(4, 48, 4, move |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), min..4).prop_map(Value::Sequence),
            proptest::collection::vec((key(), inner), min..4)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect())),
        ]
    })
}

fn root(sparse: bool) -> impl Strategy<Value = Mapping> {
    proptest::collection::vec((key(), tree(sparse)), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

/// The tree with absent values and empty containers removed bottom-up.
fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Absent => None,
        Value::Leaf(_) => Some(value.clone()),
        Value::Mapping(map) => {
            let map = prune_mapping(map);
            (!map.is_empty()).then_some(Value::Mapping(map))
        }
        Value::Sequence(items) => {
            let items: Vec<Value> = items.iter().filter_map(prune).collect();
            (!items.is_empty()).then_some(Value::Sequence(items))
        }
    }
}

fn prune_mapping(map: &Mapping) -> Mapping {
    map.iter()
        .filter_map(|(k, v)| prune(v).map(|v| (k.clone(), v)))
        .collect()
}

/// Serialized form, so mapping key order takes part in comparisons.
fn ordered(map: &Mapping) -> String {
    mapping_to_json(map).to_string()
}

fn leaf_array() -> impl Strategy<Value = Value> {
    proptest::collection::vec(scalar(), 1..6).prop_map(Value::Sequence)
}

/// Flat mappings that all start with key `a`.
fn keyed_mapping_array() -> impl Strategy<Value = Value> {
    let element = (scalar(), proptest::collection::vec(("[b-z]{1,2}", scalar()), 0..3)).prop_map(
        |(first, rest)| {
            let mut map = Mapping::new();
            map.insert("a".to_string(), first);
            map.extend(rest);
            Value::Mapping(map)
        },
    );
    proptest::collection::vec(element, 1..5).prop_map(Value::Sequence)
}

/// Leaves with inner leaf arrays between them, never two arrays in a row.
fn alternating_array() -> impl Strategy<Value = Value> {
    let run = (scalar(), proptest::option::of(proptest::collection::vec(scalar(), 1..4)));
    proptest::collection::vec(run, 1..5).prop_map(|runs| {
        let mut items = Vec::new();
        for (leaf, inner) in runs {
            items.push(leaf);
            if let Some(inner) = inner {
                items.push(Value::Sequence(inner));
            }
        }
        Value::Sequence(items)
    })
}

fn inferable_root() -> impl Strategy<Value = Mapping> {
    let shape = prop_oneof![leaf_array(), keyed_mapping_array(), alternating_array()];
    proptest::collection::vec((key(), shape), 0..4).prop_map(|entries| entries.into_iter().collect())
}

fn strip_markers(name: &str) -> String {
    name.replace("[^]", "[]").replace("[~]", "[]")
}

proptest! {
    #[test]
    fn dense_trees_survive_encode_then_decode(root in root(false)) {
        let fields = encode(&Value::Mapping(root.clone()));
        let back = decode(fields, Mapping::new()).unwrap();
        prop_assert_eq!(ordered(&back), ordered(&root));
    }

    #[test]
    fn absent_and_empty_values_are_erased(root in root(true)) {
        let fields = encode(&Value::Mapping(root.clone()));
        let back = decode(fields, Mapping::new()).unwrap();
        prop_assert_eq!(ordered(&back), ordered(&prune_mapping(&root)));
    }

    #[test]
    fn encoded_fields_follow_tree_order(root in root(false)) {
        let names: Vec<String> = encode_wire(&Value::Mapping(root.clone()))
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        let keys: Vec<&String> = root.keys().collect();
        let mut heads: Vec<&str> = names
            .iter()
            .map(|n| n.split('[').next().unwrap_or_default())
            .collect();
        heads.dedup();
        prop_assert_eq!(heads, keys);
    }

    #[test]
    fn heuristic_matches_explicit_markers_on_inferable_shapes(root in inferable_root()) {
        let tree = Value::Mapping(root.clone());
        let explicit = decode(encode(&tree), Mapping::new()).unwrap();

        let stripped: Vec<(String, formobj::Leaf)> = encode_wire(&tree)
            .into_iter()
            .map(|(name, leaf)| (strip_markers(&name), leaf))
            .collect();
        let inferred = decode_wire(stripped, Mapping::new(), &DecodeOptions::default()).unwrap();

        prop_assert_eq!(ordered(&inferred), ordered(&explicit));
        prop_assert_eq!(ordered(&inferred), ordered(&root));
    }
}
