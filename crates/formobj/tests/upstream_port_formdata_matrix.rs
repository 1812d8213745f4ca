use formobj::{decode, encode, DecodeError, Field, InjectError, Mapping, NodeKind, Value};
use serde_json::json;

fn decode_pairs(pairs: &[(&str, &str)]) -> Result<Value, DecodeError> {
    let fields = pairs
        .iter()
        .map(|(name, value)| Field::parse(name, *value).expect("well-formed name"))
        .collect();
    decode(fields, Mapping::new())
        .map(Value::Mapping)
        .map_err(|failure| failure.error)
}

fn assert_decodes(pairs: &[(&str, &str)], expected: serde_json::Value) {
    let got = decode_pairs(pairs).expect("decode must succeed");
    assert_eq!(got, Value::from(expected));
}

#[test]
fn formdata_flat_object() {
    assert_decodes(
        &[
            ("prop1", "value1"),
            ("prop2", "value2"),
            ("prop3", "value3"),
            ("[prop4]", "value4"),
            ("[prop5]", "value5"),
            ("[prop6]", "value6"),
        ],
        json!({
            "prop1": "value1", "prop2": "value2", "prop3": "value3",
            "prop4": "value4", "prop5": "value5", "prop6": "value6",
        }),
    );
}

#[test]
fn formdata_nested_fields() {
    assert_decodes(
        &[
            ("prop1[nested1]", "value1"),
            ("prop1[nested2]", "value2"),
            ("[prop2][nested1]", "value3"),
            ("[prop2][nested2]", "value4"),
        ],
        json!({
            "prop1": {"nested1": "value1", "nested2": "value2"},
            "prop2": {"nested1": "value3", "nested2": "value4"},
        }),
    );
}

#[test]
fn formdata_deeply_nested_fields() {
    assert_decodes(
        &[
            ("prop1[nested1]", "value1"),
            ("prop1[nested2][deep1]", "value2"),
            ("prop1[nested2][deep2][mega1]", "value3"),
            ("prop1[nested2][deep2][mega2]", "value4"),
            ("[prop2][nested1]", "value5"),
            ("[prop2][nested2][deep1]", "value6"),
            ("[prop2][nested2][deep2][mega1]", "value7"),
            ("[prop2][nested2][deep2][mega2]", "value8"),
        ],
        json!({
            "prop1": {
                "nested1": "value1",
                "nested2": {"deep1": "value2", "deep2": {"mega1": "value3", "mega2": "value4"}},
            },
            "prop2": {
                "nested1": "value5",
                "nested2": {"deep1": "value6", "deep2": {"mega1": "value7", "mega2": "value8"}},
            },
        }),
    );
}

#[test]
fn formdata_arrays() {
    assert_decodes(
        &[
            ("prop1[]", "value1"),
            ("prop1[]", "value2"),
            ("[prop2][]", "value3"),
            ("[prop2][]", "value4"),
        ],
        json!({"prop1": ["value1", "value2"], "prop2": ["value3", "value4"]}),
    );
}

#[test]
fn formdata_nested_arrays() {
    assert_decodes(
        &[
            ("prop1[]", "value1"),
            ("prop1[]", "value2"),
            ("prop1[][]", "value3"),
            ("prop1[][]", "value4"),
            ("prop1[][][]", "value5"),
            ("prop1[][][]", "value6"),
        ],
        json!({"prop1": ["value1", "value2", ["value3", "value4", ["value5", "value6"]]]}),
    );
}

#[test]
fn formdata_nested_arrays_with_multiple_levels() {
    assert_decodes(
        &[
            ("prop1[]", "value1"),
            ("prop1[][]", "value2"),
            ("prop1[]", "value3"),
            ("prop1[][]", "value4"),
            ("prop1[][]", "value5"),
            ("prop1[]", "value6"),
        ],
        json!({"prop1": ["value1", ["value2"], "value3", ["value4", "value5"], "value6"]}),
    );
}

#[test]
fn formdata_array_of_objects() {
    assert_decodes(
        &[
            ("prop1[][a]", "value1"),
            ("prop1[][b]", "value2"),
            ("prop1[][a]", "value3"),
            ("prop1[][b]", "value4"),
        ],
        json!({"prop1": [{"a": "value1", "b": "value2"}, {"a": "value3", "b": "value4"}]}),
    );
}

#[test]
fn formdata_complex_objects() {
    let mut pairs: Vec<(String, String)> = vec![
        ("prop1[a]", "value1"),
        ("prop1[b][c]", "value2"),
        ("prop1[b][d]", "value3"),
        ("prop1[b][e][]", "value4"),
        ("prop1[b][e][]", "value5"),
        ("prop1[b][e][][]", "value6"),
        ("prop1[b][e][][]", "value7"),
        ("prop1[b][e][][][f]", "value8"),
        ("prop1[b][e][][][g]", "value9"),
        ("prop1[b][e][][][f]", "value10"),
    ]
    .into_iter()
    .map(|(n, v)| (n.to_string(), v.to_string()))
    .collect();
    for base in [11, 21] {
        let names = [
            "prop2[][a]",
            "prop2[][b][c]",
            "prop2[][b][d]",
            "prop2[][b][e][]",
            "prop2[][b][e][]",
            "prop2[][b][e][][]",
            "prop2[][b][e][][]",
            "prop2[][b][e][][][f]",
            "prop2[][b][e][][][g]",
            "prop2[][b][e][][][f]",
        ];
        for (i, name) in names.iter().enumerate() {
            pairs.push((name.to_string(), format!("value{}", base + i)));
        }
    }
    let borrowed: Vec<(&str, &str)> = pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();

    let element = |n: usize| {
        let v = |k: usize| format!("value{}", n + k);
        json!({
            "a": v(0),
            "b": {
                "c": v(1),
                "d": v(2),
                "e": [v(3), v(4), [v(5), v(6), {"f": v(7), "g": v(8)}, {"f": v(9)}]],
            },
        })
    };
    let prop1 = element(1);
    assert_decodes(
        &borrowed,
        json!({"prop1": prop1, "prop2": [element(11), element(21)]}),
    );
}

#[test]
fn codec_concrete_scenarios() {
    assert_decodes(
        &[("prop1[nested1]", "v1"), ("prop1[nested2]", "v2")],
        json!({"prop1": {"nested1": "v1", "nested2": "v2"}}),
    );
    assert_decodes(
        &[("prop1[]", "v1"), ("prop1[]", "v2")],
        json!({"prop1": ["v1", "v2"]}),
    );
    assert_decodes(
        &[("prop1[]", "v1"), ("prop1[][]", "v2"), ("prop1[][]", "v3")],
        json!({"prop1": ["v1", ["v2", "v3"]]}),
    );
    assert_decodes(&[("a", "1"), ("a", "2")], json!({"a": "2"}));
}

#[test]
fn codec_disjoint_objects_need_explicit_markers() {
    let tree = Value::from(json!({"prop1": [{"a": "x"}, {"c": "z"}]}));
    let fields = encode(&tree);
    let expected = vec![
        Field::parse("prop1[^][a]", "x").unwrap(),
        Field::parse("prop1[^][c]", "z").unwrap(),
    ];
    assert_eq!(fields, expected);
    assert_eq!(Value::Mapping(decode(fields, Mapping::new()).unwrap()), tree);
}

#[test]
fn codec_heuristic_misgroups_shared_then_new_keys() {
    // {a:1},{a:2},{b:3}: the third element has no key collision, so the
    // heuristic folds it into the second.
    assert_decodes(
        &[("p[][a]", "1"), ("p[][a]", "2"), ("p[][b]", "3")],
        json!({"p": [{"a": "1"}, {"a": "2", "b": "3"}]}),
    );
    assert_decodes(
        &[("p[^][a]", "1"), ("p[^][a]", "2"), ("p[^][b]", "3")],
        json!({"p": [{"a": "1"}, {"a": "2"}, {"b": "3"}]}),
    );
}

#[test]
fn codec_failures_name_the_field() {
    let err = decode_pairs(&[("a[]", "1"), ("a[x]", "2")]).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.path, "a[x]");
    assert_eq!(
        err.source,
        InjectError::KeyArrayConflict {
            depth: 0,
            expected: NodeKind::Mapping,
            found: NodeKind::Sequence,
        }
    );

    let err = decode_pairs(&[("a[~][b]", "1")]).unwrap_err();
    assert_eq!(err.source, InjectError::ArrayBoundaryUnderflow { depth: 1 });
}

#[test]
fn codec_absent_keys_stay_unset() {
    let tree = Value::from(json!({"a": null, "b": "1"}));
    let fields = encode(&tree);
    assert_eq!(fields.len(), 1);
    let out = decode(fields, Mapping::new()).unwrap();
    assert!(!out.contains_key("a"));
    assert_eq!(out.get("b"), Some(&Value::scalar("1")));
}

#[test]
fn codec_failure_keeps_committed_fields() {
    let mut root = Mapping::new();
    root.insert("keep".to_string(), Value::scalar("me"));
    let fields = vec![
        Field::parse("a", "1").unwrap(),
        Field::parse("b[~]", "2").unwrap(),
    ];
    let failure = decode(fields, root).unwrap_err();
    assert_eq!(failure.error.index, 1);
    assert_eq!(
        Value::Mapping(failure.into_root()),
        Value::from(json!({"keep": "me", "a": "1"}))
    );
}
