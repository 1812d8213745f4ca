//! Flattens a [`Value`] tree into an ordered [`Field`] list.

use formobj_path::{validate_path, Marker, Path, PathError, Segment};

use crate::field::Field;
use crate::leaf::Leaf;
use crate::value::{Mapping, Value};

/// Flatten `root` into fields.
///
/// Mapping keys are visited in insertion order and sequence elements in
/// index order. Every field of a sequence element is tagged `[~]`, except the
/// element's first field, which is tagged `[^]`. `Absent` values, empty
/// containers, and a leaf at the root produce no fields.
///
/// Keys are written as they are. A key that is empty, `^`, `~`, or that
/// contains a bracket reads back as something else; use [`encode_checked`]
/// to reject such trees.
///
/// # Example
///
/// ```
/// use formobj::{encode, Value};
/// use serde_json::json;
///
/// let root = Value::from(json!({"prop1": [{"a": "x"}, {"c": "z"}]}));
/// let names: Vec<String> = encode(&root).iter().map(|f| f.wire_name()).collect();
/// assert_eq!(names, ["prop1[^][a]", "prop1[^][c]"]);
/// ```
pub fn encode(root: &Value) -> Vec<Field> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    encode_into(root, &mut prefix, &mut out);
    out
}

/// [`encode`], failing on the first path that would not read back as
/// written.
///
/// # Example
///
/// ```
/// use formobj::{encode_checked, PathError, Value};
/// use serde_json::json;
///
/// assert!(encode_checked(&Value::from(json!({"a": ["1"]}))).is_ok());
/// assert_eq!(
///     encode_checked(&Value::from(json!({"a": {"^": "1"}}))),
///     Err(PathError::UnrepresentableKey("^".to_string()))
/// );
/// ```
pub fn encode_checked(root: &Value) -> Result<Vec<Field>, PathError> {
    let fields = encode(root);
    for field in &fields {
        validate_path(&field.path)?;
    }
    Ok(fields)
}

/// [`encode`] for a mapping root.
pub fn encode_mapping(root: &Mapping) -> Vec<Field> {
    let mut out = Vec::new();
    let mut prefix = Vec::new();
    encode_entries(root, &mut prefix, &mut out);
    out
}

/// [`encode`] with every path rendered in wire form.
pub fn encode_wire(root: &Value) -> Vec<(String, Leaf)> {
    encode(root)
        .into_iter()
        .map(|field| (field.wire_name(), field.value))
        .collect()
}

fn encode_into(value: &Value, prefix: &mut Vec<Segment>, out: &mut Vec<Field>) {
    match value {
        Value::Absent => {}
        Value::Leaf(leaf) => {
            // An empty prefix only happens for a leaf at the root.
            if let Ok(path) = Path::new(prefix.clone()) {
                out.push(Field::new(path, leaf.clone()));
            }
        }
        Value::Mapping(map) => encode_entries(map, prefix, out),
        Value::Sequence(items) => {
            let depth = prefix.len();
            prefix.push(Segment::ArrayBoundary(Marker::Continue));
            for item in items {
                let start = out.len();
                encode_into(item, prefix, out);
                if let Some(first) = out.get_mut(start) {
                    first.path.set_marker(depth, Marker::NewItem);
                }
            }
            prefix.pop();
        }
    }
}

fn encode_entries(map: &Mapping, prefix: &mut Vec<Segment>, out: &mut Vec<Field>) {
    for (key, value) in map {
        prefix.push(Segment::Key(key.clone()));
        encode_into(value, prefix, out);
        prefix.pop();
    }
}
