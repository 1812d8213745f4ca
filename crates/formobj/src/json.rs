//! Conversions between [`Value`] and `serde_json::Value`.
//!
//! JSON is the pass-through tree format: a transport that already receives
//! a nested document converts it here and skips the flat codec entirely.
//! Booleans and numbers become scalars holding their JSON text; `null`
//! becomes [`Value::Absent`].

use crate::leaf::Leaf;
use crate::value::{Mapping, Value};

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::scalar(b.to_string()),
            serde_json::Value::Number(n) => Value::scalar(n.to_string()),
            serde_json::Value::String(s) => Value::scalar(s),
            serde_json::Value::Array(arr) => {
                Value::Sequence(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Mapping(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Absent => serde_json::Value::Null,
            Value::Leaf(leaf) => leaf_to_json(leaf),
            Value::Mapping(map) => mapping_to_json(map),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        serde_json::Value::from(&v)
    }
}

/// Attachments render as `{"location": "..."}`.
fn leaf_to_json(leaf: &Leaf) -> serde_json::Value {
    match leaf {
        Leaf::Scalar(s) => serde_json::Value::String(s.clone()),
        Leaf::Attachment(a) => serde_json::json!({ "location": a.location() }),
    }
}

pub fn to_json(value: &Value) -> serde_json::Value {
    serde_json::Value::from(value)
}

pub fn mapping_to_json(map: &Mapping) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
            .collect(),
    )
}

/// Converts a JSON object into a [`Mapping`]. Returns `None` for any other
/// JSON type.
pub fn mapping_from_json(v: serde_json::Value) -> Option<Mapping> {
    match Value::from(v) {
        Value::Mapping(map) => Some(map),
        _ => None,
    }
}
