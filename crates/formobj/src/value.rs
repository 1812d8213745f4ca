//! [`Value`]: the nested tree the codec flattens and rebuilds.

use std::fmt;

use indexmap::IndexMap;

use crate::leaf::Leaf;

/// Ordered string-keyed container.
///
/// Insertion order drives encoding; equality ignores it.
pub type Mapping = IndexMap<String, Value>;

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// null / undefined. Has no wire representation.
    #[default]
    Absent,
    Leaf(Leaf),
    Mapping(Mapping),
    Sequence(Vec<Value>),
}

/// The kind of a [`Value`], used in conflict reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Absent,
    Leaf,
    Mapping,
    Sequence,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Mapping | NodeKind::Sequence)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Absent => "nothing",
            NodeKind::Leaf => "leaf",
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
        })
    }
}

impl Value {
    pub fn scalar(s: impl Into<String>) -> Value {
        Value::Leaf(Leaf::Scalar(s.into()))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Value::Absent => NodeKind::Absent,
            Value::Leaf(_) => NodeKind::Leaf,
            Value::Mapping(_) => NodeKind::Mapping,
            Value::Sequence(_) => NodeKind::Sequence,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Value::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        self.as_leaf().and_then(Leaf::as_scalar)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Follows object keys from this node. Returns `None` as soon as a key is
    /// missing or a non-mapping is reached.
    pub fn get_in(&self, keys: &[&str]) -> Option<&Value> {
        let mut current = self;
        for key in keys {
            current = current.as_mapping()?.get(*key)?;
        }
        Some(current)
    }
}

impl From<Leaf> for Value {
    fn from(leaf: Leaf) -> Self {
        Value::Leaf(leaf)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::scalar(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::scalar(s)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}
