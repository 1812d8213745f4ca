//! Per-field tree walk.
//!
//! Existing nodes are only navigated; the first node the field creates is
//! built off-tree from the remaining segments and attached in one write. A
//! field that fails therefore leaves the tree exactly as it found it.

use formobj_path::{Marker, Path, Segment};
use tracing::trace;

use super::infer::{infer_continues, Position};
use super::types::InjectError;
use crate::leaf::Leaf;
use crate::value::{Mapping, NodeKind, Value};

/// The container the walk currently stands in.
enum Slot<'a> {
    Mapping(&'a mut Mapping),
    Sequence(&'a mut Vec<Value>),
}

impl<'a> Slot<'a> {
    fn kind(&self) -> NodeKind {
        match self {
            Slot::Mapping(_) => NodeKind::Mapping,
            Slot::Sequence(_) => NodeKind::Sequence,
        }
    }

    /// Steps into `value`, which the next segment needs to be a `wanted`.
    fn enter(value: &'a mut Value, depth: usize, wanted: NodeKind) -> Result<Slot<'a>, InjectError> {
        let found = value.kind();
        if found != wanted {
            return Err(conflict(depth, wanted, found));
        }
        match value {
            Value::Mapping(map) => Ok(Slot::Mapping(map)),
            Value::Sequence(items) => Ok(Slot::Sequence(items)),
            _ => Err(conflict(depth, wanted, found)),
        }
    }
}

fn conflict(depth: usize, expected: NodeKind, found: NodeKind) -> InjectError {
    InjectError::KeyArrayConflict {
        depth,
        expected,
        found,
    }
}

/// The container a segment operates on.
fn container_for(segment: &Segment) -> NodeKind {
    match segment {
        Segment::Key(_) => NodeKind::Mapping,
        Segment::ArrayBoundary(_) => NodeKind::Sequence,
    }
}

/// Builds the subtree addressed by `segments` below a freshly created node.
///
/// Every container here is new and empty, so each boundary pushes a first
/// element and a `[~]` has nothing to continue.
fn build_fresh(segments: &[Segment], depth: usize, leaf: Leaf) -> Result<Value, InjectError> {
    let continues = segments
        .iter()
        .position(|s| *s == Segment::ArrayBoundary(Marker::Continue));
    if let Some(offset) = continues {
        return Err(InjectError::ArrayBoundaryUnderflow {
            depth: depth + offset,
        });
    }

    let mut value = Value::Leaf(leaf);
    for segment in segments.iter().rev() {
        value = match segment {
            Segment::Key(name) => {
                let mut map = Mapping::new();
                map.insert(name.clone(), value);
                Value::Mapping(map)
            }
            Segment::ArrayBoundary(_) => Value::Sequence(vec![value]),
        };
    }
    Ok(value)
}

/// Writes `leaf` at `path` into `root`.
pub(crate) fn inject_path(root: &mut Mapping, path: &Path, leaf: Leaf) -> Result<(), InjectError> {
    let segments = path.segments();
    let len = segments.len();
    let mut slot = Slot::Mapping(root);

    for (depth, segment) in segments.iter().enumerate() {
        let rest = &segments[depth + 1..];
        let next = rest.first();

        slot = match (slot, segment) {
            (Slot::Mapping(map), Segment::Key(name)) => {
                let found = map
                    .get(name)
                    .map(Value::kind)
                    .filter(|kind| *kind != NodeKind::Absent);
                match (found, next) {
                    (None, _) => {
                        let value = build_fresh(rest, depth + 1, leaf)?;
                        map.insert(name.clone(), value);
                        return Ok(());
                    }
                    (Some(found), None) => {
                        if found.is_container() {
                            return Err(conflict(depth, NodeKind::Leaf, found));
                        }
                        map.insert(name.clone(), Value::Leaf(leaf));
                        return Ok(());
                    }
                    (Some(_), Some(next)) => {
                        let wanted = container_for(next);
                        match map.get_mut(name) {
                            Some(child) => Slot::enter(child, depth, wanted)?,
                            None => return Err(conflict(depth, wanted, NodeKind::Absent)),
                        }
                    }
                }
            }
            (Slot::Sequence(items), Segment::ArrayBoundary(marker)) => {
                let reuse = match marker {
                    Marker::NewItem => false,
                    Marker::Continue => true,
                    Marker::Infer => infer_continues(items.last(), Position::of(depth, len), next),
                };
                trace!(depth, ?marker, reuse, "array boundary");

                if !reuse {
                    let value = build_fresh(rest, depth + 1, leaf)?;
                    items.push(value);
                    return Ok(());
                }
                let Some(last) = items.last_mut() else {
                    return Err(InjectError::ArrayBoundaryUnderflow { depth });
                };
                match next {
                    None => {
                        if last.is_container() {
                            return Err(conflict(depth, NodeKind::Leaf, last.kind()));
                        }
                        *last = Value::Leaf(leaf);
                        return Ok(());
                    }
                    Some(next) => Slot::enter(last, depth, container_for(next))?,
                }
            }
            (slot, Segment::Key(_)) => return Err(conflict(depth, NodeKind::Mapping, slot.kind())),
            (slot, Segment::ArrayBoundary(_)) => {
                return Err(conflict(depth, NodeKind::Sequence, slot.kind()))
            }
        };
    }

    Ok(())
}
