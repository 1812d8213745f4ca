//! The `[]` heuristic: does a field continue the trailing array element?

use formobj_path::Segment;

use crate::value::Value;

/// Where an array boundary sits within its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The boundary is the final segment.
    Last,
    /// Exactly one segment follows.
    SecondToLast,
    /// Two or more segments follow.
    Inner,
}

impl Position {
    /// Position of the segment at `depth` in a path of `len` segments.
    pub fn of(depth: usize, len: usize) -> Position {
        match len.saturating_sub(depth) {
            0 | 1 => Position::Last,
            2 => Position::SecondToLast,
            _ => Position::Inner,
        }
    }
}

/// Decides whether an `Infer` boundary reuses the trailing element `last`
/// (`true`) or starts a new one (`false`).
///
/// The trailing element is reused only when it is a container, the boundary
/// is not the final segment, and, when exactly one key follows, that key is
/// not already present in the element. Anything else starts a new element.
///
/// This misgroups arrays of objects whose elements share no leading key
/// (`{a}`, `{c}` merge into one) or repeat keys below the next level; such
/// shapes need explicit `[^]`/`[~]` markers.
///
/// # Example
///
/// ```
/// use formobj::decode::{infer_continues, Position};
/// use formobj::Value;
/// use formobj_path::Segment;
/// use serde_json::json;
///
/// let last = Value::from(json!({"a": "1"}));
/// assert!(infer_continues(Some(&last), Position::SecondToLast, Some(&Segment::key("b"))));
/// assert!(!infer_continues(Some(&last), Position::SecondToLast, Some(&Segment::key("a"))));
/// assert!(!infer_continues(None, Position::Inner, Some(&Segment::key("a"))));
/// ```
pub fn infer_continues(last: Option<&Value>, position: Position, next: Option<&Segment>) -> bool {
    let Some(last) = last else {
        return false;
    };
    if !last.is_container() {
        return false;
    }
    match position {
        Position::Last => false,
        Position::SecondToLast => match (last, next) {
            (Value::Mapping(map), Some(Segment::Key(name))) => !map.contains_key(name),
            _ => true,
        },
        Position::Inner => true,
    }
}
