//! Type definitions for bracket paths.

use std::fmt;

use crate::PathError;

/// How an array boundary decides which element a field lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `[]`: let the decoder guess from the trailing element.
    Infer,
    /// `[^]`: always start a fresh element.
    NewItem,
    /// `[~]`: keep writing into the trailing element.
    Continue,
}

impl Marker {
    /// The bracket token for this marker.
    pub fn token(self) -> &'static str {
        match self {
            Marker::Infer => "",
            Marker::NewItem => "^",
            Marker::Continue => "~",
        }
    }

    /// Maps a bracket token to a marker, if it is one of the reserved tokens.
    pub fn from_token(token: &str) -> Option<Marker> {
        match token {
            "" => Some(Marker::Infer),
            "^" => Some(Marker::NewItem),
            "~" => Some(Marker::Continue),
            _ => None,
        }
    }
}

/// One grammar unit of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key.
    Key(String),
    /// Entry into (or within) an array.
    ArrayBoundary(Marker),
}

impl Segment {
    /// Shorthand for `Segment::Key(name.into())`.
    pub fn key(name: impl Into<String>) -> Segment {
        Segment::Key(name.into())
    }

    /// Shorthand for `Segment::ArrayBoundary(marker)`.
    pub fn boundary(marker: Marker) -> Segment {
        Segment::ArrayBoundary(marker)
    }

    /// Maps a bracket token to a segment: reserved tokens become boundaries,
    /// everything else is a key.
    pub fn from_token(token: &str) -> Segment {
        match Marker::from_token(token) {
            Some(marker) => Segment::ArrayBoundary(marker),
            None => Segment::Key(token.to_string()),
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Segment::Key(_))
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, Segment::ArrayBoundary(_))
    }

    /// The key name, if this is a key segment.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(name) => Some(name),
            Segment::ArrayBoundary(_) => None,
        }
    }

    /// The marker, if this is an array boundary.
    pub fn marker(&self) -> Option<Marker> {
        match self {
            Segment::Key(_) => None,
            Segment::ArrayBoundary(marker) => Some(*marker),
        }
    }
}

/// A parsed field path.
///
/// Never empty, and never ends in [`Marker::Infer`]: a trailing `[]` is
/// stored as [`Marker::NewItem`] because a leaf written directly into an
/// array slot always starts a new slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Builds a path from segments, applying final-segment promotion.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] when `segments` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use formobj_path::{Marker, Path, Segment};
    ///
    /// let path = Path::new(vec![Segment::key("a"), Segment::boundary(Marker::Infer)]).unwrap();
    /// assert_eq!(path.last(), &Segment::ArrayBoundary(Marker::NewItem));
    /// assert!(Path::new(vec![]).is_err());
    /// ```
    pub fn new(segments: Vec<Segment>) -> Result<Path, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        let mut path = Path { segments };
        path.promote_last();
        Ok(path)
    }

    /// A single-key path.
    pub fn from_key(name: impl Into<String>) -> Path {
        Path {
            segments: vec![Segment::Key(name.into())],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Whether the path starts with an object key (as every path written
    /// into a mapping root must).
    pub fn is_key_prefixed(&self) -> bool {
        self.first().is_key()
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
        self.promote_last();
    }

    /// Returns a copy of this path with `segment` appended.
    pub fn child(&self, segment: Segment) -> Path {
        let mut out = self.clone();
        out.push(segment);
        out
    }

    /// Replaces the marker of the boundary at `index`.
    ///
    /// Returns `false` (and changes nothing) when `index` is out of range or
    /// does not hold an array boundary.
    pub fn set_marker(&mut self, index: usize, marker: Marker) -> bool {
        match self.segments.get_mut(index) {
            Some(Segment::ArrayBoundary(m)) => {
                *m = marker;
                self.promote_last();
                true
            }
            _ => false,
        }
    }

    /// Renders the wire form of this path.
    pub fn to_wire(&self) -> String {
        crate::format_path(self)
    }

    fn promote_last(&mut self) {
        if let Some(Segment::ArrayBoundary(marker)) = self.segments.last_mut() {
            if *marker == Marker::Infer {
                *marker = Marker::NewItem;
            }
        }
    }
}

impl TryFrom<Vec<Segment>> for Path {
    type Error = PathError;

    fn try_from(segments: Vec<Segment>) -> Result<Self, Self::Error> {
        Path::new(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl std::str::FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_path(s)
    }
}
