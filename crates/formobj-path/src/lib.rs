//! Bracket path grammar for flat form fields.
//!
//! A field name such as `user[tags][]` or `items[^][name]` addresses a
//! location in a nested tree. This crate turns those names into structured
//! [`Path`] values and back.
//!
//! ```text
//! path    := leading? segment*
//! segment := '[' token ']'
//! token   := key | '' | '^' | '~'
//! ```
//!
//! # Example
//!
//! ```
//! use formobj_path::{format_path, parse_path, Marker, Segment};
//!
//! let path = parse_path("items[^][name]").unwrap();
//! assert_eq!(
//!     path.segments(),
//!     &[
//!         Segment::key("items"),
//!         Segment::boundary(Marker::NewItem),
//!         Segment::key("name"),
//!     ]
//! );
//! assert_eq!(format_path(&path), "items[^][name]");
//!
//! // A leading bracket is only a marker.
//! assert_eq!(parse_path("[items][^][name]").unwrap(), path);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Marker, Path, Segment};

pub mod validate;
pub use validate::{
    validate_key, validate_path, validate_wire_path, MAX_PATH_DEPTH, MAX_WIRE_PATH_LENGTH,
};

/// Which tokenizer to run on incoming field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Reject stray or unbalanced brackets.
    #[default]
    Strict,
    /// Legacy splitting: brackets that do not pair up end up as key text.
    Lenient,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path")]
    Empty,
    #[error("unclosed '[' at byte {offset}")]
    UnclosedBracket { offset: usize },
    #[error("stray ']' at byte {offset}")]
    StrayBracket { offset: usize },
    #[error("unexpected text outside brackets at byte {offset}")]
    TrailingText { offset: usize },
    #[error("path too long")]
    TooLong,
    #[error("path too deep")]
    TooDeep,
    #[error("key {0:?} cannot be written as a path segment")]
    UnrepresentableKey(String),
}

fn is_bracket(c: char) -> bool {
    c == '[' || c == ']'
}

/// Parse a wire field name, rejecting malformed bracket structure.
///
/// # Errors
///
/// - [`PathError::Empty`] for `""` (or a name with no segments at all)
/// - [`PathError::UnclosedBracket`] when a `[` is not closed before the next `[` or the end
/// - [`PathError::StrayBracket`] for a `]` with no opening `[`
/// - [`PathError::TrailingText`] for text between or after bracket segments
///
/// # Example
///
/// ```
/// use formobj_path::{parse_path, Marker, Segment, PathError};
///
/// let path = parse_path("a[][]").unwrap();
/// assert_eq!(
///     path.segments(),
///     &[
///         Segment::key("a"),
///         Segment::boundary(Marker::Infer),
///         Segment::boundary(Marker::NewItem),
///     ]
/// );
/// assert_eq!(parse_path("a[b"), Err(PathError::UnclosedBracket { offset: 1 }));
/// assert_eq!(parse_path("a]"), Err(PathError::StrayBracket { offset: 1 }));
/// ```
pub fn parse_path(wire: &str) -> Result<Path, PathError> {
    let bytes = wire.as_bytes();
    let lead_end = wire.find(is_bracket).unwrap_or(wire.len());

    let mut segments = Vec::new();
    if lead_end > 0 {
        segments.push(Segment::Key(wire[..lead_end].to_string()));
    }

    let mut pos = lead_end;
    while pos < bytes.len() {
        match bytes[pos] {
            b'[' => {
                let body = pos + 1;
                match wire[body..].find(is_bracket) {
                    Some(rel) if bytes[body + rel] == b']' => {
                        segments.push(Segment::from_token(&wire[body..body + rel]));
                        pos = body + rel + 1;
                    }
                    _ => return Err(PathError::UnclosedBracket { offset: pos }),
                }
            }
            b']' => return Err(PathError::StrayBracket { offset: pos }),
            _ => return Err(PathError::TrailingText { offset: pos }),
        }
    }

    Path::new(segments)
}

/// Parse a wire field name the legacy way.
///
/// The name is split on `[`, one trailing `]` is stripped from each
/// fragment, and an empty first fragment is dropped. Malformed brackets are
/// never reported; they simply become part of a key.
///
/// # Errors
///
/// Returns [`PathError::Empty`] when nothing is left after splitting.
///
/// # Example
///
/// ```
/// use formobj_path::{parse_path_lenient, Segment};
///
/// let path = parse_path_lenient("a]b[c").unwrap();
/// assert_eq!(path.segments(), &[Segment::key("a]b"), Segment::key("c")]);
/// ```
pub fn parse_path_lenient(wire: &str) -> Result<Path, PathError> {
    let mut fragments = wire
        .split('[')
        .map(|fragment| fragment.strip_suffix(']').unwrap_or(fragment));

    let mut segments = Vec::new();
    if let Some(lead) = fragments.next() {
        if !lead.is_empty() {
            segments.push(Segment::Key(lead.to_string()));
        }
    }
    segments.extend(fragments.map(Segment::from_token));

    Path::new(segments)
}

/// Parse a wire field name with the tokenizer selected by `mode`.
pub fn parse_path_with(wire: &str, mode: PathMode) -> Result<Path, PathError> {
    match mode {
        PathMode::Strict => parse_path(wire),
        PathMode::Lenient => parse_path_lenient(wire),
    }
}

/// Render a path in wire form.
///
/// A leading key is written bare; every other segment is bracketed.
///
/// # Example
///
/// ```
/// use formobj_path::{format_path, Marker, Path, Segment};
///
/// let path = Path::new(vec![
///     Segment::key("a"),
///     Segment::boundary(Marker::Continue),
///     Segment::key("b"),
/// ])
/// .unwrap();
/// assert_eq!(format_path(&path), "a[~][b]");
///
/// let bare = Path::new(vec![Segment::boundary(Marker::NewItem)]).unwrap();
/// assert_eq!(format_path(&bare), "[^]");
/// ```
pub fn format_path(path: &Path) -> String {
    let mut out = String::new();
    for (i, segment) in path.segments().iter().enumerate() {
        match segment {
            Segment::Key(name) if i == 0 => out.push_str(name),
            Segment::Key(name) => {
                out.push('[');
                out.push_str(name);
                out.push(']');
            }
            Segment::ArrayBoundary(marker) => {
                out.push('[');
                out.push_str(marker.token());
                out.push(']');
            }
        }
    }
    out
}
