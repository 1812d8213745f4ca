//! Options and errors for decoding.

use formobj_path::{PathError, PathMode};
use thiserror::Error;

use crate::value::{Mapping, NodeKind};

/// Options for [`decode_with`](super::decode_with) and [`Injector`](super::Injector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Tokenizer used for wire names.
    pub path_mode: PathMode,
    /// Reject paths with more segments than this.
    pub max_depth: Option<usize>,
    /// Reject fields past this count.
    pub max_fields: Option<usize>,
}

/// Segment limit applied by [`DecodeOptions::bounded`].
pub const BOUNDED_MAX_DEPTH: usize = 64;

/// Field limit applied by [`DecodeOptions::bounded`].
pub const BOUNDED_MAX_FIELDS: usize = 10_000;

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            path_mode: PathMode::Strict,
            max_depth: None,
            max_fields: None,
        }
    }
}

impl DecodeOptions {
    /// No limits, legacy tokenizer.
    pub fn lenient() -> Self {
        Self {
            path_mode: PathMode::Lenient,
            ..Self::default()
        }
    }

    /// Strict tokenizer with depth and field-count limits, for input taken
    /// straight off the network.
    pub fn bounded() -> Self {
        Self {
            path_mode: PathMode::Strict,
            max_depth: Some(BOUNDED_MAX_DEPTH),
            max_fields: Some(BOUNDED_MAX_FIELDS),
        }
    }
}

/// Why a single field could not be injected. `depth` is the index of the
/// path segment being processed when the walk stopped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InjectError {
    #[error("malformed path: {0}")]
    MalformedPath(#[from] PathError),
    #[error("segment {depth}: `[~]` has no element to continue")]
    ArrayBoundaryUnderflow { depth: usize },
    #[error("segment {depth}: expected a {expected}, found a {found}")]
    KeyArrayConflict {
        depth: usize,
        expected: NodeKind,
        found: NodeKind,
    },
    #[error("path has {len} segments, limit is {max}")]
    TooDeep { len: usize, max: usize },
    #[error("more than {max} fields")]
    TooManyFields { max: usize },
}

/// A field that failed to decode, with its position in the input list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("field #{index} `{path}`: {source}")]
pub struct DecodeError {
    pub index: usize,
    pub path: String,
    #[source]
    pub source: InjectError,
}

/// A decode stopped by a rejected field.
///
/// `root` holds the caller's root plus every field applied before the
/// rejected one, untouched by the failed field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct DecodeFailure {
    pub error: DecodeError,
    pub root: Box<Mapping>,
}

impl DecodeFailure {
    pub fn into_root(self) -> Mapping {
        *self.root
    }
}
