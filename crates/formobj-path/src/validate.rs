//! Validation functions for bracket paths.

use crate::{Marker, Path, PathError, Segment};

/// Maximum allowed wire path length in bytes.
pub const MAX_WIRE_PATH_LENGTH: usize = 4096;

/// Maximum allowed number of segments.
pub const MAX_PATH_DEPTH: usize = 256;

/// Validate the length of a wire path before tokenizing it.
///
/// # Example
///
/// ```
/// use formobj_path::validate_wire_path;
///
/// validate_wire_path("a[b][]").unwrap();
/// validate_wire_path(&"a".repeat(5000)).unwrap_err();
/// ```
pub fn validate_wire_path(wire: &str) -> Result<(), PathError> {
    if wire.len() > MAX_WIRE_PATH_LENGTH {
        return Err(PathError::TooLong);
    }
    Ok(())
}

/// Validate that a key can be written inside brackets and read back as the
/// same key.
///
/// Rejects keys containing `[` or `]` and the reserved tokens `""`, `^` and
/// `~`, which would read back as array boundaries.
///
/// # Example
///
/// ```
/// use formobj_path::validate_key;
///
/// validate_key("name").unwrap();
/// validate_key("^").unwrap_err();
/// validate_key("a[0]").unwrap_err();
/// ```
pub fn validate_key(key: &str) -> Result<(), PathError> {
    if Marker::from_token(key).is_some() || key.contains(|c: char| c == '[' || c == ']') {
        return Err(PathError::UnrepresentableKey(key.to_string()));
    }
    Ok(())
}

/// Validate a structured path: depth limit plus [`validate_key`] on every key.
///
/// A path that passes renders to a wire string that parses back to the same
/// path.
pub fn validate_path(path: &Path) -> Result<(), PathError> {
    if path.len() > MAX_PATH_DEPTH {
        return Err(PathError::TooDeep);
    }
    for segment in path.segments() {
        if let Segment::Key(name) = segment {
            validate_key(name)?;
        }
    }
    Ok(())
}
