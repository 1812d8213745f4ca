//! Rebuilds a tree from an ordered [`Field`] list.
//!
//! Fields are applied strictly in order. Keys create mappings (or sequences,
//! when a boundary follows) on first use; array boundaries pick the element
//! a field lands in:
//!
//! - `[^]` always starts a new element,
//! - `[~]` continues the trailing element,
//! - `[]` guesses with [`infer_continues`].

pub mod infer;
pub mod types;
mod walk;

pub use infer::{infer_continues, Position};
pub use types::{
    DecodeError, DecodeFailure, DecodeOptions, InjectError, BOUNDED_MAX_DEPTH, BOUNDED_MAX_FIELDS,
};

use formobj_path::{parse_path_with, validate_wire_path};
use tracing::{debug, trace};

use crate::field::Field;
use crate::leaf::Leaf;
use crate::value::Mapping;

/// Accumulates fields into a mapping, one field at a time.
///
/// A rejected field leaves the accumulated tree unchanged, so callers may
/// skip it and keep going.
#[derive(Debug, Default)]
pub struct Injector {
    root: Mapping,
    options: DecodeOptions,
    seen: usize,
}

impl Injector {
    pub fn new(root: Mapping) -> Injector {
        Injector::with_options(root, DecodeOptions::default())
    }

    pub fn with_options(root: Mapping, options: DecodeOptions) -> Injector {
        Injector {
            root,
            options,
            seen: 0,
        }
    }

    /// Applies one field.
    pub fn inject(&mut self, field: Field) -> Result<(), InjectError> {
        self.seen += 1;
        if let Some(max) = self.options.max_fields {
            if self.seen > max {
                return Err(InjectError::TooManyFields { max });
            }
        }
        let len = field.path.len();
        if let Some(max) = self.options.max_depth {
            if len > max {
                return Err(InjectError::TooDeep { len, max });
            }
        }
        trace!(path = %field.path, "inject");
        walk::inject_path(&mut self.root, &field.path, field.value)
    }

    /// Applies fields in order, stopping at the first failure. The error's
    /// `index` is the field's position in `fields`.
    pub fn inject_all(&mut self, fields: impl IntoIterator<Item = Field>) -> Result<(), DecodeError> {
        for (index, field) in fields.into_iter().enumerate() {
            let path = field.wire_name();
            if let Err(source) = self.inject(field) {
                debug!(index, %path, error = %source, "field rejected");
                return Err(DecodeError {
                    index,
                    path,
                    source,
                });
            }
        }
        Ok(())
    }

    /// Number of fields offered so far, including rejected ones.
    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn finish(self) -> Mapping {
        self.root
    }

    fn fail(self, error: DecodeError) -> DecodeFailure {
        DecodeFailure {
            error,
            root: Box::new(self.root),
        }
    }
}

/// Decode `fields` into `root` with default options (strict paths, no
/// limits).
///
/// On failure the returned [`DecodeFailure`] carries the tree as it stood
/// before the rejected field.
///
/// # Example
///
/// ```
/// use formobj::{decode, Field, Mapping, Value};
/// use serde_json::json;
///
/// let fields = vec![
///     Field::parse("prop1[]", "v1").unwrap(),
///     Field::parse("prop1[][]", "v2").unwrap(),
///     Field::parse("prop1[][]", "v3").unwrap(),
/// ];
/// let out = decode(fields, Mapping::new()).unwrap();
/// assert_eq!(Value::Mapping(out), Value::from(json!({"prop1": ["v1", ["v2", "v3"]]})));
/// ```
pub fn decode(fields: Vec<Field>, root: Mapping) -> Result<Mapping, DecodeFailure> {
    decode_with(fields, root, &DecodeOptions::default())
}

/// Decode `fields` into `root` under `options`.
pub fn decode_with(
    fields: Vec<Field>,
    root: Mapping,
    options: &DecodeOptions,
) -> Result<Mapping, DecodeFailure> {
    let mut injector = Injector::with_options(root, options.clone());
    match injector.inject_all(fields) {
        Ok(()) => Ok(injector.finish()),
        Err(error) => Err(injector.fail(error)),
    }
}

/// Decode `(wire name, leaf)` pairs, tokenizing names with
/// `options.path_mode`.
///
/// # Example
///
/// ```
/// use formobj::{decode_wire, DecodeOptions, Leaf, Mapping, Value};
/// use serde_json::json;
///
/// let pairs = vec![("a".to_string(), Leaf::from("1")), ("a".to_string(), Leaf::from("2"))];
/// let out = decode_wire(pairs, Mapping::new(), &DecodeOptions::default()).unwrap();
/// assert_eq!(Value::Mapping(out), Value::from(json!({"a": "2"})));
/// ```
pub fn decode_wire<S: AsRef<str>>(
    pairs: impl IntoIterator<Item = (S, Leaf)>,
    root: Mapping,
    options: &DecodeOptions,
) -> Result<Mapping, DecodeFailure> {
    let mut injector = Injector::with_options(root, options.clone());
    for (index, (name, leaf)) in pairs.into_iter().enumerate() {
        let name = name.as_ref();
        let result = validate_wire_path(name)
            .and_then(|()| parse_path_with(name, options.path_mode))
            .map_err(InjectError::from)
            .and_then(|path| injector.inject(Field::new(path, leaf)));
        if let Err(source) = result {
            debug!(index, path = name, error = %source, "field rejected");
            let error = DecodeError {
                index,
                path: name.to_string(),
                source,
            };
            return Err(injector.fail(error));
        }
    }
    Ok(injector.finish())
}
