//! [`Field`]: one `(path, leaf)` pair of the flat representation.

use formobj_path::{parse_path_with, validate_wire_path, Path, PathError, PathMode};

use crate::leaf::Leaf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub path: Path,
    pub value: Leaf,
}

impl Field {
    pub fn new(path: Path, value: impl Into<Leaf>) -> Field {
        Field {
            path,
            value: value.into(),
        }
    }

    /// Parses a wire field name with the strict tokenizer.
    ///
    /// # Example
    ///
    /// ```
    /// use formobj::Field;
    ///
    /// let field = Field::parse("a[^][b]", "x").unwrap();
    /// assert_eq!(field.wire_name(), "a[^][b]");
    /// assert!(Field::parse("a[b", "x").is_err());
    /// ```
    pub fn parse(name: &str, value: impl Into<Leaf>) -> Result<Field, PathError> {
        Field::parse_with(name, value, PathMode::Strict)
    }

    pub fn parse_with(
        name: &str,
        value: impl Into<Leaf>,
        mode: PathMode,
    ) -> Result<Field, PathError> {
        validate_wire_path(name)?;
        let path = parse_path_with(name, mode)?;
        Ok(Field::new(path, value))
    }

    pub fn wire_name(&self) -> String {
        self.path.to_wire()
    }
}
