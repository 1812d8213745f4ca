//! formobj: flat-path structured codec.
//!
//! Encodes a nested tree into an ordered list of `(path, leaf)` fields, the
//! shape of a `multipart/form-data` or urlencoded body, and decodes such a
//! list back into a tree. Array elements carry no numeric index: `[^]` opens
//! a new element, `[~]` continues the current one, and a plain `[]` lets the
//! decoder guess.
//!
//! # Example
//!
//! ```
//! use formobj::{decode, encode, Mapping, Value};
//! use serde_json::json;
//!
//! let tree = Value::from(json!({
//!     "user": {"name": "ada", "tags": ["a", "b"]},
//!     "items": [{"sku": "1", "qty": "2"}, {"sku": "3"}],
//! }));
//!
//! let fields = encode(&tree);
//! assert_eq!(fields[0].wire_name(), "user[name]");
//! assert_eq!(fields[3].wire_name(), "items[^][sku]");
//! assert_eq!(fields[4].wire_name(), "items[~][qty]");
//!
//! let back = decode(fields, Mapping::new()).unwrap();
//! assert_eq!(Value::Mapping(back), tree);
//! ```

pub mod cli;
pub mod collect;
pub mod decode;
pub mod encode;
pub mod field;
pub mod json;
pub mod leaf;
pub mod value;

pub use collect::{CollectError, CollectorOptions, FieldCollector, SlotId};
pub use decode::{
    decode, decode_wire, decode_with, DecodeError, DecodeFailure, DecodeOptions, InjectError,
    Injector,
};
pub use encode::{encode, encode_checked, encode_mapping, encode_wire};
pub use field::Field;
pub use json::{mapping_from_json, mapping_to_json, to_json};
pub use leaf::{Attachment, AttachmentHandle, FileAttachment, Leaf};
pub use value::{Mapping, NodeKind, Value};

pub use formobj_path::{Marker, Path, PathError, PathMode, Segment};
