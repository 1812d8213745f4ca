//! Terminal payloads: inline scalars and attachment handles.

use std::fmt;
use std::io;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

/// A reference to a binary payload stored out of band.
///
/// The codec never reads the payload; it only moves the handle into place.
pub trait AttachmentHandle: fmt::Debug + Send + Sync {
    /// Where the payload lives (a file path, an object key, ...).
    fn location(&self) -> &str;

    /// Frees the stored payload.
    fn release(&self) -> io::Result<()>;
}

/// Shared handle to an attachment.
///
/// Two attachments are equal only when they share the same handle.
#[derive(Clone)]
pub struct Attachment(Arc<dyn AttachmentHandle>);

impl Attachment {
    pub fn new(handle: impl AttachmentHandle + 'static) -> Attachment {
        Attachment(Arc::new(handle))
    }

    pub fn location(&self) -> &str {
        self.0.location()
    }

    pub fn release(&self) -> io::Result<()> {
        self.0.release()
    }

    pub fn handle(&self) -> &dyn AttachmentHandle {
        self.0.as_ref()
    }
}

impl From<Arc<dyn AttachmentHandle>> for Attachment {
    fn from(handle: Arc<dyn AttachmentHandle>) -> Self {
        Attachment(handle)
    }
}

impl PartialEq for Attachment {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for Attachment {}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Attachment").field(&self.0).finish()
    }
}

/// An attachment written to a file. Releasing it deletes the file.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    path: PathBuf,
    location: String,
}

impl FileAttachment {
    pub fn new(path: impl Into<PathBuf>) -> FileAttachment {
        let path = path.into();
        let location = path.to_string_lossy().into_owned();
        FileAttachment { path, location }
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }
}

impl AttachmentHandle for FileAttachment {
    fn location(&self) -> &str {
        &self.location
    }

    fn release(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// A terminal value on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// Inline text field.
    Scalar(String),
    /// Out-of-band payload.
    Attachment(Attachment),
}

impl Leaf {
    pub fn scalar(value: impl Into<String>) -> Leaf {
        Leaf::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Leaf::Scalar(s) => Some(s),
            Leaf::Attachment(_) => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&Attachment> {
        match self {
            Leaf::Scalar(_) => None,
            Leaf::Attachment(a) => Some(a),
        }
    }

    pub fn is_attachment(&self) -> bool {
        matches!(self, Leaf::Attachment(_))
    }
}

impl From<&str> for Leaf {
    fn from(s: &str) -> Self {
        Leaf::Scalar(s.to_string())
    }
}

impl From<String> for Leaf {
    fn from(s: String) -> Self {
        Leaf::Scalar(s)
    }
}

impl From<Attachment> for Leaf {
    fn from(a: Attachment) -> Self {
        Leaf::Attachment(a)
    }
}
