//! Ordered field collection for transports that resolve attachments late.
//!
//! A multipart body announces text fields and attachments in one order, but
//! an attachment's handle only exists once its payload has been stored. The
//! collector reserves a slot for each attachment at first sight so the final
//! list keeps the original wire order, and refuses to hand fields to the
//! decoder while any slot is still open.

use std::io;

use formobj_path::{parse_path_with, validate_wire_path, PathError, PathMode};
use thiserror::Error;
use tracing::{debug, trace};

use crate::field::Field;
use crate::leaf::{Attachment, Leaf};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectorOptions {
    pub path_mode: PathMode,
    pub max_fields: Option<usize>,
}

/// Reserved position of an attachment that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollectError {
    #[error("field #{index} `{name}` is still waiting for its attachment")]
    Unresolved { index: usize, name: String },
    #[error("unknown attachment slot")]
    UnknownSlot,
    #[error("attachment slot already filled")]
    SlotAlreadyFilled,
    #[error("more than {max} fields")]
    TooManyFields { max: usize },
    #[error("field #{index} `{name}`: {source}")]
    Path {
        index: usize,
        name: String,
        #[source]
        source: PathError,
    },
}

#[derive(Debug, Default)]
pub struct FieldCollector {
    entries: Vec<(String, Option<Leaf>)>,
    pending: usize,
    options: CollectorOptions,
}

impl FieldCollector {
    pub fn new() -> FieldCollector {
        FieldCollector::default()
    }

    pub fn with_options(options: CollectorOptions) -> FieldCollector {
        FieldCollector {
            options,
            ..FieldCollector::default()
        }
    }

    fn reserve(&mut self, name: String, value: Option<Leaf>) -> Result<usize, CollectError> {
        if let Some(max) = self.options.max_fields {
            if self.entries.len() >= max {
                return Err(CollectError::TooManyFields { max });
            }
        }
        self.entries.push((name, value));
        Ok(self.entries.len() - 1)
    }

    /// Appends a text field.
    pub fn push_scalar(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CollectError> {
        self.reserve(name.into(), Some(Leaf::Scalar(value.into())))?;
        Ok(())
    }

    /// Appends an attachment that is already stored.
    pub fn push_attachment(
        &mut self,
        name: impl Into<String>,
        attachment: Attachment,
    ) -> Result<(), CollectError> {
        self.reserve(name.into(), Some(Leaf::Attachment(attachment)))?;
        Ok(())
    }

    /// Reserves the position of an attachment whose payload is still in
    /// flight. Fill it with [`fill`](Self::fill).
    pub fn reserve_attachment(&mut self, name: impl Into<String>) -> Result<SlotId, CollectError> {
        let index = self.reserve(name.into(), None)?;
        self.pending += 1;
        trace!(index, "attachment slot reserved");
        Ok(SlotId(index))
    }

    pub fn fill(&mut self, slot: SlotId, attachment: Attachment) -> Result<(), CollectError> {
        let (_, value) = self
            .entries
            .get_mut(slot.0)
            .ok_or(CollectError::UnknownSlot)?;
        if value.is_some() {
            return Err(CollectError::SlotAlreadyFilled);
        }
        *value = Some(Leaf::Attachment(attachment));
        self.pending -= 1;
        trace!(index = slot.0, pending = self.pending, "attachment slot filled");
        Ok(())
    }

    /// Number of reserved slots not yet filled.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Releases every attachment collected so far. Used to clean up after a
    /// request that will not be decoded.
    pub fn release_all(&self) -> io::Result<()> {
        let mut first_error = None;
        for (_, value) in &self.entries {
            if let Some(Leaf::Attachment(attachment)) = value {
                if let Err(e) = attachment.release() {
                    debug!(location = attachment.location(), error = %e, "release failed");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Turns the collected entries into fields, in wire order.
    pub fn finish(self) -> Result<Vec<Field>, CollectError> {
        let mode = self.options.path_mode;
        let mut out = Vec::with_capacity(self.entries.len());
        for (index, (name, value)) in self.entries.into_iter().enumerate() {
            let Some(value) = value else {
                return Err(CollectError::Unresolved { index, name });
            };
            let path = validate_wire_path(&name)
                .and_then(|()| parse_path_with(&name, mode))
                .map_err(|source| CollectError::Path {
                    index,
                    name: name.clone(),
                    source,
                })?;
            out.push(Field::new(path, value));
        }
        Ok(out)
    }
}
