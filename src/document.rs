//! Reference-counted documents
//!
//! A document stays loaded while anything holds a reference to it. Consumers
//! that outlive a single call (watchers, live-development controllers) pin
//! it with [`DocumentPin`], which releases its reference on drop.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Unique identifier for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// Shared handle to a document's content
pub trait DocumentHandle {
    fn id(&self) -> DocumentId;
    fn add_ref(&self);
    fn release_ref(&self);
}

/// In-process document with a reference count
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    ref_count: Cell<usize>,
}

impl Document {
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            ref_count: Cell::new(0),
        }
    }

    pub fn ref_count(&self) -> usize {
        self.ref_count.get()
    }
}

impl DocumentHandle for Document {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn add_ref(&self) {
        self.ref_count.set(self.ref_count.get() + 1);
    }

    fn release_ref(&self) {
        match self.ref_count.get().checked_sub(1) {
            Some(count) => self.ref_count.set(count),
            None => tracing::warn!("{} released more references than it handed out", self.id),
        }
    }
}

/// Holds one reference to a document until dropped
pub struct DocumentPin {
    document: Rc<dyn DocumentHandle>,
}

impl DocumentPin {
    pub fn new(document: Rc<dyn DocumentHandle>) -> Self {
        document.add_ref();
        Self { document }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document.id()
    }
}

impl Drop for DocumentPin {
    fn drop(&mut self) {
        self.document.release_ref();
    }
}

impl fmt::Debug for DocumentPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentPin")
            .field("document", &self.document.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_holds_one_reference() {
        let doc = Rc::new(Document::new(DocumentId(1)));
        let pin = DocumentPin::new(doc.clone());
        assert_eq!(doc.ref_count(), 1);
        assert_eq!(pin.document_id(), DocumentId(1));

        drop(pin);
        assert_eq!(doc.ref_count(), 0);
    }

    #[test]
    fn test_pins_stack() {
        let doc = Rc::new(Document::new(DocumentId(1)));
        doc.add_ref();
        let a = DocumentPin::new(doc.clone());
        let b = DocumentPin::new(doc.clone());
        assert_eq!(doc.ref_count(), 3);
        drop(a);
        drop(b);
        assert_eq!(doc.ref_count(), 1);
    }

    #[test]
    fn test_release_without_ref_clamps_at_zero() {
        let doc = Document::new(DocumentId(4));
        doc.release_ref();
        assert_eq!(doc.ref_count(), 0);
    }
}
