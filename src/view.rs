//! Editor views and the active-view registry
//!
//! A view is one editor showing one document. The registry tracks which view
//! currently has focus and notifies listeners whenever focus moves.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::document::DocumentId;
use crate::events::{Emitter, Subscription};
use crate::selection::{Position, Selection};

/// Unique identifier for an editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// An editor view onto a single document
pub trait EditorView {
    fn id(&self) -> ViewId;

    /// The document this view edits
    fn document_id(&self) -> DocumentId;

    /// Current selections, in the view's own order
    fn selections(&self) -> Vec<Selection>;

    /// Called with the view's id whenever its cursors or selections move
    fn on_selections_changed(&self, listener: Box<dyn Fn(&ViewId)>) -> Subscription;
}

/// Focus moved from `previous` to `current`; either side may be empty
#[derive(Clone, Default)]
pub struct ActiveViewChange {
    pub previous: Option<Rc<dyn EditorView>>,
    pub current: Option<Rc<dyn EditorView>>,
}

impl fmt::Debug for ActiveViewChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveViewChange")
            .field("previous", &self.previous.as_ref().map(|v| v.id()))
            .field("current", &self.current.as_ref().map(|v| v.id()))
            .finish()
    }
}

/// Process-wide record of which view has focus
pub trait ActiveViewRegistry {
    fn active_view(&self) -> Option<Rc<dyn EditorView>>;

    fn on_active_view_changed(&self, listener: Box<dyn Fn(&ActiveViewChange)>) -> Subscription;
}

/// In-process view whose selections are set by the host
pub struct BufferView {
    id: ViewId,
    document_id: DocumentId,
    selections: RefCell<Vec<Selection>>,
    selections_changed: Emitter<ViewId>,
}

impl BufferView {
    pub fn new(id: ViewId, document_id: DocumentId) -> Self {
        Self {
            id,
            document_id,
            selections: RefCell::new(vec![Selection::collapsed(Position::zero())]),
            selections_changed: Emitter::new(),
        }
    }

    /// Replace all selections and notify listeners
    pub fn set_selections(&self, selections: Vec<Selection>) {
        *self.selections.borrow_mut() = selections;
        self.selections_changed.emit(&self.id);
    }

    /// Collapse to a single cursor at `pos` and notify listeners
    pub fn set_cursor(&self, pos: Position) {
        self.set_selections(vec![Selection::collapsed(pos)]);
    }

    /// Number of live selection-change subscriptions
    pub fn listener_count(&self) -> usize {
        self.selections_changed.listener_count()
    }
}

impl EditorView for BufferView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn document_id(&self) -> DocumentId {
        self.document_id
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.borrow().clone()
    }

    fn on_selections_changed(&self, listener: Box<dyn Fn(&ViewId)>) -> Subscription {
        self.selections_changed.subscribe(listener)
    }
}

impl fmt::Debug for BufferView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("id", &self.id)
            .field("document_id", &self.document_id)
            .field("selections", &self.selections.borrow())
            .finish()
    }
}

/// In-process active-view registry
#[derive(Default)]
pub struct ActiveViews {
    active: RefCell<Option<Rc<dyn EditorView>>>,
    changed: Emitter<ActiveViewChange>,
}

impl ActiveViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move focus to `view` (or clear it). Listeners are only notified when
    /// the active view actually changes.
    pub fn set_active(&self, view: Option<Rc<dyn EditorView>>) {
        let unchanged = match (&*self.active.borrow(), &view) {
            (Some(old), Some(new)) => old.id() == new.id(),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }

        let previous = self.active.replace(view.clone());
        tracing::debug!(
            "Active view: {:?} -> {:?}",
            previous.as_ref().map(|v| v.id()),
            view.as_ref().map(|v| v.id())
        );
        self.changed.emit(&ActiveViewChange {
            previous,
            current: view,
        });
    }

    pub fn listener_count(&self) -> usize {
        self.changed.listener_count()
    }
}

impl ActiveViewRegistry for ActiveViews {
    fn active_view(&self) -> Option<Rc<dyn EditorView>> {
        self.active.borrow().clone()
    }

    fn on_active_view_changed(&self, listener: Box<dyn Fn(&ActiveViewChange)>) -> Subscription {
        self.changed.subscribe(listener)
    }
}

impl fmt::Debug for ActiveViews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveViews")
            .field("active", &self.active.borrow().as_ref().map(|v| v.id()))
            .field("changed", &self.changed)
            .finish()
    }
}
