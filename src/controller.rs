//! Live highlight controller
//!
//! One controller exists per document opened for live development. It follows
//! focus through the [`ActiveViewRegistry`]: whenever the active view edits
//! the controller's document, the controller attaches to it and mirrors the
//! rule under each cursor into the live preview through the
//! [`HighlightAgent`]. Losing the view (focus moves elsewhere, or the
//! controller is closed) hides the highlight.
//!
//! The binding is a two-state machine:
//!
//! ```text
//!   Detached ──(active view owns our document)──▶ Attached(view)
//!      ▲                                               │
//!      └────────────(any active view change)───────────┘
//! ```
//!
//! Every focus change detaches first and then attaches if the new view
//! qualifies, so a stale view can never keep feeding selection events.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::agent::HighlightAgent;
use crate::config::HighlightSetting;
use crate::document::{DocumentHandle, DocumentId, DocumentPin};
use crate::events::Subscription;
use crate::resolver::SelectorResolver;
use crate::view::{ActiveViewChange, ActiveViewRegistry, EditorView, ViewId};

/// Services the controller talks to besides the registry and the document
#[derive(Clone)]
pub struct Collaborators {
    pub resolver: Rc<dyn SelectorResolver>,
    pub agent: Rc<dyn HighlightAgent>,
    pub setting: Rc<dyn HighlightSetting>,
}

enum Binding {
    Detached,
    Attached {
        view: Rc<dyn EditorView>,
        /// Dropping this stops selection events from `view`
        selections: Subscription,
    },
}

/// Work delivered to the controller, applied strictly in arrival order
enum Notification {
    ActiveViewChanged(Option<Rc<dyn EditorView>>),
    SelectionsChanged(ViewId),
    Close,
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveViewChanged(view) => f
                .debug_tuple("ActiveViewChanged")
                .field(&view.as_ref().map(|v| v.id()))
                .finish(),
            Self::SelectionsChanged(id) => f.debug_tuple("SelectionsChanged").field(id).finish(),
            Self::Close => f.write_str("Close"),
        }
    }
}

struct ControllerState {
    document_id: DocumentId,
    binding: Binding,
    collaborators: Collaborators,
    /// Released by [`Notification::Close`], after the final detach
    pin: Option<DocumentPin>,
    inbox: Weak<Inbox>,
}

/// Controller state plus the notifications waiting for it.
///
/// A collaborator may call back into the controller while it is handling a
/// notification (an agent that moves focus, a host that closes the session
/// from inside a callback). Those notifications are queued and applied by the
/// outer [`Inbox::deliver`] as soon as the current one finishes.
struct Inbox {
    state: RefCell<ControllerState>,
    pending: RefCell<VecDeque<Notification>>,
}

/// Syncs the live preview highlight with the cursor in the active view of one document
pub struct HighlightController {
    inbox: Rc<Inbox>,
    document_id: DocumentId,
    active_view_subscription: Option<Subscription>,
}

impl HighlightController {
    /// Pin `document`, start following `registry`, and attach right away if
    /// the currently active view already edits `document`.
    pub fn new(
        document: Rc<dyn DocumentHandle>,
        registry: &dyn ActiveViewRegistry,
        collaborators: Collaborators,
    ) -> Self {
        let pin = DocumentPin::new(document);
        let document_id = pin.document_id();
        let inbox = Inbox::new(pin, collaborators);

        let weak = Rc::downgrade(&inbox);
        let active_view_subscription =
            registry.on_active_view_changed(Box::new(move |change: &ActiveViewChange| {
                if let Some(inbox) = weak.upgrade() {
                    inbox.deliver(Notification::ActiveViewChanged(change.current.clone()));
                }
            }));

        tracing::debug!("Live highlight opened for {}", document_id);

        // Focus may already be on our document; treat it as a fresh change.
        inbox.deliver(Notification::ActiveViewChanged(registry.active_view()));

        Self {
            inbox,
            document_id,
            active_view_subscription: Some(active_view_subscription),
        }
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// The view currently attached, if any
    pub fn attached_view(&self) -> Option<ViewId> {
        match &self.inbox.state.borrow().binding {
            Binding::Attached { view, .. } => Some(view.id()),
            Binding::Detached => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached_view().is_some()
    }

    /// End the live-development session for this document.
    ///
    /// Equivalent to dropping the controller.
    pub fn close(self) {}
}

impl Drop for HighlightController {
    fn drop(&mut self) {
        self.active_view_subscription.take();
        self.inbox.deliver(Notification::Close);
    }
}

impl fmt::Debug for HighlightController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightController")
            .field("document_id", &self.document_id)
            .field("attached_view", &self.attached_view())
            .finish()
    }
}

impl Inbox {
    fn new(pin: DocumentPin, collaborators: Collaborators) -> Rc<Self> {
        Rc::new_cyclic(|inbox| Self {
            state: RefCell::new(ControllerState {
                document_id: pin.document_id(),
                binding: Binding::Detached,
                collaborators,
                pin: Some(pin),
                inbox: inbox.clone(),
            }),
            pending: RefCell::new(VecDeque::new()),
        })
    }

    /// Queue `notification` and, unless an outer call is already doing so,
    /// apply everything queued.
    fn deliver(&self, notification: Notification) {
        self.pending.borrow_mut().push_back(notification);

        let Ok(mut state) = self.state.try_borrow_mut() else {
            tracing::trace!("Controller busy, queued notification");
            return;
        };
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(notification) = next else {
                break;
            };
            state.handle(notification);
        }
    }
}

impl ControllerState {
    fn handle(&mut self, notification: Notification) {
        if self.pin.is_none() {
            tracing::trace!("Ignoring {:?} after close", notification);
            return;
        }
        match notification {
            Notification::ActiveViewChanged(current) => self.on_active_view_change(current),
            Notification::SelectionsChanged(view_id) => self.on_cursor_activity(view_id),
            Notification::Close => self.close(),
        }
    }

    fn on_active_view_change(&mut self, current: Option<Rc<dyn EditorView>>) {
        self.detach();

        if let Some(view) = current {
            if view.document_id() == self.document_id {
                self.attach(view);
            }
        }
    }

    fn on_cursor_activity(&mut self, view_id: ViewId) {
        match &self.binding {
            Binding::Attached { view, .. } if view.id() == view_id => self.update_highlight(),
            _ => tracing::trace!("Ignoring selection change from unattached {}", view_id),
        }
    }

    fn close(&mut self) {
        self.detach();
        if self.pin.take().is_some() {
            tracing::debug!("Live highlight closed for {}", self.document_id);
        }
    }

    fn attach(&mut self, view: Rc<dyn EditorView>) {
        let weak = self.inbox.clone();
        let selections = view.on_selections_changed(Box::new(move |view_id: &ViewId| {
            if let Some(inbox) = weak.upgrade() {
                inbox.deliver(Notification::SelectionsChanged(*view_id));
            }
        }));

        tracing::debug!("Attached {} to {}", view.id(), self.document_id);
        self.binding = Binding::Attached { view, selections };
        self.update_highlight();
    }

    /// The only place a lost binding hides the highlight
    fn detach(&mut self) {
        if let Binding::Attached { view, selections } =
            std::mem::replace(&mut self.binding, Binding::Detached)
        {
            selections.cancel();
            self.collaborators.agent.hide();
            tracing::debug!("Detached {} from {}", view.id(), self.document_id);
        }
    }

    /// Highlight the union of the rules under every selection.
    ///
    /// Skipped entirely (no command, not even hide) while highlighting is
    /// disabled or nothing is attached.
    fn update_highlight(&self) {
        if !self.collaborators.setting.highlight_enabled() {
            tracing::trace!("Live highlight disabled, skipping update");
            return;
        }
        let Binding::Attached { view, .. } = &self.binding else {
            return;
        };

        let selectors: Vec<String> = view
            .selections()
            .iter()
            .filter_map(|selection| {
                let position = selection.resolution_anchor();
                let selector = self
                    .collaborators
                    .resolver
                    .selector_at(view.as_ref(), position)
                    .filter(|selector| !selector.is_empty());
                tracing::trace!("{:?} resolved to {:?}", position, selector);
                selector
            })
            .collect();

        if selectors.is_empty() {
            tracing::debug!("No rule under the cursor in {}", view.id());
            self.collaborators.agent.hide();
        } else {
            let selector = selectors.join(",");
            tracing::debug!("Highlighting {:?} for {}", selector, view.id());
            self.collaborators.agent.highlight(&selector);
        }
    }
}
