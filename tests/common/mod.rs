//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use live_highlight::controller::{Collaborators, HighlightController};
use live_highlight::document::{Document, DocumentId};
use live_highlight::resolver::{RuleSpan, RuleTable, SelectorResolver};
use live_highlight::view::{ActiveViews, BufferView, EditorView, ViewId};
use live_highlight::{HighlightAgent, HighlightCommand, HighlightToggle, Position};

pub const DOC: DocumentId = DocumentId(1);
pub const OTHER_DOC: DocumentId = DocumentId(2);

/// Agent that remembers every command it was sent
#[derive(Debug, Default)]
pub struct RecordingAgent {
    commands: RefCell<Vec<HighlightCommand>>,
}

impl RecordingAgent {
    /// Drain the commands received so far
    pub fn take(&self) -> Vec<HighlightCommand> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }

    pub fn hide_count(&self) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|c| **c == HighlightCommand::Hide)
            .count()
    }
}

impl HighlightAgent for RecordingAgent {
    fn highlight(&self, selector: &str) {
        self.commands.borrow_mut().push(highlight(selector));
    }

    fn hide(&self) {
        self.commands.borrow_mut().push(HighlightCommand::Hide);
    }
}

/// Resolver that records the positions it was asked about
#[derive(Debug, Default)]
pub struct RecordingResolver {
    pub rules: RuleTable,
    pub queried: RefCell<Vec<Position>>,
}

impl SelectorResolver for RecordingResolver {
    fn selector_at(&self, view: &dyn EditorView, position: Position) -> Option<String> {
        self.queried.borrow_mut().push(position);
        self.rules.selector_at(view, position)
    }
}

pub fn highlight(selector: &str) -> HighlightCommand {
    HighlightCommand::Highlight {
        selector: selector.to_string(),
    }
}

/// Rules for [`DOC`]: `.a` on lines 0-1, `.b` on lines 2-3, nothing after.
pub fn test_rules() -> RuleTable {
    let mut rules = RuleTable::new();
    rules.set_rules(
        DOC,
        vec![
            RuleSpan::new(Position::new(0, 0), Position::new(2, 0), ".a"),
            RuleSpan::new(Position::new(2, 0), Position::new(4, 0), ".b"),
        ],
    );
    rules
}

/// One document, a registry, and recording collaborators
pub struct Harness {
    pub document: Rc<Document>,
    pub registry: Rc<ActiveViews>,
    pub agent: Rc<RecordingAgent>,
    pub resolver: Rc<RecordingResolver>,
    pub toggle: HighlightToggle,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            document: Rc::new(Document::new(DOC)),
            registry: Rc::new(ActiveViews::new()),
            agent: Rc::new(RecordingAgent::default()),
            resolver: Rc::new(RecordingResolver {
                rules: test_rules(),
                queried: RefCell::new(Vec::new()),
            }),
            toggle: HighlightToggle::new(true),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            resolver: self.resolver.clone(),
            agent: self.agent.clone(),
            setting: Rc::new(self.toggle.clone()),
        }
    }

    pub fn open(&self) -> HighlightController {
        HighlightController::new(
            self.document.clone(),
            self.registry.as_ref(),
            self.collaborators(),
        )
    }

    pub fn focus(&self, view: &Rc<BufferView>) {
        let view: Rc<dyn EditorView> = view.clone();
        self.registry.set_active(Some(view));
    }

    pub fn blur(&self) {
        self.registry.set_active(None);
    }
}

pub fn view(id: u64, document: DocumentId) -> Rc<BufferView> {
    Rc::new(BufferView::new(ViewId(id), document))
}
