//! Mapping a position in a view to the rule that encloses it

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::DocumentId;
use crate::selection::Position;
use crate::view::EditorView;

/// Finds the structural rule (e.g. a CSS selector) around a position.
///
/// `None` means the position is not inside any rule, which is a normal outcome.
pub trait SelectorResolver {
    fn selector_at(&self, view: &dyn EditorView, position: Position) -> Option<String>;
}

/// A rule and the span of source it covers, end exclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpan {
    pub start: Position,
    pub end: Position,
    pub selector: String,
}

impl RuleSpan {
    pub fn new(start: Position, end: Position, selector: impl Into<String>) -> Self {
        Self {
            start,
            end,
            selector: selector.into(),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// Resolver over rule spans computed elsewhere (e.g. by a stylesheet parser)
///
/// Spans may nest. The innermost span containing the position wins, which
/// for preprocessor sources carries the fully expanded nested selector.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<DocumentId, Vec<RuleSpan>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rules known for `document`
    pub fn set_rules(&mut self, document: DocumentId, rules: Vec<RuleSpan>) {
        tracing::debug!("{} rules registered for {}", rules.len(), document);
        self.rules.insert(document, rules);
    }

    pub fn rules(&self, document: DocumentId) -> &[RuleSpan] {
        self.rules.get(&document).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn innermost(&self, document: DocumentId, pos: Position) -> Option<&RuleSpan> {
        self.rules(document)
            .iter()
            .filter(|rule| rule.contains(pos))
            .max_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)))
    }
}

impl SelectorResolver for RuleTable {
    fn selector_at(&self, view: &dyn EditorView, position: Position) -> Option<String> {
        self.innermost(view.document_id(), position)
            .map(|rule| rule.selector.clone())
            .filter(|selector| !selector.is_empty())
    }
}
