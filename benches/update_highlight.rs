//! Benchmarks for the cursor-to-highlight path
//!
//! Run with: cargo bench update_highlight

use std::rc::Rc;

use live_highlight::agent::HighlightAgent;
use live_highlight::controller::{Collaborators, HighlightController};
use live_highlight::document::{Document, DocumentId};
use live_highlight::resolver::{RuleSpan, RuleTable};
use live_highlight::view::{ActiveViews, BufferView, EditorView, ViewId};
use live_highlight::{HighlightToggle, Position, Selection};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

struct NullAgent;

impl HighlightAgent for NullAgent {
    fn highlight(&self, selector: &str) {
        divan::black_box(selector);
    }

    fn hide(&self) {}
}

/// One five-line rule per block, back to back
fn rules(count: usize) -> RuleTable {
    let mut table = RuleTable::new();
    table.set_rules(
        DocumentId(1),
        (0..count)
            .map(|i| {
                RuleSpan::new(
                    Position::new(i * 5, 0),
                    Position::new(i * 5 + 4, 1),
                    format!(".rule-{}", i),
                )
            })
            .collect(),
    );
    table
}

#[divan::bench(args = [10, 100, 1_000])]
fn cursor_move(bencher: divan::Bencher, rule_count: usize) {
    let registry = ActiveViews::new();
    let view = Rc::new(BufferView::new(ViewId(1), DocumentId(1)));
    let active: Rc<dyn EditorView> = view.clone();
    registry.set_active(Some(active));
    let _controller = HighlightController::new(
        Rc::new(Document::new(DocumentId(1))),
        &registry,
        Collaborators {
            resolver: Rc::new(rules(rule_count)),
            agent: Rc::new(NullAgent),
            setting: Rc::new(HighlightToggle::new(true)),
        },
    );

    let mut line = 0;
    bencher.bench_local(|| {
        line = (line + 7) % (rule_count * 5);
        view.set_cursor(Position::new(line, 0));
    });
}

#[divan::bench(args = [1, 8, 64])]
fn multi_cursor_union(bencher: divan::Bencher, cursor_count: usize) {
    let registry = ActiveViews::new();
    let view = Rc::new(BufferView::new(ViewId(1), DocumentId(1)));
    let active: Rc<dyn EditorView> = view.clone();
    registry.set_active(Some(active));
    let _controller = HighlightController::new(
        Rc::new(Document::new(DocumentId(1))),
        &registry,
        Collaborators {
            resolver: Rc::new(rules(256)),
            agent: Rc::new(NullAgent),
            setting: Rc::new(HighlightToggle::new(true)),
        },
    );
    let selections: Vec<Selection> = (0..cursor_count)
        .map(|i| Selection::collapsed(Position::new(i * 5 + 1, 0)))
        .collect();

    bencher.bench_local(|| view.set_selections(selections.clone()));
}
