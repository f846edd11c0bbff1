//! Positions and selection ranges as reported by an editor view

use serde::{Deserialize, Serialize};

/// A position in a document (line and column, both 0-indexed).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// A text selection with anchor (start point) and head (cursor position).
/// The anchor stays fixed while the head moves during selection extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub fn collapsed(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the start position (minimum of anchor and head)
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Get the end position (maximum of anchor and head)
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Check if selection is reversed (head before anchor)
    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    /// Position used to look up the enclosing rule: the end of a reversed
    /// selection, the start otherwise.
    pub fn resolution_anchor(&self) -> Position {
        if self.is_reversed() {
            self.end()
        } else {
            self.start()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(Position::new(1, 5));
        assert!(sel.is_empty());
        assert!(!sel.is_reversed());
        assert_eq!(sel.resolution_anchor(), Position::new(1, 5));
    }

    #[test]
    fn test_selection_start_end() {
        let forward = Selection::new(Position::new(0, 0), Position::new(0, 5));
        assert_eq!(forward.start(), Position::new(0, 0));
        assert_eq!(forward.end(), Position::new(0, 5));
        assert!(!forward.is_reversed());

        let backward = Selection::new(Position::new(0, 5), Position::new(0, 0));
        assert_eq!(backward.start(), Position::new(0, 0));
        assert_eq!(backward.end(), Position::new(0, 5));
        assert!(backward.is_reversed());
    }

    #[test]
    fn test_reversed_selection_resolves_at_end() {
        let sel = Selection::new(Position::new(0, 20), Position::new(0, 10));
        assert!(sel.is_reversed());
        assert_eq!(sel.start(), Position::new(0, 10));
        assert_eq!(sel.end(), Position::new(0, 20));
        assert_eq!(sel.resolution_anchor(), Position::new(0, 20));
    }

    #[test]
    fn test_forward_selection_resolves_at_start() {
        let sel = Selection::new(Position::new(2, 0), Position::new(4, 3));
        assert_eq!(sel.resolution_anchor(), Position::new(2, 0));
    }

    #[test]
    fn test_position_ordering_is_line_major() {
        assert!(Position::new(0, 99) < Position::new(1, 0));
        assert!(Position::new(3, 2) < Position::new(3, 4));
    }
}
