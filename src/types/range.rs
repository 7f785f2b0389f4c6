//! Cell references and rectangular ranges.

use serde::{Deserialize, Serialize};

/// Zero-based cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rectangular range between two corners.
///
/// `start`/`end` are not ordered; a drag can move up-left, leaving
/// `start > end` on either axis. Consumers must go through [`Range::normalized`]
/// before indexing. Absence of a selection is `Option<Range>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: CellRef,
    pub end: CellRef,
}

impl Range {
    pub fn new(start: CellRef, end: CellRef) -> Self {
        Self { start, end }
    }

    /// Degenerate range covering a single cell.
    pub fn cell(at: CellRef) -> Self {
        Self { start: at, end: at }
    }

    /// Min/max-ordered copy. Idempotent.
    pub fn normalized(&self) -> Range {
        Range {
            start: CellRef::new(
                self.start.row.min(self.end.row),
                self.start.col.min(self.end.col),
            ),
            end: CellRef::new(
                self.start.row.max(self.end.row),
                self.start.col.max(self.end.col),
            ),
        }
    }

    pub fn contains(&self, at: CellRef) -> bool {
        let n = self.normalized();
        at.row >= n.start.row && at.row <= n.end.row && at.col >= n.start.col && at.col <= n.end.col
    }

    /// Number of rows covered.
    pub fn row_count(&self) -> usize {
        let n = self.normalized();
        n.end.row - n.start.row + 1
    }

    /// Number of columns covered.
    pub fn col_count(&self) -> usize {
        let n = self.normalized();
        n.end.col - n.start.col + 1
    }

    /// True when the range covers exactly one cell.
    pub fn is_single_cell(&self) -> bool {
        self.row_count() == 1 && self.col_count() == 1
    }
}
