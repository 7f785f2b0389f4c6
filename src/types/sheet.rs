//! The sheet: a rectangular cell matrix plus per-axis styling.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

use super::cell::Cell;
use super::range::CellRef;
use super::style::{ColumnStyle, RowStyle};

/// A `rows × columns` cell matrix with per-column and per-row geometry.
///
/// Invariant: `cells.len() == rows.len()` and every row of `cells` has
/// exactly `columns.len()` entries. [`Sheet::validate`] checks it at the
/// attach boundary; internal mutation preserves it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub cells: Vec<Vec<Cell>>,
    pub columns: Vec<ColumnStyle>,
    pub rows: Vec<RowStyle>,
}

impl Sheet {
    /// Empty sheet with default band sizes, positions already stamped.
    pub fn blank(rows: usize, columns: usize) -> Self {
        let mut sheet = Sheet {
            cells: (0..rows)
                .map(|_| (0..columns).map(|_| Cell::default()).collect())
                .collect(),
            columns: (0..columns).map(|_| ColumnStyle::default()).collect(),
            rows: (0..rows).map(|_| RowStyle::default()).collect(),
        };
        sheet.stamp_positions();
        sheet
    }

    /// Sheet built from rows of text values; handy for tests and demos.
    pub fn from_text_rows(rows: &[&[&str]]) -> Self {
        let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut sheet = Sheet::blank(rows.len(), columns);
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                if let Some(cell) = sheet.cell_mut(CellRef::new(r, c)) {
                    cell.set_value((*text).into());
                }
            }
        }
        sheet
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn contains(&self, at: CellRef) -> bool {
        at.row < self.row_count() && at.col < self.col_count()
    }

    pub fn cell(&self, at: CellRef) -> Option<&Cell> {
        self.cells.get(at.row).and_then(|row| row.get(at.col))
    }

    pub fn cell_mut(&mut self, at: CellRef) -> Option<&mut Cell> {
        self.cells.get_mut(at.row).and_then(|row| row.get_mut(at.col))
    }

    /// Stamp every cell with its denormalized matrix position and settle the
    /// derived background. Runs once when the sheet is attached.
    pub fn stamp_positions(&mut self) {
        for (r, row) in self.cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                cell.row = r;
                cell.col = c;
                cell.refresh_background();
            }
        }
    }

    /// Check the matrix invariant.
    pub fn validate(&self) -> Result<()> {
        if self.cells.len() != self.rows.len() {
            return Err(GridError::InvalidSheet(format!(
                "{} cell rows for {} row styles",
                self.cells.len(),
                self.rows.len()
            )));
        }
        for (r, row) in self.cells.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(GridError::InvalidSheet(format!(
                    "row {} has {} cells for {} column styles",
                    r,
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    #[test]
    fn blank_satisfies_invariant() {
        let sheet = Sheet::blank(3, 5);
        sheet.validate().unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 5);
        assert_eq!(sheet.cells[2][4].row, 2);
        assert_eq!(sheet.cells[2][4].col, 4);
    }

    #[test]
    fn validate_rejects_ragged_rows() {
        let mut sheet = Sheet::blank(2, 2);
        sheet.cells[1].pop();
        assert!(sheet.validate().is_err());

        let mut sheet = Sheet::blank(2, 2);
        sheet.rows.pop();
        assert!(sheet.validate().is_err());
    }

    #[test]
    fn from_text_rows_pads_to_widest() {
        let sheet = Sheet::from_text_rows(&[&["a", "b", "c"], &["d"]]);
        sheet.validate().unwrap();
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.cells[0][2].value, CellValue::Text("c".to_string()));
        assert_eq!(sheet.cells[1][1].value, CellValue::Empty);
    }
}
