//! Copy, paste, drag-fill, and auto-fill flows over the clipboard codec.
//!
//! The host clipboard is asynchronous: `key_down` hands the shell a
//! [`ClipboardRequest`], and the shell calls back into `copy_succeeded` /
//! `apply_paste` when the promise settles. Drag-fill and auto-fill replay
//! the same copy-then-paste path internally without touching the host
//! clipboard.

use crate::clipboard;
use crate::types::{CellRef, CellValue, Range};

use super::GridState;

/// Host clipboard work requested by the router.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardRequest {
    /// Write `text`; on success the copy highlight moves to `range`.
    Copy { text: String, range: Range },
    /// Read the clipboard and paste at the current selection.
    Paste,
}

impl GridState {
    /// The host clipboard accepted the copied text: highlight the copied
    /// range and start the marching ants.
    pub fn copy_succeeded(&mut self, range: Range) {
        self.set_copy_range(Some(range));
        self.interaction.ants_visible = true;
        self.request_redraw();
    }

    /// Paste external text at the current selection with broadcast-fill
    /// semantics. Empty payloads abort; a failed read never reaches here,
    /// leaving state unchanged.
    pub fn apply_paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let block = clipboard::parse_payload(text);
        let height = block.len();
        let width = clipboard::block_width(&block);
        if height == 0 || width == 0 {
            return;
        }
        let Some(sel) = self.interaction.normalized_selection() else {
            return;
        };
        // A single-cell destination takes the copied block's dimensions;
        // anything larger keeps its own and the source tiles into it.
        let dest = if sel.is_single_cell() {
            Range::new(
                sel.start,
                CellRef::new(sel.start.row + height - 1, sel.start.col + width - 1),
            )
        } else {
            sel
        };
        self.paste_block_into(&block, dest);
    }

    /// Commit an in-flight drag-fill: replicate the original selection into
    /// the preview rectangle. Degenerate previews are a no-op.
    pub(crate) fn commit_drag_fill(&mut self) {
        let Some(sel) = self.interaction.normalized_selection() else {
            return;
        };
        let Some(preview) = self.interaction.drag_fill.preview.map(|r| r.normalized()) else {
            return;
        };
        if preview == sel {
            return;
        }
        let text = clipboard::encode_range(self.store.sheet(), sel);
        let block = clipboard::parse_payload(&text);
        if block.is_empty() {
            return;
        }
        self.paste_block_into(&block, preview);
    }

    /// Double-click on the fill handle: extend the selection's values down
    /// to the sheet's last row. No-op when already there.
    pub(crate) fn auto_fill_down(&mut self) {
        let Some(sel) = self.interaction.normalized_selection() else {
            return;
        };
        let last_row = self.store.sheet().row_count().saturating_sub(1);
        if sel.end.row >= last_row {
            return;
        }
        let fill = Range::new(sel.start, CellRef::new(last_row, sel.end.col));
        let text = clipboard::encode_range(self.store.sheet(), sel);
        let block = clipboard::parse_payload(&text);
        if block.is_empty() {
            return;
        }
        self.paste_block_into(&block, fill);
    }

    /// Tile `block` over `dest` and write it through the store as one
    /// undo-recorded bulk update, then move the selection onto the pasted
    /// rectangle and retire the copy highlight.
    fn paste_block_into(&mut self, block: &[Vec<String>], dest: Range) {
        let tiled = clipboard::tile_block(block, dest.row_count(), dest.col_count());
        let values: Vec<Vec<CellValue>> = tiled
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|text| CellValue::coerce(&text).0)
                    .collect()
            })
            .collect();
        self.store
            .update_range(dest.start.row, dest.start.col, values.into(), true);
        self.interaction.ants_visible = false;
        self.set_copy_range(None);
        self.interaction.selection = Some(dest);
        self.request_redraw();
    }
}
