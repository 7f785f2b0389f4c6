//! Shared grid state - the engine behind the wasm widget.
//!
//! `GridState` owns the sheet store, interaction state, and the two frame
//! drivers, and carries the per-frame hit-area registry and the painter's
//! per-cell renderer side table. The event router methods live in
//! [`events`]; clipboard and fill flows in [`clipboard_flow`]. Everything
//! here runs on any target; the wasm shell in `crate::widget` is a thin
//! wrapper around it.

mod clipboard_flow;
mod events;

pub use clipboard_flow::ClipboardRequest;
pub use events::{KeyInput, KeyOutcome, PointerInput};

use std::collections::HashMap;

use crate::error::Result;
use crate::interaction::InteractionState;
use crate::layout;
use crate::render::ants::AntsDriver;
use crate::render::scheduler::RenderScheduler;
use crate::store::SheetStore;
use crate::types::{CellRef, HitArea, Range, Sheet};

/// Gap between a cell's border and the edit box inside it.
pub const EDIT_BOX_INSET: f64 = 4.0;

/// Per-cell state owned by the painter for custom renderers, keyed by the
/// stable (row, col) identity rather than paint-time pixel position.
#[derive(Debug, Clone, Copy, Default)]
pub struct RendererCellState {
    pub hovered: bool,
}

pub struct GridState {
    pub store: SheetStore,
    pub interaction: InteractionState,
    pub scheduler: RenderScheduler,
    pub ants: AntsDriver,
    /// Visible size of the surrounding scroll container.
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Custom-renderer hit areas registered during the last paint.
    pub hit_areas: Vec<HitArea>,
    /// Painter side table for custom renderers.
    pub renderer_states: HashMap<(usize, usize), RendererCellState>,
    /// Last pointer position over the surface, if any.
    pub hover: Option<(f64, f64)>,
    pub hovered_cell: Option<CellRef>,
    attached: bool,
}

impl GridState {
    pub fn new() -> Self {
        Self {
            store: SheetStore::new(),
            interaction: InteractionState::new(),
            scheduler: RenderScheduler::new(),
            ants: AntsDriver::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            hit_areas: Vec::new(),
            renderer_states: HashMap::new(),
            hover: None,
            hovered_cell: None,
            attached: false,
        }
    }

    /// Attach a sheet: validate, stamp denormalized positions, take
    /// ownership, and request the initial redraw. Runs again whenever the
    /// host hands over a new sheet value; interaction state and stale undo
    /// snapshots are reset with it.
    pub fn attach(&mut self, mut sheet: Sheet) -> Result<()> {
        sheet.validate()?;
        sheet.stamp_positions();
        self.store.replace(sheet);
        self.store.undo.clear();
        self.interaction.reset();
        self.renderer_states.clear();
        self.hit_areas.clear();
        self.hover = None;
        self.hovered_cell = None;
        self.attached = true;
        self.request_redraw();
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Total content extent the drawing surface must cover.
    pub fn content_size(&self) -> (f64, f64) {
        let sheet = self.store.sheet();
        (
            layout::total_width(&sheet.columns),
            layout::total_height(&sheet.rows),
        )
    }

    pub fn request_redraw(&mut self) {
        self.scheduler.mark_dirty();
    }

    /// Make `at` the active cell: move the focus flag, reposition the edit
    /// box over the cell, and reseed its value. The box stays disabled
    /// until a double-click or a typed character enables it.
    pub fn set_active_cell(&mut self, at: CellRef) {
        if let Some(prev) = self.interaction.active_cell {
            if prev != at {
                if let Some(cell) = self.store.sheet_mut().cell_mut(prev) {
                    cell.set_focused(false);
                }
            }
        }
        if let Some(cell) = self.store.sheet_mut().cell_mut(at) {
            cell.set_focused(true);
        }
        self.interaction.active_cell = Some(at);
        self.position_edit_box(at);
        self.interaction.edit_box.value = self
            .store
            .sheet()
            .cell(at)
            .map(|c| c.display().into_owned())
            .unwrap_or_default();
        self.interaction.edit_box.disabled = true;
    }

    /// Active cell plus a degenerate selection on it.
    pub fn select_cell(&mut self, at: CellRef) {
        self.set_active_cell(at);
        self.interaction.selection = Some(Range::cell(at));
    }

    /// Place the edit box over a cell, in viewport coordinates
    /// (accumulated offsets minus the current scroll).
    pub fn position_edit_box(&mut self, at: CellRef) {
        let sheet = self.store.sheet();
        let left = layout::accumulated_width(&sheet.columns, at.col) - self.interaction.scroll_x;
        let top = layout::accumulated_height(&sheet.rows, at.row) - self.interaction.scroll_y;
        let width = sheet.columns.get(at.col).map(|c| c.width).unwrap_or(0.0);
        let height = sheet.rows.get(at.row).map(|r| r.height).unwrap_or(0.0);
        let edit_box = &mut self.interaction.edit_box;
        edit_box.left = left;
        edit_box.top = top;
        edit_box.width = width - EDIT_BOX_INSET;
        edit_box.height = height - EDIT_BOX_INSET;
    }

    /// Swap the copy-highlight range, keeping cell highlight flags in step.
    pub fn set_copy_range(&mut self, range: Option<Range>) {
        if let Some(old) = self.interaction.copy_range.take() {
            self.for_each_cell_in(old, |cell| cell.set_highlighted(false));
        }
        if let Some(new) = range {
            self.for_each_cell_in(new, |cell| cell.set_highlighted(true));
            self.interaction.copy_range = Some(new);
        }
    }

    /// Host scroll offset changed; the edit box rides along.
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.interaction.scroll_x = x;
        self.interaction.scroll_y = y;
        if let Some(active) = self.interaction.active_cell {
            self.position_edit_box(active);
        }
        self.request_redraw();
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.request_redraw();
    }

    fn for_each_cell_in(&mut self, range: Range, f: impl Fn(&mut crate::types::Cell)) {
        let n = range.normalized();
        let sheet = self.store.sheet_mut();
        for row in n.start.row..=n.end.row {
            for col in n.start.col..=n.end.col {
                if let Some(cell) = sheet.cell_mut(CellRef::new(row, col)) {
                    f(cell);
                }
            }
        }
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new()
    }
}
