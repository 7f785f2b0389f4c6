//! Event router: pointer and keyboard input → state transitions and
//! data mutations.
//!
//! Handler bodies are synchronous and side-effect ordered; the pointer-down
//! priority chain is drag-handle > custom hit-area > resize > selection.

use crate::clipboard;
use crate::interaction::{CursorStyle, MouseMode, ResizeDrag};
use crate::layout::{self, MIN_BAND_SIZE};
use crate::types::{CellRef, CellValue, HitArea, Range};

use super::clipboard_flow::ClipboardRequest;
use super::{GridState, EDIT_BOX_INSET};

/// Pointer event as delivered by the host: button state, offsets relative
/// to the drawing surface, client coordinates for resize deltas, modifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
    pub client_x: f64,
    pub client_y: f64,
    pub button: i16,
    pub buttons: u16,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl PointerInput {
    /// Primary-button press at a surface offset.
    pub fn primary(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            client_x: x,
            client_y: y,
            buttons: 1,
            ..Self::default()
        }
    }

    /// Motion with no buttons held.
    pub fn motion(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            client_x: x,
            client_y: y,
            ..Self::default()
        }
    }

    /// Motion with the primary button held.
    pub fn drag(x: f64, y: f64) -> Self {
        Self {
            buttons: 1,
            ..Self::motion(x, y)
        }
    }

    pub fn at_client(mut self, client_x: f64, client_y: f64) -> Self {
        self.client_x = client_x;
        self.client_y = client_y;
        self
    }
}

/// Keyboard event as delivered by the host.
#[derive(Debug, Clone, Default)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyInput {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn shifted(key: &str) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }
}

/// What the shell must do after a key event.
#[derive(Debug, Default)]
pub struct KeyOutcome {
    /// Suppress the event's default action.
    pub suppress: bool,
    /// Host clipboard work to kick off.
    pub clipboard: Option<ClipboardRequest>,
}

impl KeyOutcome {
    fn none() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            suppress: true,
            clipboard: None,
        }
    }
}

fn arrow_delta(key: &str) -> Option<(isize, isize)> {
    match key {
        "ArrowUp" => Some((-1, 0)),
        "ArrowDown" => Some((1, 0)),
        "ArrowLeft" => Some((0, -1)),
        "ArrowRight" => Some((0, 1)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn step(at: CellRef, delta: (isize, isize), rows: usize, cols: usize) -> CellRef {
    let row = (at.row as isize + delta.0).clamp(0, rows as isize - 1);
    let col = (at.col as isize + delta.1).clamp(0, cols as isize - 1);
    CellRef::new(row as usize, col as usize)
}

impl GridState {
    /// Primary-button press. Returns the custom-renderer hit area that
    /// consumed the event, if any; the caller invokes its callback once the
    /// state borrow is released.
    pub fn pointer_down(&mut self, input: &PointerInput) -> Option<HitArea> {
        self.interaction.context_menu.visible = false;
        if input.button != 0 {
            return None;
        }

        if self.interaction.drag_fill.handle_hovered {
            self.interaction.mode = MouseMode::DragFill;
            self.interaction.drag_fill.dragging = true;
            self.interaction.drag_fill.preview = self.interaction.selection;
            self.request_redraw();
            return None;
        }

        if let Some(area) = self
            .hit_areas
            .iter()
            .find(|a| a.rect.contains(input.x, input.y))
            .cloned()
        {
            self.request_redraw();
            return Some(area);
        }

        match self.interaction.cursor {
            CursorStyle::ColResize => self.begin_column_resize(input),
            CursorStyle::RowResize => self.begin_row_resize(input),
            _ => {
                if let Some(target) =
                    layout::cell_at_offset(self.store.sheet(), input.x, input.y)
                {
                    self.interaction.mode = MouseMode::SelectingCells;
                    self.select_cell(target);
                    self.request_redraw();
                }
            }
        }
        None
    }

    fn begin_column_resize(&mut self, input: &PointerInput) {
        let Some(index) = layout::column_resize_edge(&self.store.sheet().columns, input.x) else {
            return;
        };
        let original_size = self
            .store
            .sheet()
            .columns
            .get(index)
            .map(|c| c.width)
            .unwrap_or(0.0);
        self.interaction.resize = Some(ResizeDrag {
            index,
            original_size,
            start_pos: input.client_x,
        });
        self.interaction.mode = MouseMode::ResizingColumn;
    }

    fn begin_row_resize(&mut self, input: &PointerInput) {
        let Some(index) = layout::row_resize_edge(&self.store.sheet().rows, input.y) else {
            return;
        };
        let original_size = self
            .store
            .sheet()
            .rows
            .get(index)
            .map(|r| r.height)
            .unwrap_or(0.0);
        self.interaction.resize = Some(ResizeDrag {
            index,
            original_size,
            start_pos: input.client_y,
        });
        self.interaction.mode = MouseMode::ResizingRow;
    }

    pub fn pointer_move(&mut self, input: &PointerInput) {
        // Drag-fill handle hover short-circuits everything else.
        if self.interaction.mode == MouseMode::Default {
            let hovered = self
                .interaction
                .drag_fill
                .handle_rect
                .is_some_and(|r| r.contains(input.x, input.y));
            if hovered != self.interaction.drag_fill.handle_hovered {
                self.interaction.drag_fill.handle_hovered = hovered;
                self.request_redraw();
            }
            if hovered {
                self.interaction.cursor = CursorStyle::Crosshair;
                return;
            }
        }

        if self.interaction.mode == MouseMode::DragFill {
            if let Some(target) = layout::cell_at_offset(self.store.sheet(), input.x, input.y) {
                let changed = match &mut self.interaction.drag_fill.preview {
                    Some(preview) if preview.end != target => {
                        preview.end = target;
                        true
                    }
                    _ => false,
                };
                if changed {
                    self.request_redraw();
                }
            }
            return;
        }

        self.track_hover(input.x, input.y);

        match self.interaction.mode {
            MouseMode::ResizingColumn => {
                self.apply_column_resize(input.client_x);
                return;
            }
            MouseMode::ResizingRow => {
                self.apply_row_resize(input.client_y);
                return;
            }
            _ => {}
        }

        if self.interaction.mode == MouseMode::SelectingCells && input.buttons & 1 != 0 {
            if let Some(target) = layout::cell_at_offset(self.store.sheet(), input.x, input.y) {
                let extended = match &mut self.interaction.selection {
                    Some(sel) if sel.end != target => {
                        sel.end = target;
                        true
                    }
                    _ => false,
                };
                if extended {
                    self.request_redraw();
                }
            }
            return;
        }

        if input.buttons == 0 {
            self.interaction.cursor = self.hot_zone_cursor(input.x, input.y);
        }
    }

    /// Hovered-cell bookkeeping for custom-renderer hover propagation.
    fn track_hover(&mut self, x: f64, y: f64) {
        self.hover = Some((x, y));
        let target = layout::cell_at_offset(self.store.sheet(), x, y);
        if target == self.hovered_cell {
            return;
        }
        let mut custom_involved = false;
        if let Some(prev) = self.hovered_cell.take() {
            if let Some(state) = self.renderer_states.get_mut(&(prev.row, prev.col)) {
                state.hovered = false;
            }
            custom_involved |= self
                .store
                .sheet()
                .cell(prev)
                .is_some_and(|c| c.renderer.is_some());
        }
        if let Some(cur) = target {
            if self
                .store
                .sheet()
                .cell(cur)
                .is_some_and(|c| c.renderer.is_some())
            {
                self.renderer_states.entry((cur.row, cur.col)).or_default().hovered = true;
                custom_involved = true;
            }
        }
        self.hovered_cell = target;
        if custom_involved {
            self.request_redraw();
        }
    }

    /// Resize cursor hot-zones: columns grab from the top header band
    /// (right of the leftmost header column), rows from the left header
    /// band (below the topmost header row).
    fn hot_zone_cursor(&self, x: f64, y: f64) -> CursorStyle {
        let sheet = self.store.sheet();
        let header_h = sheet.rows.first().map(|r| r.height).unwrap_or(0.0);
        let header_w = sheet.columns.first().map(|c| c.width).unwrap_or(0.0);
        if y < header_h && x > header_w && layout::column_resize_edge(&sheet.columns, x).is_some()
        {
            return CursorStyle::ColResize;
        }
        if x < header_w && y > header_h && layout::row_resize_edge(&sheet.rows, y).is_some() {
            return CursorStyle::RowResize;
        }
        CursorStyle::Default
    }

    fn apply_column_resize(&mut self, client_x: f64) {
        let Some(drag) = self.interaction.resize else {
            return;
        };
        let new_size = drag.original_size + (client_x - drag.start_pos);
        // At or below the floor: keep the previous size.
        if new_size <= MIN_BAND_SIZE {
            return;
        }
        if let Some(col) = self.store.sheet_mut().columns.get_mut(drag.index) {
            col.width = new_size;
        }
        if let Some(active) = self.interaction.active_cell {
            if active.col == drag.index {
                self.interaction.edit_box.width = new_size - EDIT_BOX_INSET;
            }
        }
        self.request_redraw();
    }

    fn apply_row_resize(&mut self, client_y: f64) {
        let Some(drag) = self.interaction.resize else {
            return;
        };
        let new_size = drag.original_size + (client_y - drag.start_pos);
        if new_size <= MIN_BAND_SIZE {
            return;
        }
        if let Some(row) = self.store.sheet_mut().rows.get_mut(drag.index) {
            row.height = new_size;
        }
        if let Some(active) = self.interaction.active_cell {
            if active.row == drag.index {
                self.interaction.edit_box.height = new_size - EDIT_BOX_INSET;
            }
        }
        self.request_redraw();
    }

    /// Primary-button release, global (a resize commits even when the
    /// pointer has left the widget).
    pub fn pointer_up(&mut self) {
        match self.interaction.mode {
            MouseMode::DragFill => {
                self.commit_drag_fill();
                self.interaction.drag_fill.dragging = false;
                self.interaction.drag_fill.preview = None;
                self.interaction.mode = MouseMode::Default;
                self.request_redraw();
            }
            MouseMode::ResizingColumn | MouseMode::ResizingRow => {
                // Size was written live during motion; just drop the transient.
                self.interaction.resize = None;
                self.interaction.mode = MouseMode::Default;
                self.request_redraw();
            }
            MouseMode::SelectingCells => {
                self.interaction.mode = MouseMode::Default;
            }
            _ => {}
        }
    }

    pub fn double_click(&mut self, _x: f64, _y: f64) {
        if self.interaction.drag_fill.handle_hovered {
            self.auto_fill_down();
            return;
        }
        if self.interaction.active_cell.is_some() {
            self.interaction.edit_box.disabled = false;
            self.interaction.edit_focus_requested = true;
        }
    }

    /// Pointer left the widget: drop hover affordances.
    pub fn pointer_leave(&mut self) {
        self.hover = None;
        self.hovered_cell = None;
        self.interaction.cursor = CursorStyle::Default;
        if self.interaction.drag_fill.handle_hovered {
            self.interaction.drag_fill.handle_hovered = false;
            self.request_redraw();
        }
    }

    /// Right-button context menu at a surface offset. Drawing the menu is a
    /// host concern; the state only tracks visibility and position.
    pub fn context_menu_open(&mut self, x: f64, y: f64) {
        self.interaction.context_menu.visible = true;
        self.interaction.context_menu.x = x;
        self.interaction.context_menu.y = y;
    }

    pub fn key_down(&mut self, input: &KeyInput) -> KeyOutcome {
        // Escape always handled first, active cell or not.
        if input.key == "Escape" {
            self.interaction.ants_visible = false;
            self.set_copy_range(None);
            self.request_redraw();
            return KeyOutcome::none();
        }

        let accel = input.ctrl || input.meta;

        if accel && input.key.eq_ignore_ascii_case("z") {
            self.undo();
            return KeyOutcome::handled();
        }

        if accel && input.key.eq_ignore_ascii_case("a") {
            self.select_all();
            return KeyOutcome::handled();
        }

        if self.interaction.active_cell.is_none() {
            return KeyOutcome::none();
        }

        if input.key == "Delete" && self.interaction.edit_box.disabled {
            self.delete_selection();
            return KeyOutcome::handled();
        }

        if accel && input.key.eq_ignore_ascii_case("c") {
            if let Some(request) = self.copy_request() {
                return KeyOutcome {
                    suppress: true,
                    clipboard: Some(request),
                };
            }
            return KeyOutcome::handled();
        }

        if accel && input.key.eq_ignore_ascii_case("v") {
            return KeyOutcome {
                suppress: true,
                clipboard: Some(ClipboardRequest::Paste),
            };
        }

        if self.interaction.edit_box.disabled {
            if let Some(delta) = arrow_delta(&input.key) {
                self.move_selection(delta, input.shift);
                return KeyOutcome::handled();
            }
            // A single printable character starts editing, seeded with that
            // character; its default insertion is suppressed to avoid
            // duplication once the box gains focus.
            if !input.ctrl && !input.meta && !input.alt && is_printable(&input.key) {
                self.interaction.edit_box.disabled = false;
                self.interaction.edit_box.value = input.key.clone();
                self.interaction.edit_focus_requested = true;
                return KeyOutcome::handled();
            }
            return KeyOutcome::none();
        }

        if input.key == "Enter" {
            self.commit_edit();
            return KeyOutcome::handled();
        }

        KeyOutcome::none()
    }

    /// Pop the most recent snapshot and re-apply its cell values.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.store.pop_undo() else {
            return;
        };
        let values: Vec<Vec<CellValue>> = snapshot
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.value.clone()).collect())
            .collect();
        // Undo is one-directional: restoring must not push a new snapshot.
        self.store.update_range(0, 0, values.into(), false);
        self.request_redraw();
    }

    fn select_all(&mut self) {
        let sheet = self.store.sheet();
        let (rows, cols) = (sheet.row_count(), sheet.col_count());
        if rows == 0 || cols == 0 {
            return;
        }
        self.interaction.selection = Some(Range::new(
            CellRef::new(0, 0),
            CellRef::new(rows - 1, cols - 1),
        ));
        self.request_redraw();
    }

    fn delete_selection(&mut self) {
        let Some(sel) = self.interaction.normalized_selection() else {
            return;
        };
        // Each clear records its own snapshot; the mutation API stays uniform.
        for row in sel.start.row..=sel.end.row {
            for col in sel.start.col..=sel.end.col {
                self.store
                    .update_range(row, col, CellValue::Text(String::new()).into(), true);
            }
        }
        self.request_redraw();
    }

    fn move_selection(&mut self, delta: (isize, isize), extend: bool) {
        let (rows, cols) = {
            let sheet = self.store.sheet();
            (sheet.row_count(), sheet.col_count())
        };
        if rows == 0 || cols == 0 {
            return;
        }
        if extend {
            let Some(sel) = self.interaction.selection else {
                return;
            };
            let end = step(sel.end, delta, rows, cols);
            if end != sel.end {
                self.interaction.selection = Some(Range::new(sel.start, end));
                self.request_redraw();
            }
        } else if let Some(active) = self.interaction.active_cell {
            let next = step(active, delta, rows, cols);
            self.select_cell(next);
            self.request_redraw();
        }
    }

    fn commit_edit(&mut self) {
        let Some(sel) = self.interaction.selection else {
            return;
        };
        let target = sel.start;
        let (value, _) = CellValue::coerce(&self.interaction.edit_box.value);
        self.store
            .update_range(target.row, target.col, value.into(), true);
        if target.row + 1 < self.store.sheet().row_count() {
            self.select_cell(CellRef::new(target.row + 1, target.col));
        }
        self.interaction.edit_box.disabled = true;
        self.request_redraw();
    }

    /// Encode the current selection for the host clipboard.
    pub fn copy_request(&self) -> Option<ClipboardRequest> {
        let sel = self.interaction.normalized_selection()?;
        let text = clipboard::encode_range(self.store.sheet(), sel);
        Some(ClipboardRequest::Copy { text, range: sel })
    }
}

fn is_printable(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(_), None))
}
