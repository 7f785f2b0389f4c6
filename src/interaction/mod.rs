//! Interaction state: selection, mouse mode, transients, and the edit box.
//!
//! Created once per widget instance, reset to defaults on explicit reset,
//! and otherwise mutated field-wise by the event router, never replaced
//! wholesale.

use crate::layout::Rect;
use crate::types::{CellRef, Range};

/// Pointer-driven mode machine. The machine cycles for the life of the
/// widget; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    #[default]
    Default,
    SelectingCells,
    ResizingColumn,
    ResizingRow,
    DragFill,
}

/// Cursor the widget shell should mirror onto the container element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    ColResize,
    RowResize,
    Crosshair,
}

impl CursorStyle {
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::ColResize => "col-resize",
            CursorStyle::RowResize => "row-resize",
            CursorStyle::Crosshair => "crosshair",
        }
    }
}

/// In-place edit box, mirrored to an input overlay by the widget shell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub value: String,
    pub disabled: bool,
}

impl EditBox {
    fn reset() -> Self {
        EditBox {
            disabled: true,
            ..EditBox::default()
        }
    }
}

/// Live column/row resize drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    pub index: usize,
    pub original_size: f64,
    /// Client coordinate where the drag started, for deltas.
    pub start_pos: f64,
}

/// Drag-fill handle state and in-flight preview.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragFill {
    pub handle_hovered: bool,
    pub dragging: bool,
    /// Hit rectangle of the handle, recorded by the painter each frame.
    pub handle_rect: Option<Rect>,
    pub preview: Option<Range>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMenu {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default)]
pub struct InteractionState {
    pub mode: MouseMode,
    pub selection: Option<Range>,
    /// Range outlined by the marching ants after a copy.
    pub copy_range: Option<Range>,
    pub active_cell: Option<CellRef>,
    pub edit_box: EditBox,
    /// Widget shell should focus the edit overlay on its next sync.
    pub edit_focus_requested: bool,
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub ants_visible: bool,
    pub context_menu: ContextMenu,
    pub resize: Option<ResizeDrag>,
    pub drag_fill: DragFill,
    pub cursor: CursorStyle,
}

impl InteractionState {
    pub fn new() -> Self {
        Self {
            edit_box: EditBox::reset(),
            ..Self::default()
        }
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current selection with ordered corners, if any.
    pub fn normalized_selection(&self) -> Option<Range> {
        self.selection.map(|r| r.normalized())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_and_not_editing() {
        let state = InteractionState::new();
        assert_eq!(state.mode, MouseMode::Default);
        assert!(state.edit_box.disabled);
        assert!(state.selection.is_none());
        assert!(!state.ants_visible);
    }

    #[test]
    fn reset_clears_transients() {
        let mut state = InteractionState::new();
        state.mode = MouseMode::DragFill;
        state.drag_fill.dragging = true;
        state.selection = Some(Range::cell(CellRef::new(1, 1)));
        state.ants_visible = true;
        state.reset();
        assert_eq!(state.mode, MouseMode::Default);
        assert!(!state.drag_fill.dragging);
        assert!(state.selection.is_none());
        assert!(!state.ants_visible);
    }
}
