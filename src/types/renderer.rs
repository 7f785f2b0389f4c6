//! Pluggable per-cell renderers and the hit areas they register.
//!
//! A custom renderer is a plain function value, not an inheritance hook:
//! given a render context and the drawing surface it paints the cell and may
//! return a hit-area descriptor for click dispatch.

use std::fmt;
use std::rc::Rc;

use crate::layout::Rect;
use crate::render::surface::DrawSurface;

use super::cell::CellValue;
use super::style::CellStyles;

/// Callback invoked with the hit area's id when it is clicked.
pub type HitCallback = Rc<dyn Fn(&str)>;

/// Clickable rectangle registered by a custom renderer during paint.
///
/// Rectangles are in surface coordinates. The registry is cleared at the
/// start of every frame, so an area only exists while its cell is painted.
#[derive(Clone)]
pub struct HitArea {
    pub id: String,
    pub rect: Rect,
    pub on_click: Option<HitCallback>,
}

impl HitArea {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
            on_click: None,
        }
    }

    pub fn with_callback(mut self, cb: HitCallback) -> Self {
        self.on_click = Some(cb);
        self
    }
}

impl fmt::Debug for HitArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitArea")
            .field("id", &self.id)
            .field("rect", &self.rect)
            .field("has_callback", &self.on_click.is_some())
            .finish()
    }
}

/// Everything a custom renderer may read while painting one cell.
pub struct CellRenderContext<'a> {
    pub row: usize,
    pub col: usize,
    pub value: &'a CellValue,
    /// Display text of the value.
    pub text: String,
    /// Cell bounds in surface coordinates.
    pub rect: Rect,
    pub styles: &'a CellStyles,
    /// Cell lies inside the normalized selection.
    pub selected: bool,
    /// Cell is the active cell.
    pub focused: bool,
    /// Pointer position, `Some` only when it falls inside this exact cell.
    pub hover: Option<(f64, f64)>,
    /// Hover flag from the painter's per-cell side table.
    pub hovered: bool,
}

type RenderFn = dyn Fn(&CellRenderContext<'_>, &mut dyn DrawSurface) -> Option<HitArea>;

/// A custom cell painter as a shareable function value.
#[derive(Clone)]
pub struct CellRenderer(Rc<RenderFn>);

impl CellRenderer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&CellRenderContext<'_>, &mut dyn DrawSurface) -> Option<HitArea> + 'static,
    {
        Self(Rc::new(f))
    }

    /// Paint the cell, returning an optional hit area to register.
    pub fn paint(
        &self,
        ctx: &CellRenderContext<'_>,
        surface: &mut dyn DrawSurface,
    ) -> Option<HitArea> {
        (self.0)(ctx, surface)
    }
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellRenderer")
    }
}
