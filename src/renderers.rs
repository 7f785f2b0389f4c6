//! Built-in custom cell renderers.
//!
//! Ready-made painters for the two common cases: a clickable button and an
//! image fill. Both are ordinary [`CellRenderer`] function values, so they
//! double as reference implementations for embedders writing their own.

use crate::layout::Rect;
use crate::types::{CellRenderer, HitArea};

const BUTTON_FILL: &str = "#1A73E8";
const BUTTON_FILL_HOVER: &str = "#1765CC";
const BUTTON_TEXT: &str = "#FFFFFF";
const BUTTON_FONT: &str = "12px sans-serif";
const BUTTON_INSET: f64 = 3.0;

/// A button filling the cell. Registers a hit area with id
/// `button:{row},{col}`; hover feedback comes from the painter side table.
pub fn button(label: impl Into<String>) -> CellRenderer {
    let label = label.into();
    CellRenderer::new(move |ctx, surface| {
        let rect = Rect::new(
            ctx.rect.x + BUTTON_INSET,
            ctx.rect.y + BUTTON_INSET,
            (ctx.rect.w - BUTTON_INSET * 2.0).max(0.0),
            (ctx.rect.h - BUTTON_INSET * 2.0).max(0.0),
        );
        let fill = if ctx.hovered {
            BUTTON_FILL_HOVER
        } else {
            BUTTON_FILL
        };
        surface.fill_rect(rect, fill);
        surface.fill_text(
            &label,
            rect.x + 8.0,
            rect.y + rect.h / 2.0,
            BUTTON_FONT,
            BUTTON_TEXT,
        );
        Some(HitArea::new(
            format!("button:{},{}", ctx.row, ctx.col),
            rect,
        ))
    })
}

/// An image drawn over the whole cell through the surface's image
/// primitive. Registers no hit area.
pub fn image(src: impl Into<String>) -> CellRenderer {
    let src = src.into();
    CellRenderer::new(move |ctx, surface| {
        surface.draw_image(&src, ctx.rect);
        None
    })
}
