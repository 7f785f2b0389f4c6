//! Frame painting: cells, selection overlay, marching ants, drag-fill
//! preview, and the custom-renderer hit-area registry.
//!
//! Runs against any [`DrawSurface`]; the wasm shell hands it the canvas,
//! tests hand it a recording surface.

use crate::grid::GridState;
use crate::interaction::MouseMode;
use crate::layout::{self, Rect};
use crate::types::{CellRef, CellRenderContext, HitArea, Range, Sheet};
use crate::types::style::{
    CellStyles, DEFAULT_CELL_PADDING, DEFAULT_FONT, DEFAULT_FOREGROUND, GRID_BORDER_COLOR,
};

use super::surface::DrawSurface;

/// Selection overlay colors.
pub const SELECTION_FILL: &str = "rgba(66, 133, 244, 0.10)";
pub const SELECTION_BORDER: &str = "#4285F4";
/// Marching-ants copy border.
pub const ANTS_BORDER: &str = "#1A73E8";
pub const ANTS_DASH: [f64; 2] = [4.0, 3.0];
/// Drag-fill preview.
pub const PREVIEW_FILL: &str = "rgba(95, 99, 104, 0.08)";
pub const PREVIEW_BORDER: &str = "#5F6368";
pub const PREVIEW_DASH: [f64; 2] = [3.0, 3.0];
/// Radius of the drag-fill handle dot.
pub const FILL_HANDLE_RADIUS: f64 = 3.0;
/// Side of the handle's square hit rectangle.
pub const FILL_HANDLE_HIT_SIZE: f64 = 10.0;

/// Paint one frame.
///
/// Clears the hit-area registry, clips to the visible viewport, walks only
/// the intersecting bands, dispatches custom renderers, then layers the
/// selection, copy, and preview overlays. Before a sheet is attached this
/// is a no-op.
pub fn paint_frame(state: &mut GridState, surface: &mut dyn DrawSurface) {
    if !state.is_attached() {
        return;
    }

    reconcile_surface_size(state, surface);

    let clip = Rect::new(
        state.interaction.scroll_x,
        state.interaction.scroll_y,
        state.viewport_width,
        state.viewport_height,
    );

    let selection = state.interaction.normalized_selection();
    let active = state.interaction.active_cell;
    let hover = state.hover;
    let ants_offset = state.ants.dash_offset();

    let mut hit_areas: Vec<HitArea> = Vec::new();

    surface.save();
    surface.clip_rect(clip);
    surface.clear_rect(clip);

    {
        let sheet = state.store.sheet();
        let mut y = 0.0;
        for (row, row_style) in sheet.rows.iter().enumerate() {
            let h = row_style.height;
            if y >= clip.bottom() {
                break;
            }
            if y + h <= clip.y {
                y += h;
                continue;
            }
            let mut x = 0.0;
            for (col, col_style) in sheet.columns.iter().enumerate() {
                let w = col_style.width;
                if x >= clip.right() {
                    break;
                }
                if x + w <= clip.x {
                    x += w;
                    continue;
                }
                let at = CellRef::new(row, col);
                let rect = Rect::new(x, y, w, h);
                let Some(cell) = sheet.cell(at) else {
                    x += w;
                    continue;
                };

                if let Some(renderer) = cell.renderer.clone() {
                    let ctx = CellRenderContext {
                        row,
                        col,
                        value: &cell.value,
                        text: cell.display().into_owned(),
                        rect,
                        styles: &cell.styles,
                        selected: selection.is_some_and(|s| s.contains(at)),
                        focused: active == Some(at),
                        hover: hover.filter(|(hx, hy)| rect.contains(*hx, *hy)),
                        hovered: state
                            .renderer_states
                            .get(&(row, col))
                            .is_some_and(|s| s.hovered),
                    };
                    if let Some(area) = renderer.paint(&ctx, surface) {
                        hit_areas.push(area);
                    }
                } else {
                    paint_default_cell(surface, sheet, at, rect);
                }
                x += w;
            }
            y += h;
        }
    }

    // Primary selection: translucent fill, solid border, drag-fill handle.
    let mut handle_rect = None;
    if let Some(sel) = selection {
        let rect = range_rect(state.store.sheet(), sel);
        if rect.intersects(&clip) {
            surface.fill_rect(rect, SELECTION_FILL);
            surface.stroke_rect(rect, SELECTION_BORDER, 2.0);
            surface.fill_circle(rect.right(), rect.bottom(), FILL_HANDLE_RADIUS, SELECTION_BORDER);
            handle_rect = Some(Rect::new(
                rect.right() - FILL_HANDLE_HIT_SIZE / 2.0,
                rect.bottom() - FILL_HANDLE_HIT_SIZE / 2.0,
                FILL_HANDLE_HIT_SIZE,
                FILL_HANDLE_HIT_SIZE,
            ));
        }
    }

    // Copy highlight under marching ants.
    if state.interaction.ants_visible {
        if let Some(copy) = state.interaction.copy_range {
            let rect = range_rect(state.store.sheet(), copy);
            if rect.intersects(&clip) {
                surface.stroke_rect_dashed(rect, ANTS_BORDER, 2.0, &ANTS_DASH, ants_offset);
            }
        }
    }

    // Drag-fill preview.
    if state.interaction.drag_fill.dragging {
        if let Some(preview) = state.interaction.drag_fill.preview {
            let rect = range_rect(state.store.sheet(), preview);
            if rect.intersects(&clip) {
                surface.fill_rect(rect, PREVIEW_FILL);
                surface.stroke_rect_dashed(rect, PREVIEW_BORDER, 1.0, &PREVIEW_DASH, 0.0);
            }
        }
    }

    surface.restore();

    state.hit_areas = hit_areas;
    state.interaction.drag_fill.handle_rect = handle_rect;
}

/// Default cell painter: background fill, grid border, left-padded text
/// vertically centered on the middle baseline.
fn paint_default_cell(surface: &mut dyn DrawSurface, sheet: &Sheet, at: CellRef, rect: Rect) {
    let Some(cell) = sheet.cell(at) else {
        return;
    };
    surface.fill_rect(rect, cell.background());

    let border = resolve(sheet, at, |s| s.border.clone()).unwrap_or_else(|| GRID_BORDER_COLOR.to_string());
    surface.stroke_rect(rect, &border, 1.0);

    let text = cell.display();
    if text.is_empty() {
        return;
    }
    let font = resolve(sheet, at, |s| s.font.clone()).unwrap_or_else(|| DEFAULT_FONT.to_string());
    let color =
        resolve(sheet, at, |s| s.foreground.clone()).unwrap_or_else(|| DEFAULT_FOREGROUND.to_string());
    let padding = resolve(sheet, at, |s| s.padding).unwrap_or(DEFAULT_CELL_PADDING);
    surface.fill_text(&text, rect.x + padding, rect.y + rect.h / 2.0, &font, &color);
}

/// Style resolution: the cell's own styles, then the column default, then
/// the row default.
fn resolve<T>(sheet: &Sheet, at: CellRef, pick: impl Fn(&CellStyles) -> Option<T>) -> Option<T> {
    if let Some(cell) = sheet.cell(at) {
        if let Some(v) = pick(&cell.styles) {
            return Some(v);
        }
    }
    if let Some(v) = sheet
        .columns
        .get(at.col)
        .and_then(|c| c.styles.as_ref())
        .and_then(&pick)
    {
        return Some(v);
    }
    sheet.rows.get(at.row).and_then(|r| r.styles.as_ref()).and_then(&pick)
}

/// Bounds of a (possibly inverted) range in surface coordinates.
pub fn range_rect(sheet: &Sheet, range: Range) -> Rect {
    let n = range.normalized();
    let x = layout::accumulated_width(&sheet.columns, n.start.col);
    let y = layout::accumulated_height(&sheet.rows, n.start.row);
    Rect::new(
        x,
        y,
        layout::accumulated_width(&sheet.columns, n.end.col + 1) - x,
        layout::accumulated_height(&sheet.rows, n.end.row + 1) - y,
    )
}

/// While a resize drag is live, keep the surface's backing size in step
/// with the sheet's content extent.
fn reconcile_surface_size(state: &GridState, surface: &mut dyn DrawSurface) {
    if !matches!(
        state.interaction.mode,
        MouseMode::ResizingColumn | MouseMode::ResizingRow
    ) {
        return;
    }
    let (content_w, content_h) = state.content_size();
    if (surface.width() - content_w).abs() > 0.5 || (surface.height() - content_h).abs() > 0.5 {
        surface.resize(content_w, content_h);
    }
}
