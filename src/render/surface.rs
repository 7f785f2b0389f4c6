//! Drawing surface contract.
//!
//! Abstracts the immediate-mode 2D canvas so the painter can run against the
//! browser (`CanvasSurface`) or a recording implementation in host tests.
//! The core queries and resizes the surface but does not own its creation.

use crate::layout::Rect;

/// Immediate-mode drawing surface: size/DPR queries, a save/restore/clip
/// stack, and fill/stroke/text/image primitives.
pub trait DrawSurface {
    /// Logical (CSS pixel) width of the backing surface.
    fn width(&self) -> f64;

    /// Logical height of the backing surface.
    fn height(&self) -> f64;

    fn device_pixel_ratio(&self) -> f64;

    /// Resize the backing store to a logical size, scaling for device pixels.
    fn resize(&mut self, width: f64, height: f64);

    fn save(&mut self);

    fn restore(&mut self);

    /// Clip subsequent drawing to `rect` until the matching `restore`.
    fn clip_rect(&mut self, rect: Rect);

    fn clear_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: &str);

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64);

    fn stroke_rect_dashed(
        &mut self,
        rect: Rect,
        color: &str,
        line_width: f64,
        dash: &[f64],
        dash_offset: f64,
    );

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str);

    /// Draw `text` with its vertical center on `y` (middle baseline).
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);

    /// Draw the image addressed by `src` into `rect`. Implementations may
    /// load lazily and paint on a later frame.
    fn draw_image(&mut self, src: &str, rect: Rect);

    /// Escape hatch for custom renderers adapted from JS, which draw on the
    /// raw 2D context directly.
    #[cfg(target_arch = "wasm32")]
    fn canvas_context(&self) -> Option<&web_sys::CanvasRenderingContext2d> {
        None
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Clip(Rect),
    Clear(Rect),
    FillRect {
        rect: Rect,
        color: String,
    },
    StrokeRect {
        rect: Rect,
        color: String,
        width: f64,
    },
    StrokeRectDashed {
        rect: Rect,
        color: String,
        width: f64,
        dash: Vec<f64>,
        offset: f64,
    },
    FillCircle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: String,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        font: String,
        color: String,
    },
    DrawImage {
        src: String,
        rect: Rect,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

/// Surface that records operations instead of drawing, for host tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    dpr: f64,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            dpr: 1.0,
            ops: Vec::new(),
        }
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Rectangles of every `FillRect` op, in order.
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.ops.push(DrawOp::Resize { width, height });
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clip(rect));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ops.push(DrawOp::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color: color.to_string(),
            width: line_width,
        });
    }

    fn stroke_rect_dashed(
        &mut self,
        rect: Rect,
        color: &str,
        line_width: f64,
        dash: &[f64],
        dash_offset: f64,
    ) {
        self.ops.push(DrawOp::StrokeRectDashed {
            rect,
            color: color.to_string(),
            width: line_width,
            dash: dash.to_vec(),
            offset: dash_offset,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ops.push(DrawOp::FillCircle {
            cx,
            cy,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
            color: color.to_string(),
        });
    }

    fn draw_image(&mut self, src: &str, rect: Rect) {
        self.ops.push(DrawOp::DrawImage {
            src: src.to_string(),
            rect,
        });
    }
}
