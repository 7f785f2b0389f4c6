//! Canvas 2D implementation of the drawing surface, via web-sys.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::error::{GridError, Result};
use crate::layout::Rect;

use super::surface::DrawSurface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
    /// Images by source URL; a miss inserts a loading element that paints on
    /// a later frame.
    image_cache: HashMap<String, HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| GridError::Surface("failed to get 2d context".into()))?
            .ok_or_else(|| GridError::Surface("no 2d context available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GridError::Surface("failed to cast to CanvasRenderingContext2d".into()))?;

        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        let width = f64::from(canvas.width()) / dpr;
        let height = f64::from(canvas.height()) / dpr;

        let surface = Self {
            canvas,
            ctx,
            width,
            height,
            dpr,
            image_cache: HashMap::new(),
        };
        surface.apply_scale();
        Ok(surface)
    }

    /// Crisp pixel position for 1px strokes.
    fn crisp(v: f64) -> f64 {
        v.floor() + 0.5
    }

    fn apply_scale(&self) {
        let _ = self.ctx.scale(self.dpr, self.dpr);
    }

    fn set_dash(&self, dash: &[f64], offset: f64) {
        let segments = js_sys::Array::new();
        for seg in dash {
            segments.push(&wasm_bindgen::JsValue::from_f64(*seg));
        }
        let _ = self.ctx.set_line_dash(&segments);
        self.ctx.set_line_dash_offset(offset);
    }

    fn clear_dash(&self) {
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
        self.ctx.set_line_dash_offset(0.0);
    }

    fn image_for(&mut self, src: &str) -> Option<HtmlImageElement> {
        if let Some(img) = self.image_cache.get(src) {
            return Some(img.clone());
        }
        let document = web_sys::window()?.document()?;
        let img = document
            .create_element("img")
            .ok()?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        img.set_src(src);
        self.image_cache.insert(src.to_string(), img.clone());
        Some(img)
    }
}

impl DrawSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.canvas
            .set_width((width * self.dpr).round().max(1.0) as u32);
        self.canvas
            .set_height((height * self.dpr).round().max(1.0) as u32);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        // Setting the backing size resets the context transform.
        self.apply_scale();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(rect.x, rect.y, rect.w, rect.h);
        self.ctx.clip();
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        if (line_width - 1.0).abs() < f64::EPSILON {
            self.ctx
                .stroke_rect(Self::crisp(rect.x), Self::crisp(rect.y), rect.w, rect.h);
        } else {
            self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
        }
    }

    fn stroke_rect_dashed(
        &mut self,
        rect: Rect,
        color: &str,
        line_width: f64,
        dash: &[f64],
        dash_offset: f64,
    ) {
        self.set_dash(dash, dash_offset);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
        self.clear_dash();
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(cx, cy, radius, 0.0, std::f64::consts::TAU);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, x, y);
    }

    fn draw_image(&mut self, src: &str, rect: Rect) {
        if let Some(img) = self.image_for(src) {
            let _ = self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    &img, rect.x, rect.y, rect.w, rect.h,
                );
        }
    }

    fn canvas_context(&self) -> Option<&CanvasRenderingContext2d> {
        Some(&self.ctx)
    }
}
