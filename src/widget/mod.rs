//! The wasm-exported widget: canvas wiring, frame loops, and the host
//! clipboard boundary around the target-independent engine core.

mod events;
mod input;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::grid::{ClipboardRequest, GridState};
use crate::render::canvas::CanvasSurface;
use crate::render::painter::paint_frame;
use crate::render::scheduler::RenderAction;
use crate::render::surface::DrawSurface;
use crate::types::{Range, Sheet};

use input::EditOverlay;

/// Timing source: `performance.now()` with a `Date.now()` fallback.
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// The two frame-loop callbacks and their in-flight handles.
#[derive(Default)]
pub(crate) struct FrameLoops {
    pub(crate) ants_closure: Option<Closure<dyn FnMut()>>,
    pub(crate) render_closure: Option<Closure<dyn FnMut()>>,
    pub(crate) ants_raf: Option<i32>,
    pub(crate) render_raf: Option<i32>,
}

/// State shared between the widget and its event/frame closures.
pub(crate) struct WidgetShared {
    pub(crate) state: RefCell<GridState>,
    pub(crate) surface: RefCell<CanvasSurface>,
    pub(crate) overlay: RefCell<EditOverlay>,
    pub(crate) loops: RefCell<FrameLoops>,
    pub(crate) renderer_click: RefCell<Option<Function>>,
    pub(crate) change_callback: Rc<RefCell<Option<Function>>>,
    pub(crate) canvas: HtmlCanvasElement,
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Option<i32> {
    web_sys::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

fn cancel_frame(handle: i32) {
    if let Some(window) = web_sys::window() {
        let _ = window.cancel_animation_frame(handle);
    }
}

/// Draw immediately if anything is owed; clears the pending slot either way.
pub(crate) fn render_now(shared: &Rc<WidgetShared>) {
    let mut state = shared.state.borrow_mut();
    let ants_active = state.interaction.ants_visible;
    if !state.scheduler.should_paint(ants_active) {
        state.scheduler.skip_frame();
        return;
    }
    let mut surface = shared.surface.borrow_mut();
    paint_frame(&mut state, &mut *surface);
    state.scheduler.frame_done(now_ms());
}

/// Service outstanding redraw requests: draw synchronously when the frame
/// budget allows, otherwise defer to one animation-frame callback.
pub(crate) fn flush(shared: &Rc<WidgetShared>) {
    let action = {
        let mut state = shared.state.borrow_mut();
        let ants_active = state.interaction.ants_visible;
        if !state.scheduler.should_paint(ants_active) {
            return;
        }
        state.scheduler.schedule(now_ms())
    };
    match action {
        RenderAction::Draw => render_now(shared),
        RenderAction::Defer => {
            let mut loops = shared.loops.borrow_mut();
            if loops.render_raf.is_none() {
                if let Some(cb) = loops.render_closure.as_ref() {
                    loops.render_raf = request_frame(cb);
                }
            }
        }
        RenderAction::AlreadyPending => {}
    }
}

/// Mirror the core's edit box onto the DOM overlay.
pub(crate) fn sync_overlay(shared: &Rc<WidgetShared>) {
    let (edit_box, focus) = {
        let mut state = shared.state.borrow_mut();
        let focus = std::mem::take(&mut state.interaction.edit_focus_requested);
        (state.interaction.edit_box.clone(), focus)
    };
    let container = shared
        .canvas
        .parent_element()
        .and_then(|p| p.dyn_into::<HtmlElement>().ok());
    shared
        .overlay
        .borrow_mut()
        .sync(&edit_box, focus, container.as_ref());
}

pub(crate) fn handle_clipboard_request(shared: &Rc<WidgetShared>, request: ClipboardRequest) {
    match request {
        ClipboardRequest::Copy { text, range } => spawn_copy(shared, text, range),
        ClipboardRequest::Paste => spawn_paste(shared),
    }
}

fn spawn_copy(shared: &Rc<WidgetShared>, text: String, range: Range) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);
    let weak = Rc::downgrade(shared);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => {
                if let Some(shared) = weak.upgrade() {
                    shared.state.borrow_mut().copy_succeeded(range);
                    flush(&shared);
                }
            }
            Err(_) => {
                web_sys::console::warn_1(&JsValue::from_str("cellgrid: clipboard write failed"));
            }
        }
    });
}

fn spawn_paste(shared: &Rc<WidgetShared>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().read_text();
    let weak = Rc::downgrade(shared);
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(value) => {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let text = value.as_string().unwrap_or_default();
                shared.state.borrow_mut().apply_paste(&text);
                flush(&shared);
            }
            Err(_) => {
                web_sys::console::warn_1(&JsValue::from_str("cellgrid: clipboard read failed"));
            }
        }
    });
}

/// Start the marching-ants loop; a no-op when already running.
fn start_ants_loop(shared: &Rc<WidgetShared>) {
    {
        let mut state = shared.state.borrow_mut();
        if !state.ants.start() {
            return;
        }
    }
    let weak: Weak<WidgetShared> = Rc::downgrade(shared);
    let closure = Closure::wrap(Box::new(move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let running = {
            let mut state = shared.state.borrow_mut();
            if state.ants.is_running() {
                let visible = state.interaction.ants_visible;
                if state.ants.tick(now_ms(), visible) {
                    state.scheduler.mark_dirty();
                }
                true
            } else {
                false
            }
        };
        if !running {
            shared.loops.borrow_mut().ants_raf = None;
            return;
        }
        flush(&shared);
        let mut loops = shared.loops.borrow_mut();
        if let Some(cb) = loops.ants_closure.as_ref() {
            loops.ants_raf = request_frame(cb);
        }
    }) as Box<dyn FnMut()>);

    let mut loops = shared.loops.borrow_mut();
    loops.ants_closure = Some(closure);
    if let Some(cb) = loops.ants_closure.as_ref() {
        loops.ants_raf = request_frame(cb);
    }
}

/// Embeddable grid widget over a canvas element.
#[wasm_bindgen]
pub struct GridWidget {
    shared: Rc<WidgetShared>,
    listeners: events::Listeners,
}

#[wasm_bindgen]
impl GridWidget {
    /// Create a widget over `canvas`. Event handlers for selection,
    /// editing, resize, drag-fill, and copy/paste are wired automatically.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f64) -> Result<GridWidget, JsValue> {
        console_error_panic_hook::set_once();

        let surface = CanvasSurface::new(canvas.clone(), dpr)?;
        let mut state = GridState::new();
        state.viewport_width = surface.width();
        state.viewport_height = surface.height();

        let change_callback: Rc<RefCell<Option<Function>>> = Rc::new(RefCell::new(None));
        let notify = Rc::clone(&change_callback);
        state.store.subscribe(Rc::new(move |sheet: &Sheet| {
            if let Some(cb) = notify.borrow().as_ref() {
                if let Ok(value) = serde_wasm_bindgen::to_value(sheet) {
                    let _ = cb.call1(&JsValue::NULL, &value);
                }
            }
        }));

        let shared = Rc::new(WidgetShared {
            state: RefCell::new(state),
            surface: RefCell::new(surface),
            overlay: RefCell::new(EditOverlay::new()),
            loops: RefCell::new(FrameLoops::default()),
            renderer_click: RefCell::new(None),
            change_callback,
            canvas,
        });

        events::install_render_closure(&shared);
        let listeners = events::wire_listeners(&shared);

        Ok(GridWidget { shared, listeners })
    }

    /// Attach a sheet value: stamps every cell with its position, sizes the
    /// canvas to the content extent, and requests the initial redraw.
    #[wasm_bindgen(js_name = "setSheet")]
    pub fn set_sheet(&mut self, data: JsValue) -> Result<(), JsValue> {
        let sheet: Sheet =
            serde_wasm_bindgen::from_value(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let (content_w, content_h) = {
            let mut state = self.shared.state.borrow_mut();
            state.attach(sheet)?;
            state.content_size()
        };
        self.shared.surface.borrow_mut().resize(content_w, content_h);
        {
            let mut state = self.shared.state.borrow_mut();
            if state.viewport_width <= 0.0 || state.viewport_height <= 0.0 {
                state.viewport_width = content_w;
                state.viewport_height = content_h;
            }
        }
        sync_overlay(&self.shared);
        start_ants_loop(&self.shared);
        flush(&self.shared);
        Ok(())
    }

    /// Host scroll offset, in logical pixels.
    #[wasm_bindgen(js_name = "setScroll")]
    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.shared.state.borrow_mut().set_scroll(x, y);
        sync_overlay(&self.shared);
        flush(&self.shared);
    }

    /// Visible viewport size, in logical pixels.
    #[wasm_bindgen(js_name = "setViewport")]
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.shared.state.borrow_mut().set_viewport(width, height);
        flush(&self.shared);
    }

    /// Follow a scroll container: its scroll offset and client size feed
    /// the viewport clip.
    #[wasm_bindgen(js_name = "bindScrollContainer")]
    pub fn bind_scroll_container(&mut self, element: HtmlElement) {
        events::wire_scroll_container(&self.shared, &mut self.listeners, element);
        flush(&self.shared);
    }

    /// Force a redraw.
    pub fn render(&mut self) {
        self.shared.state.borrow_mut().request_redraw();
        render_now(&self.shared);
    }

    /// Pop one undo snapshot.
    pub fn undo(&mut self) {
        self.shared.state.borrow_mut().undo();
        flush(&self.shared);
    }

    /// Copy the current selection to the host clipboard.
    pub fn copy(&mut self) {
        let request = self.shared.state.borrow().copy_request();
        if let Some(request) = request {
            handle_clipboard_request(&self.shared, request);
        }
    }

    /// Paste the host clipboard at the current selection.
    pub fn paste(&mut self) {
        handle_clipboard_request(&self.shared, ClipboardRequest::Paste);
    }

    /// Callback invoked with the mutated sheet after every data mutation.
    #[wasm_bindgen(js_name = "setChangeCallback")]
    pub fn set_change_callback(&mut self, callback: Option<Function>) {
        *self.shared.change_callback.borrow_mut() = callback;
    }

    /// Callback invoked with a hit-area id when a custom-rendered cell's
    /// hit area is clicked.
    #[wasm_bindgen(js_name = "setRendererClickCallback")]
    pub fn set_renderer_click_callback(&mut self, callback: Option<Function>) {
        *self.shared.renderer_click.borrow_mut() = callback;
    }

    /// Install a JS custom renderer for one cell. The function receives a
    /// context object and the raw 2D context, and may return a hit-area
    /// descriptor (`{id, x, y, width, height}`).
    #[wasm_bindgen(js_name = "setCellRenderer")]
    pub fn set_cell_renderer(&mut self, row: usize, col: usize, renderer: Option<Function>) {
        events::install_js_renderer(&self.shared, row, col, renderer);
        flush(&self.shared);
    }

    /// Current selection as `[startRow, startCol, endRow, endCol]`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn selection(&self) -> Option<Vec<u32>> {
        let state = self.shared.state.borrow();
        state.interaction.selection.map(|r| {
            vec![
                r.start.row as u32,
                r.start.col as u32,
                r.end.row as u32,
                r.end.col as u32,
            ]
        })
    }

    /// Display text of one cell.
    #[wasm_bindgen(js_name = "cellText")]
    pub fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        let state = self.shared.state.borrow();
        state
            .store
            .sheet()
            .cell(crate::types::CellRef::new(row, col))
            .map(|c| c.display().into_owned())
    }

    /// Stop both frame loops and detach global listeners. Idempotent.
    pub fn teardown(&mut self) {
        {
            let mut state = self.shared.state.borrow_mut();
            state.ants.stop();
        }
        {
            let mut loops = self.shared.loops.borrow_mut();
            if let Some(handle) = loops.ants_raf.take() {
                cancel_frame(handle);
            }
            if let Some(handle) = loops.render_raf.take() {
                cancel_frame(handle);
            }
        }
        self.listeners.detach();
        self.shared.overlay.borrow_mut().hide();
    }
}

impl Drop for GridWidget {
    fn drop(&mut self) {
        self.teardown();
    }
}
