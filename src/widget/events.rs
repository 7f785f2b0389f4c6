//! DOM event wiring for `GridWidget`.
//!
//! Mouse events attach to the canvas; `mouseup` and `keydown` attach to the
//! document so a resize commits and accelerators fire even when the pointer
//! has left the widget. Every closure holds a weak reference to the shared
//! state so dropping the widget breaks the cycle.

use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

use crate::grid::{KeyInput, PointerInput};
use crate::layout::Rect;
use crate::render::surface::DrawSurface;
use crate::types::{CellRef, CellRenderContext, CellRenderer, HitArea};

use super::{flush, handle_clipboard_request, render_now, sync_overlay, WidgetShared};

/// Wired DOM listeners; detached on teardown.
pub(crate) struct Listeners {
    canvas: HtmlCanvasElement,
    canvas_closures: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
    doc_mouseup: Option<Closure<dyn FnMut(MouseEvent)>>,
    doc_keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    scroll: Option<(HtmlElement, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    /// Remove every listener; safe to call repeatedly.
    pub(crate) fn detach(&mut self) {
        for (name, closure) in self.canvas_closures.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(document) = document {
            if let Some(closure) = self.doc_mouseup.take() {
                let _ = document.remove_event_listener_with_callback(
                    "mouseup",
                    closure.as_ref().unchecked_ref(),
                );
            }
            if let Some(closure) = self.doc_keydown.take() {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
        if let Some((element, closure)) = self.scroll.take() {
            let _ = element
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
    }
}

fn pointer_input(canvas: &HtmlCanvasElement, event: &MouseEvent) -> PointerInput {
    let rect = canvas.get_bounding_client_rect();
    PointerInput {
        x: f64::from(event.client_x()) - rect.left(),
        y: f64::from(event.client_y()) - rect.top(),
        client_x: f64::from(event.client_x()),
        client_y: f64::from(event.client_y()),
        button: event.button(),
        buttons: event.buttons(),
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
    }
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
    let _ = canvas.style().set_property("cursor", cursor);
}

/// Build the deferred-frame callback, reused for every deferred redraw.
pub(crate) fn install_render_closure(shared: &Rc<WidgetShared>) {
    let weak = Rc::downgrade(shared);
    let closure = Closure::wrap(Box::new(move || {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        shared.loops.borrow_mut().render_raf = None;
        render_now(&shared);
    }) as Box<dyn FnMut()>);
    shared.loops.borrow_mut().render_closure = Some(closure);
}

pub(crate) fn wire_listeners(shared: &Rc<WidgetShared>) -> Listeners {
    let canvas = shared.canvas.clone();
    let mut canvas_closures: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)> = Vec::new();

    // Mouse down: drag-handle > custom hit-area > resize > selection.
    {
        let weak = Rc::downgrade(shared);
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let input = pointer_input(&shared.canvas, &event);
            let hit = shared.state.borrow_mut().pointer_down(&input);
            if let Some(area) = hit {
                dispatch_hit(&shared, &area);
            }
            sync_overlay(&shared);
            flush(&shared);
        }) as Box<dyn FnMut(MouseEvent)>);
        add_canvas_listener(&canvas, "mousedown", &closure);
        canvas_closures.push(("mousedown", closure));
    }

    // Mouse move: hover, drag, resize, selection extension, cursor.
    {
        let weak = Rc::downgrade(shared);
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let input = pointer_input(&shared.canvas, &event);
            let cursor = {
                let mut state = shared.state.borrow_mut();
                state.pointer_move(&input);
                state.interaction.cursor.as_css()
            };
            set_cursor(&shared.canvas, cursor);
            sync_overlay(&shared);
            flush(&shared);
        }) as Box<dyn FnMut(MouseEvent)>);
        add_canvas_listener(&canvas, "mousemove", &closure);
        canvas_closures.push(("mousemove", closure));
    }

    // Double click: auto-fill on the handle, otherwise start editing.
    {
        let weak = Rc::downgrade(shared);
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let input = pointer_input(&shared.canvas, &event);
            shared.state.borrow_mut().double_click(input.x, input.y);
            sync_overlay(&shared);
            flush(&shared);
        }) as Box<dyn FnMut(MouseEvent)>);
        add_canvas_listener(&canvas, "dblclick", &closure);
        canvas_closures.push(("dblclick", closure));
    }

    // Context menu: record position, let the host draw it.
    {
        let weak = Rc::downgrade(shared);
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            event.prevent_default();
            let input = pointer_input(&shared.canvas, &event);
            shared.state.borrow_mut().context_menu_open(input.x, input.y);
        }) as Box<dyn FnMut(MouseEvent)>);
        add_canvas_listener(&canvas, "contextmenu", &closure);
        canvas_closures.push(("contextmenu", closure));
    }

    // Mouse leave: drop hover affordances.
    {
        let weak = Rc::downgrade(shared);
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.state.borrow_mut().pointer_leave();
            set_cursor(&shared.canvas, "default");
            flush(&shared);
        }) as Box<dyn FnMut(MouseEvent)>);
        add_canvas_listener(&canvas, "mouseleave", &closure);
        canvas_closures.push(("mouseleave", closure));
    }

    let document = web_sys::window().and_then(|w| w.document());

    // Global mouse up: commits resizes wherever the pointer is.
    let doc_mouseup = document.as_ref().map(|document| {
        let weak = Rc::downgrade(shared);
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.state.borrow_mut().pointer_up();
            sync_overlay(&shared);
            flush(&shared);
        }) as Box<dyn FnMut(MouseEvent)>);
        let _ = document
            .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
        closure
    });

    // Global keyboard capture.
    let doc_keydown = document.as_ref().map(|document| {
        let weak = Rc::downgrade(shared);
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let outcome = {
                let mut state = shared.state.borrow_mut();
                // Mirror the live DOM value in before handling, so an Enter
                // commit sees what the user typed.
                if !state.interaction.edit_box.disabled {
                    if let Some(value) = shared.overlay.borrow().value() {
                        state.interaction.edit_box.value = value;
                    }
                }
                state.key_down(&KeyInput {
                    key: event.key(),
                    ctrl: event.ctrl_key(),
                    meta: event.meta_key(),
                    shift: event.shift_key(),
                    alt: event.alt_key(),
                })
            };
            if outcome.suppress {
                event.prevent_default();
            }
            sync_overlay(&shared);
            if let Some(request) = outcome.clipboard {
                handle_clipboard_request(&shared, request);
            }
            flush(&shared);
        }) as Box<dyn FnMut(KeyboardEvent)>);
        let _ = document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure
    });

    Listeners {
        canvas,
        canvas_closures,
        doc_mouseup,
        doc_keydown,
        scroll: None,
    }
}

fn add_canvas_listener(
    canvas: &HtmlCanvasElement,
    name: &str,
    closure: &Closure<dyn FnMut(MouseEvent)>,
) {
    let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
}

/// Follow a scroll container's offset and client size.
pub(crate) fn wire_scroll_container(
    shared: &Rc<WidgetShared>,
    listeners: &mut Listeners,
    element: HtmlElement,
) {
    if let Some((old_element, closure)) = listeners.scroll.take() {
        let _ = old_element
            .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }

    {
        let mut state = shared.state.borrow_mut();
        state.set_viewport(
            f64::from(element.client_width()),
            f64::from(element.client_height()),
        );
    }

    let weak = Rc::downgrade(shared);
    let target = element.clone();
    let closure = Closure::wrap(Box::new(move |_event: Event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        shared
            .state
            .borrow_mut()
            .set_scroll(scroll_left_f64(&target), scroll_top_f64(&target));
        sync_overlay(&shared);
        flush(&shared);
    }) as Box<dyn FnMut(Event)>);
    let _ = element.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    listeners.scroll = Some((element, closure));
}

fn scroll_left_f64(element: &HtmlElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(element.scroll_left()))
}

fn scroll_top_f64(element: &HtmlElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollTop"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(element.scroll_top()))
}

/// Invoke a hit area's own callback and the widget-level click callback.
fn dispatch_hit(shared: &Rc<WidgetShared>, area: &HitArea) {
    if let Some(cb) = &area.on_click {
        cb(&area.id);
    }
    if let Some(f) = shared.renderer_click.borrow().as_ref() {
        let _ = f.call1(&JsValue::NULL, &JsValue::from_str(&area.id));
    }
}

/// Adapt a JS renderer function into a [`CellRenderer`].
///
/// The function is called with `(context, ctx2d)` where `context` carries
/// value/geometry/state fields and `ctx2d` is the raw canvas context; a
/// returned `{id, x, y, width, height}` object registers a hit area.
pub(crate) fn install_js_renderer(
    shared: &Rc<WidgetShared>,
    row: usize,
    col: usize,
    renderer: Option<Function>,
) {
    let mut state = shared.state.borrow_mut();
    let Some(cell) = state.store.sheet_mut().cell_mut(CellRef::new(row, col)) else {
        return;
    };
    cell.renderer = renderer.map(|f| {
        CellRenderer::new(move |ctx, surface| {
            let Some(ctx2d) = surface.canvas_context() else {
                return None;
            };
            let obj = render_context_object(ctx);
            let ret = f
                .call2(&JsValue::NULL, &obj, &JsValue::from(ctx2d.clone()))
                .ok()?;
            hit_area_from_js(&ret)
        })
    });
    state.request_redraw();
}

fn render_context_object(ctx: &CellRenderContext<'_>) -> Object {
    let obj = Object::new();
    let set = |key: &str, value: &JsValue| {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    };
    set("row", &JsValue::from_f64(ctx.row as f64));
    set("col", &JsValue::from_f64(ctx.col as f64));
    set(
        "value",
        &serde_wasm_bindgen::to_value(ctx.value).unwrap_or(JsValue::NULL),
    );
    set("text", &JsValue::from_str(&ctx.text));
    set("x", &JsValue::from_f64(ctx.rect.x));
    set("y", &JsValue::from_f64(ctx.rect.y));
    set("width", &JsValue::from_f64(ctx.rect.w));
    set("height", &JsValue::from_f64(ctx.rect.h));
    set("selected", &JsValue::from_bool(ctx.selected));
    set("focused", &JsValue::from_bool(ctx.focused));
    set("hovered", &JsValue::from_bool(ctx.hovered));
    match ctx.hover {
        Some((hx, hy)) => {
            set("hoverX", &JsValue::from_f64(hx));
            set("hoverY", &JsValue::from_f64(hy));
        }
        None => {
            set("hoverX", &JsValue::NULL);
            set("hoverY", &JsValue::NULL);
        }
    }
    obj
}

fn hit_area_from_js(value: &JsValue) -> Option<HitArea> {
    if !value.is_object() {
        return None;
    }
    let get = |key: &str| Reflect::get(value, &JsValue::from_str(key)).ok();
    let id = get("id")?.as_string()?;
    let x = get("x")?.as_f64()?;
    let y = get("y")?.as_f64()?;
    let w = get("width")?.as_f64()?;
    let h = get("height")?.as_f64()?;
    Some(HitArea::new(id, Rect::new(x, y, w, h)))
}
