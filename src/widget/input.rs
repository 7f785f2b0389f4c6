//! DOM input overlay for in-place cell editing.
//!
//! A single `<input>` element positioned over the editing cell, mirrored
//! from the core's `EditBox` state on every sync.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use crate::interaction::EditBox;

pub(crate) struct EditOverlay {
    input: Option<HtmlInputElement>,
}

impl EditOverlay {
    pub(crate) fn new() -> Self {
        EditOverlay { input: None }
    }

    /// Mirror the edit box state onto the DOM element.
    pub(crate) fn sync(&mut self, edit_box: &EditBox, focus: bool, container: Option<&HtmlElement>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if edit_box.disabled {
            self.hide();
            return;
        }
        let Some(input) = self.get_or_create_input(&document, container) else {
            return;
        };
        let style = input.style();
        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{}px", edit_box.left));
        let _ = style.set_property("top", &format!("{}px", edit_box.top));
        let _ = style.set_property("width", &format!("{}px", edit_box.width));
        let _ = style.set_property("height", &format!("{}px", edit_box.height));
        if input.value() != edit_box.value {
            input.set_value(&edit_box.value);
        }
        if focus {
            let _ = input.focus();
        }
    }

    pub(crate) fn hide(&mut self) {
        if let Some(ref input) = self.input {
            let _ = input.style().set_property("display", "none");
            let _ = input.blur();
        }
    }

    /// Current DOM value, for mirroring back into the core before key
    /// handling.
    pub(crate) fn value(&self) -> Option<String> {
        self.input.as_ref().map(|i| i.value())
    }

    /// The underlying element, for wiring the `input` event.
    pub(crate) fn element(&self) -> Option<&HtmlInputElement> {
        self.input.as_ref()
    }

    fn get_or_create_input(
        &mut self,
        document: &Document,
        container: Option<&HtmlElement>,
    ) -> Option<&HtmlInputElement> {
        if self.input.is_none() {
            let input = document
                .create_element("input")
                .ok()?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            input.set_type("text");
            let style = input.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("z-index", "1000");
            let _ = style.set_property("box-sizing", "border-box");
            let _ = style.set_property("border", "2px solid #4285f4");
            let _ = style.set_property("outline", "none");
            let _ = style.set_property("padding", "0 4px");
            let _ = style.set_property("font-family", "inherit");
            let _ = style.set_property("font-size", "13px");
            let _ = style.set_property("background", "#fff");
            let _ = style.set_property("display", "none");

            if let Some(c) = container {
                let _ = c.append_child(&input);
            } else if let Some(body) = document.body() {
                let _ = body.append_child(&input);
            }
            self.input = Some(input);
        }
        self.input.as_ref()
    }
}

impl Drop for EditOverlay {
    fn drop(&mut self) {
        if let Some(ref input) = self.input {
            if let Some(parent) = input.parent_node() {
                let _ = parent.remove_child(input);
            }
        }
    }
}
