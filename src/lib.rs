//! cellgrid - embeddable grid widget for the web
//!
//! Renders a two-dimensional cell matrix onto a Canvas 2D surface via
//! WebAssembly and drives all pointer/keyboard interaction for it:
//! - Selection, in-place editing, column/row resizing
//! - Copy/paste with broadcast-fill tiling, drag-to-fill
//! - Marching-ants copy highlight on an independent animation loop
//! - Dirty-flag render scheduling with a soft 60 fps ceiling
//! - Pluggable per-cell custom renderers (buttons, images)
//!
//! The engine core (layout, store, interaction state machine, event
//! router, painter, clipboard codec) is target-independent and fully
//! testable off-wasm; only the widget shell binds to the DOM.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridWidget } from 'cellgrid';
//! await init();
//! const grid = new GridWidget(canvas, devicePixelRatio);
//! grid.setSheet(sheet);
//! grid.bindScrollContainer(container);
//! ```

pub mod clipboard;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod renderers;
pub mod store;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod widget;

use wasm_bindgen::prelude::*;

pub use error::{GridError, Result};
pub use grid::{ClipboardRequest, GridState, KeyInput, KeyOutcome, PointerInput};
pub use layout::Rect;
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use widget::GridWidget;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
