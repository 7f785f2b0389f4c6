//! Rendering: scheduling, the painter, the animation driver, and the
//! drawing-surface implementations.

pub mod ants;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod painter;
pub mod scheduler;
pub mod surface;

pub use ants::AntsDriver;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use painter::paint_frame;
pub use scheduler::{RenderAction, RenderScheduler};
pub use surface::{DrawOp, DrawSurface, RecordingSurface};
