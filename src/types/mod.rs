//! Core data model shared by the store, router, and painter.

pub mod cell;
pub mod range;
pub mod renderer;
pub mod sheet;
pub mod style;

pub use cell::{Cell, CellValue, DataType};
pub use range::{CellRef, Range};
pub use renderer::{CellRenderContext, CellRenderer, HitArea, HitCallback};
pub use sheet::Sheet;
pub use style::{CellStyles, ColumnStyle, RowStyle, TextAlign};
