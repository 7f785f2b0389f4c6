//! Cell, column, and row styling.

use serde::{Deserialize, Serialize};

/// Background for ordinary cells.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
/// Background for reference (header-like) cells.
pub const REFERENCE_BACKGROUND: &str = "#F3F3F3";
/// Background for highlighted cells.
pub const HIGHLIGHT_BACKGROUND: &str = "#E8F0FE";
/// Background for the focused cell.
pub const FOCUS_BACKGROUND: &str = "#CFD8E8";
/// Grid line color between cells.
pub const GRID_BORDER_COLOR: &str = "#E2E2E2";
/// Default text color.
pub const DEFAULT_FOREGROUND: &str = "#202124";
/// Default cell font.
pub const DEFAULT_FONT: &str = "13px sans-serif";
/// Default horizontal text padding inside a cell.
pub const DEFAULT_CELL_PADDING: f64 = 4.0;

/// Default column width in logical pixels.
pub const DEFAULT_COL_WIDTH: f64 = 80.0;
/// Default row height in logical pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 24.0;

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual styling carried by a cell.
///
/// `background` is the cell's own declared color; the painted color is
/// derived from the highlight/focus/reference flags with this as the
/// fallback (see [`crate::types::Cell::refresh_background`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyles {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub font: Option<String>,
    pub border: Option<String>,
    pub padding: Option<f64>,
    pub align: Option<TextAlign>,
}

/// Per-column geometry and default styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStyle {
    pub width: f64,
    #[serde(default)]
    pub styles: Option<CellStyles>,
}

impl ColumnStyle {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            styles: None,
        }
    }
}

impl Default for ColumnStyle {
    fn default() -> Self {
        Self::new(DEFAULT_COL_WIDTH)
    }
}

/// Per-row geometry and default styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowStyle {
    pub height: f64,
    #[serde(default)]
    pub styles: Option<CellStyles>,
}

impl RowStyle {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            styles: None,
        }
    }
}

impl Default for RowStyle {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_HEIGHT)
    }
}
