//! Cell values and the cell record itself.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::renderer::CellRenderer;
use super::style::{
    CellStyles, DEFAULT_BACKGROUND, FOCUS_BACKGROUND, HIGHLIGHT_BACKGROUND, REFERENCE_BACKGROUND,
};

/// A cell's raw value.
///
/// Untagged so the JS boundary sees plain `null | boolean | number | string`.
/// Dates travel as ISO text under [`DataType::Date`]; formula source text
/// travels under [`DataType::Formula`] (tag only; there is no evaluator).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Text representation used for painting and clipboard interchange.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Bool(true) => Cow::Borrowed("TRUE"),
            CellValue::Bool(false) => Cow::Borrowed("FALSE"),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Coerce user-entered text into a typed value.
    ///
    /// - "true"/"false" (case-insensitive) → Bool
    /// - parseable as f64 → Number
    /// - leading `=` → Text tagged as Formula (kept verbatim, not evaluated)
    /// - otherwise → Text
    pub fn coerce(input: &str) -> (CellValue, DataType) {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return (CellValue::Bool(true), DataType::Bool);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return (CellValue::Bool(false), DataType::Bool);
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            return (CellValue::Number(n), DataType::Number);
        }
        if trimmed.starts_with('=') {
            return (CellValue::Text(input.to_string()), DataType::Formula);
        }
        (CellValue::Text(input.to_string()), DataType::Text)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Declared type of a cell's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Text,
    Number,
    Bool,
    Date,
    Formula,
}

/// One cell of the matrix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cell {
    pub value: CellValue,
    pub datatype: DataType,
    pub formatter: Option<String>,
    pub styles: CellStyles,
    pub is_highlighted: bool,
    pub is_focused: bool,
    /// Header-like cell (row/column labels).
    pub is_reference: bool,
    /// Denormalized position, stamped once when the sheet is attached.
    pub row: usize,
    pub col: usize,
    pub metadata: Option<serde_json::Value>,
    /// Custom painter for this cell; never crosses the serde boundary.
    #[serde(skip)]
    pub renderer: Option<CellRenderer>,
    /// Derived paint color; refreshed on every value/flag mutation.
    #[serde(skip)]
    resolved_background: Option<String>,
}

impl Cell {
    pub fn text(value: &str) -> Self {
        Cell {
            value: CellValue::Text(value.to_string()),
            ..Cell::default()
        }
    }

    /// Replace the value, inferring the datatype from the variant and
    /// re-deriving the background from the current flags.
    pub fn set_value(&mut self, value: CellValue) {
        self.datatype = match &value {
            CellValue::Bool(_) => DataType::Bool,
            CellValue::Number(_) => DataType::Number,
            CellValue::Text(s) if s.starts_with('=') => DataType::Formula,
            _ => DataType::Text,
        };
        self.value = value;
        self.refresh_background();
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.is_focused = focused;
        self.refresh_background();
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.is_highlighted = highlighted;
        self.refresh_background();
    }

    /// Re-derive the painted background from the flags.
    ///
    /// Priority: focused > highlighted > reference > declared > default.
    /// Reads only the flags and the declared color, never the previously
    /// derived value, so repeated application is a fixed point.
    pub fn refresh_background(&mut self) {
        let derived = self.derive_background().to_string();
        self.resolved_background = Some(derived);
    }

    fn derive_background(&self) -> &str {
        if self.is_focused {
            FOCUS_BACKGROUND
        } else if self.is_highlighted {
            HIGHLIGHT_BACKGROUND
        } else if self.is_reference {
            REFERENCE_BACKGROUND
        } else {
            self.styles.background.as_deref().unwrap_or(DEFAULT_BACKGROUND)
        }
    }

    /// Background color the painter should use.
    pub fn background(&self) -> &str {
        match &self.resolved_background {
            Some(color) => color,
            None => self.derive_background(),
        }
    }

    /// Text representation of the current value.
    pub fn display(&self) -> Cow<'_, str> {
        self.value.display()
    }
}
