//! Structured error types for cellgrid.
//!
//! Nothing in the interaction core is fatal: out-of-bounds input and
//! malformed clipboard payloads are absorbed silently. These types cover the
//! real interface failures: surface acquisition, sheet validation, and the
//! serde boundary.

/// All errors that can occur in cellgrid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Drawing surface could not be acquired or resized.
    #[error("Surface error: {0}")]
    Surface(String),

    /// A sheet violated the matrix invariant (ragged rows, size mismatch).
    #[error("Invalid sheet: {0}")]
    InvalidSheet(String),

    /// Clipboard read/write failed on the host.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Data crossing the JS boundary could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serde(String),

    /// Catch-all for host-side failures.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
