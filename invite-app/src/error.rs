//! Host error types.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while binding the editor to the page.
#[derive(Debug, Error)]
pub enum HostError {
    /// No browser window or document.
    #[error("No browser document available")]
    NoDocument,

    /// A required element is missing from the page.
    #[error("Missing page element: {0}")]
    MissingElement(String),

    /// An element exists but has the wrong type.
    #[error("Element {0} is not a {1}")]
    WrongElement(String, &'static str),

    /// An overlay id attribute did not parse.
    #[error("Invalid overlay id: {0}")]
    BadOverlayId(#[from] uuid::Error),

    /// The editor rejected an operation.
    #[error("Editor error: {0}")]
    Editor(#[from] invite_core::EditorError),

    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
