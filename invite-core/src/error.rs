//! Error types for editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Overlay not found in the registry.
    #[error("Overlay not found: {0}")]
    OverlayNotFound(String),

    /// Card index outside the configured slide range.
    #[error("Card index {index} out of range (card count {count})")]
    CardOutOfRange {
        /// Requested card index.
        index: usize,
        /// Number of cards in the editor.
        count: usize,
    },

    /// Configuration rejected during validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration or snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
