//! Error types for builder operations.
//!
//! Canvas mutations on unknown ids or invalid indices are no-ops and never
//! surface here; these errors cover catalog construction and documents.

use thiserror::Error;

/// Result type for builder operations.
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Errors that can occur in builder operations.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// Two widget definitions share the same id.
    #[error("Duplicate widget id in catalog: {0}")]
    DuplicateWidget(String),

    /// A widget definition whose `type` differs from its `id`.
    #[error("Widget {id} declares mismatched type {widget_type}")]
    WidgetTypeMismatch {
        /// The widget id.
        id: String,
        /// The declared type.
        widget_type: String,
    },

    /// Page document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A command that cannot be decoded or applied.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
