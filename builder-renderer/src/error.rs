//! Renderer error types.
//!
//! Rendering an element never fails; errors come from reading stored
//! documents or writing the output.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while producing markup.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Stored page content could not be parsed.
    #[error("Invalid page content: {0}")]
    Content(#[from] builder_core::BuilderError),

    /// Writing the output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
