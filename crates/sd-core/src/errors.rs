//! Cross-cutting error types for sprintdesk.
//!
//! Transport, auth, and store errors are defined in their respective crates.
//! A unified error is deferred to `sd-cli` where all crate errors converge.

use thiserror::Error;

/// Errors that can be raised by any sprintdesk crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
