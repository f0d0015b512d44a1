//! Recipe error types.

use recetario_shared::types::RecipeId;
use thiserror::Error;

use super::validation::RecipeValidationError;
use crate::media::MediaError;
use crate::storage::StorageError;

/// Recipe operation errors.
///
/// `Display` is the message surfaced to the caller.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// A required field is missing or empty.
    #[error("validation failed: {0}")]
    Validation(#[from] RecipeValidationError),

    /// No such recipe, or not owned by the caller.
    #[error("recipe not found: {0}")]
    NotFound(RecipeId),

    /// Reading the local image failed.
    #[error("image could not be read: {0}")]
    Media(#[from] MediaError),

    /// Uploading the image failed.
    #[error("image upload failed: {0}")]
    Storage(#[from] StorageError),

    /// The structured store could not be reached or rejected the request.
    #[error("recipe store error: {0}")]
    Transport(String),
}

impl RecipeError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: RecipeId) -> Self {
        Self::NotFound(id)
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
