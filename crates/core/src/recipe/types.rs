//! Recipe types and data structures.

use chrono::{DateTime, Utc};
use recetario_shared::types::{RecipeId, UserId};
use serde::Serialize;

use crate::media::LocalHandle;

/// Persisted recipe record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    /// Server-assigned identifier.
    pub id: RecipeId,
    /// Recipe title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Lower-cased ingredients in author order, never empty.
    pub ingredients: Vec<String>,
    /// User who created the recipe.
    pub owner_id: UserId,
    /// Public URL of the recipe photo.
    pub image_url: Option<String>,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a recipe.
#[derive(Debug, Clone)]
pub struct CreateRecipeInput {
    /// Recipe title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Ingredients in author order.
    pub ingredients: Vec<String>,
    /// Creating user.
    pub owner_id: UserId,
    /// Local photo to upload first.
    pub image: Option<LocalHandle>,
}

/// The three fields an update may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeChanges {
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
    /// New ingredients.
    pub ingredients: Vec<String>,
}

impl RecipeChanges {
    /// Build a change set.
    #[must_use]
    pub fn new<I, T>(title: impl Into<String>, description: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            title: title.into(),
            description: description.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Validated row handed to the structured store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    /// Recipe title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Normalized ingredients.
    pub ingredients: Vec<String>,
    /// Creating user.
    pub owner_id: UserId,
    /// Locator of an already uploaded photo.
    pub image_url: Option<String>,
}
