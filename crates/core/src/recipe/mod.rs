//! Recipe persistence with image ingestion.
//!
//! `RecipeRepository` is the only entry point the UI talks to. Writes that
//! carry a local image run encode → upload → persist strictly in sequence;
//! a failure before persist leaves the structured store untouched.

pub mod error;
pub mod service;
pub mod types;
pub mod validation;


pub use error::RecipeError;
pub use service::{RecipeRepository, RecipeStore};
pub use types::{CreateRecipeInput, NewRecipe, Recipe, RecipeChanges};
pub use validation::{RecipeValidationError, normalize_ingredient, validate_changes};
