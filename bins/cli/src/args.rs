//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use recetario_shared::types::{RecipeId, UserId};

/// Manage recipes and their photos.
#[derive(Debug, Parser)]
#[command(name = "recetario", about = "Manage recipes and their photos", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every recipe, newest first.
    List,
    /// Find recipes that use an ingredient.
    Search {
        /// Whole ingredient name, any case.
        ingredient: String,
    },
    /// Show a single recipe.
    Show {
        /// Recipe ID.
        id: RecipeId,
    },
    /// Create a recipe, optionally with a photo.
    Create(CreateArgs),
    /// Replace title, description and ingredients of a recipe.
    Update(UpdateArgs),
    /// Upload a new photo for a recipe.
    SetImage {
        /// Recipe ID.
        id: RecipeId,
        /// Photo on the local filesystem.
        #[arg(value_name = "path")]
        image: PathBuf,
        /// Only change the photo if this user owns the recipe.
        #[arg(long, env = "RECETARIO_OWNER")]
        owner: Option<UserId>,
    },
    /// Delete a recipe. Its photo stays in the bucket.
    Delete {
        /// Recipe ID.
        id: RecipeId,
        /// Only delete if this user owns the recipe.
        #[arg(long, env = "RECETARIO_OWNER")]
        owner: Option<UserId>,
    },
}

/// Fields shared by `create` and `update`.
#[derive(Debug, Args)]
pub struct RecipeFields {
    /// Recipe title.
    #[arg(long)]
    pub title: String,
    /// Recipe description.
    #[arg(long)]
    pub description: String,
    /// An ingredient; repeat for more, order is kept.
    #[arg(long = "ingredient", short = 'i', value_name = "name", required = true)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: RecipeFields,
    /// User creating the recipe.
    #[arg(long, env = "RECETARIO_OWNER")]
    pub owner: UserId,
    /// Photo on the local filesystem.
    #[arg(long, value_name = "path")]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Recipe ID.
    pub id: RecipeId,
    #[command(flatten)]
    pub fields: RecipeFields,
    /// Only update if this user owns the recipe.
    #[arg(long, env = "RECETARIO_OWNER")]
    pub owner: Option<UserId>,
}
