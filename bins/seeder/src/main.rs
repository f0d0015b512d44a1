//! Database seeder for Recetario development and testing.
//!
//! Seeds a handful of photo-less recipes owned by a fixed test user so the
//! list and ingredient search have something to show.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use recetario_core::media::FsMediaReader;
use recetario_core::observability::NoopObserver;
use recetario_core::recipe::{CreateRecipeInput, RecipeRepository};
use recetario_core::storage::{OpendalObjectStore, StorageConfig, StorageProvider};
use recetario_db::SeaOrmRecipeStore;
use recetario_shared::types::UserId;
use uuid::Uuid;

/// Test user ID (consistent for all seeds)
const TEST_OWNER_ID: &str = "00000000-0000-0000-0000-000000000002";

/// Title, description, ingredients.
const SAMPLES: &[(&str, &str, &[&str])] = &[
    (
        "Tortilla de patatas",
        "Huevos y patatas pochadas, cuajada por ambos lados.",
        &["patata", "huevo", "cebolla", "aceite de oliva", "sal"],
    ),
    (
        "Gazpacho",
        "Sopa fría de tomate triturada con pan y aceite.",
        &["tomate", "pepino", "pimiento", "ajo", "pan", "aceite de oliva"],
    ),
    (
        "Pisto manchego",
        "Verduras de huerta sofritas a fuego lento.",
        &["tomate", "calabacín", "pimiento", "cebolla", "huevo"],
    ),
    (
        "Arroz con leche",
        "Arroz cocido en leche con canela y limón.",
        &["arroz", "leche", "azúcar", "canela", "limón"],
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = recetario_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    // Seeds carry no photos, so object storage never gets touched.
    let objects = OpendalObjectStore::from_config(StorageConfig::new(
        StorageProvider::memory(),
        "http://localhost/recetas-fotos",
    ))?;
    let repository = RecipeRepository::new(
        Arc::new(SeaOrmRecipeStore::new(db)),
        Arc::new(objects),
        Arc::new(FsMediaReader),
    )
    .with_observer(Arc::new(NoopObserver));

    let owner = UserId::from_uuid(Uuid::parse_str(TEST_OWNER_ID)?);

    println!("Seeding recipes...");
    for (title, description, ingredients) in SAMPLES {
        let recipe = repository
            .create(CreateRecipeInput {
                title: (*title).to_string(),
                description: (*description).to_string(),
                ingredients: ingredients.iter().map(ToString::to_string).collect(),
                owner_id: owner,
                image: None,
            })
            .await
            .with_context(|| format!("Failed to seed {title}"))?;
        println!("  {} {}", recipe.id, recipe.title);
    }

    println!("Seeding complete!");
    Ok(())
}
