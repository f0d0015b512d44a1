//! Recetario command-line front end.
//!
//! Wires configuration, the PostgreSQL recipe store, object storage and the
//! local filesystem into a [`RecipeRepository`]. Recipes are printed to stdout
//! as JSON lines; logs go to stderr.

mod args;
mod platform;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recetario_core::media::{
    FsMediaReader, LocalHandle, MediaAcquirer, MediaSource, PickerOptions,
};
use recetario_core::observability::TracingObserver;
use recetario_core::recipe::{CreateRecipeInput, Recipe, RecipeChanges, RecipeRepository};
use recetario_core::storage::{OpendalObjectStore, StorageConfig};
use recetario_db::SeaOrmRecipeStore;
use recetario_shared::AppConfig;

use crate::args::{Cli, Command, RecipeFields};
use crate::platform::TerminalPlatform;

type Repository = RecipeRepository<SeaOrmRecipeStore, OpendalObjectStore, FsMediaReader>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recetario=info,recetario_core=info,recetario_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    let db = recetario_db::connect_with(&config.database)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    let objects = OpendalObjectStore::from_config(StorageConfig::from_settings(&config.storage)?)?;
    info!(
        provider = objects.provider_name(),
        location = objects.location(),
        "Object storage configured"
    );

    let repository = RecipeRepository::new(
        Arc::new(SeaOrmRecipeStore::new(db)),
        Arc::new(objects),
        Arc::new(FsMediaReader),
    );
    let picker = PickerOptions::from(&config.media);

    run(cli.command, &repository, picker).await
}

async fn run(command: Command, repository: &Repository, picker: PickerOptions) -> anyhow::Result<()> {
    match command {
        Command::List => print_all(&repository.try_list().await?),
        Command::Search { ingredient } => {
            print_all(&repository.try_find_by_ingredient(&ingredient).await?);
        }
        Command::Show { id } => print(&repository.get(id).await?),
        Command::Create(args) => {
            let image = match args.image {
                Some(path) => Some(pick(path, picker).await?),
                None => None,
            };
            let RecipeFields {
                title,
                description,
                ingredients,
            } = args.fields;

            let recipe = repository
                .create(CreateRecipeInput {
                    title,
                    description,
                    ingredients,
                    owner_id: args.owner,
                    image,
                })
                .await?;
            info!(recipe_id = %recipe.id, "Recipe created");
            print(&recipe);
        }
        Command::Update(args) => {
            let fields = args.fields;
            let changes = RecipeChanges::new(fields.title, fields.description, fields.ingredients);
            let recipe = match args.owner {
                Some(owner) => repository.update_as(owner, args.id, changes).await?,
                None => repository.update(args.id, changes).await?,
            };
            print(&recipe);
        }
        Command::SetImage { id, image, owner } => {
            let handle = pick(image, picker).await?;
            let recipe = match owner {
                Some(owner) => repository.replace_image_as(owner, id, &handle).await?,
                None => repository.replace_image(id, &handle).await?,
            };
            print(&recipe);
        }
        Command::Delete { id, owner } => {
            match owner {
                Some(owner) => repository.delete_as(owner, id).await?,
                None => repository.delete(id).await?,
            }
            info!(recipe_id = %id, "Recipe deleted");
        }
    }

    Ok(())
}

/// Run the library picker over the file given on the command line.
async fn pick(path: PathBuf, options: PickerOptions) -> anyhow::Result<LocalHandle> {
    let acquirer = MediaAcquirer::new(
        Arc::new(TerminalPlatform::new(Some(path))),
        options,
        Arc::new(TracingObserver),
    );
    let options = acquirer.options();
    debug!(
        quality = options.quality,
        aspect = ?options.aspect,
        allows_editing = options.allows_editing,
        "Opening picker"
    );

    match acquirer.try_acquire(MediaSource::Library).await? {
        Some(handle) => Ok(handle),
        None => bail!("no photo selected"),
    }
}

fn print(recipe: &Recipe) {
    match serde_json::to_string(recipe) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!(error = %e, recipe_id = %recipe.id, "Failed to render recipe"),
    }
}

fn print_all(recipes: &[Recipe]) {
    for recipe in recipes {
        print(recipe);
    }
}
