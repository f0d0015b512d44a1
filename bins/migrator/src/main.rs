//! Database migration runner for Recetario.
//!
//! Usage:
//!   migrator up      - Create the recipes table
//!   migrator down    - Drop it again
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-run migrations
//!
//! Reads `DATABASE_URL` from the environment or `.env`.

use recetario_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI installs its own tracing subscriber
    cli::run_cli(Migrator).await;
}
