//! Recipes migration.
//!
//! Creates the recipes table with an array column for ingredients.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RECIPES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS recipes CASCADE;")
            .await?;
        Ok(())
    }
}

const RECIPES_SQL: &str = r"
CREATE TABLE recipes (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    ingredients TEXT[] NOT NULL,
    owner_id UUID NOT NULL,
    image_url TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_title_not_blank CHECK (btrim(title) <> ''),
    CONSTRAINT chk_ingredients_not_empty CHECK (cardinality(ingredients) > 0)
);

-- Newest-first listing
CREATE INDEX idx_recipes_created ON recipes(created_at DESC);

-- Array containment search (ingredients @> ARRAY[...])
CREATE INDEX idx_recipes_ingredients ON recipes USING GIN (ingredients);

-- Owner-guarded updates
CREATE INDEX idx_recipes_owner ON recipes(owner_id, created_at DESC);
";
