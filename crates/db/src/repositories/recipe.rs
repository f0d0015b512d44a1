//! Recipe store for database operations.
//!
//! Implements the recipe store port using SeaORM.

use sea_orm::sea_query::extension::postgres::PgBinOper;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::entities::recipes;
use recetario_core::recipe::{NewRecipe, Recipe, RecipeChanges, RecipeError, RecipeStore};
use recetario_shared::types::{RecipeId, UserId};

/// Recipe store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct SeaOrmRecipeStore {
    db: DatabaseConnection,
}

impl SeaOrmRecipeStore {
    /// Create a new recipe store.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RecipeStore for SeaOrmRecipeStore {
    async fn list(&self) -> Result<Vec<Recipe>, RecipeError> {
        let models = recipes::Entity::find()
            .order_by_desc(recipes::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(transport)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_containing(&self, ingredient: &str) -> Result<Vec<Recipe>, RecipeError> {
        let models = recipes::Entity::find()
            .filter(contains_ingredient(ingredient))
            .order_by_desc(recipes::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(transport)?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeError> {
        let model = recipes::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(transport)?;

        Ok(model.map(to_domain))
    }

    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, RecipeError> {
        let active_model = recipes::ActiveModel {
            id: Set(RecipeId::new().into_inner()),
            title: Set(recipe.title),
            description: Set(recipe.description),
            ingredients: Set(recipe.ingredients),
            owner_id: Set(recipe.owner_id.into_inner()),
            image_url: Set(recipe.image_url),
            created_at: NotSet,
        };

        let model = active_model.insert(&self.db).await.map_err(transport)?;
        debug!(recipe_id = %model.id, "recipe inserted");

        Ok(to_domain(model))
    }

    async fn update(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
        changes: &RecipeChanges,
    ) -> Result<Option<Recipe>, RecipeError> {
        let mut query = recipes::Entity::update_many()
            .col_expr(recipes::Column::Title, Expr::value(changes.title.clone()))
            .col_expr(
                recipes::Column::Description,
                Expr::value(changes.description.clone()),
            )
            .col_expr(
                recipes::Column::Ingredients,
                Expr::value(changes.ingredients.clone()),
            )
            .filter(recipes::Column::Id.eq(id.into_inner()));

        if let Some(owner) = owner {
            query = query.filter(recipes::Column::OwnerId.eq(owner.into_inner()));
        }

        let models = query.exec_with_returning(&self.db).await.map_err(transport)?;

        Ok(models.into_iter().next().map(to_domain))
    }

    async fn set_image(
        &self,
        id: RecipeId,
        owner: Option<UserId>,
        image_url: &str,
    ) -> Result<Option<Recipe>, RecipeError> {
        let query = recipes::Entity::update_many()
            .col_expr(recipes::Column::ImageUrl, Expr::value(image_url))
            .filter(owned_row(id, owner));

        let models = query.exec_with_returning(&self.db).await.map_err(transport)?;

        Ok(models.into_iter().next().map(to_domain))
    }

    async fn delete(&self, id: RecipeId, owner: Option<UserId>) -> Result<bool, RecipeError> {
        let result = recipes::Entity::delete_many()
            .filter(owned_row(id, owner))
            .exec(&self.db)
            .await
            .map_err(transport)?;

        if result.rows_affected > 0 {
            debug!(recipe_id = %id, "recipe deleted");
        }

        Ok(result.rows_affected > 0)
    }
}

/// Match one row by id, scoped to `owner` when set.
fn owned_row(id: RecipeId, owner: Option<UserId>) -> Condition {
    let mut condition = Condition::all().add(recipes::Column::Id.eq(id.into_inner()));
    if let Some(owner) = owner {
        condition = condition.add(recipes::Column::OwnerId.eq(owner.into_inner()));
    }
    condition
}

/// `ingredients @> ARRAY[ingredient]`: whole-element containment.
fn contains_ingredient(ingredient: &str) -> SimpleExpr {
    Expr::col(recipes::Column::Ingredients).binary(
        PgBinOper::Contains,
        Expr::value(vec![ingredient.to_string()]),
    )
}

fn transport(e: DbErr) -> RecipeError {
    RecipeError::transport(e.to_string())
}

/// Convert database model to domain model.
fn to_domain(model: recipes::Model) -> Recipe {
    Recipe {
        id: RecipeId::from_uuid(model.id),
        title: model.title,
        description: model.description,
        ingredients: model.ingredients,
        owner_id: UserId::from_uuid(model.owner_id),
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};
    use sea_orm::{DbBackend, QueryTrait};
    use uuid::Uuid;

    #[test]
    fn test_to_domain_normalizes_timezone() {
        let id = Uuid::now_v7();
        let owner = Uuid::new_v4();
        let created_at = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 3, 1, 14, 0, 0)
            .unwrap();

        let recipe = to_domain(recipes::Model {
            id,
            title: "Gazpacho".to_string(),
            description: "Cold soup".to_string(),
            ingredients: vec!["tomato".to_string(), "cucumber".to_string()],
            owner_id: owner,
            image_url: None,
            created_at,
        });

        assert_eq!(recipe.id.into_inner(), id);
        assert_eq!(recipe.owner_id.into_inner(), owner);
        assert_eq!(recipe.ingredients, vec!["tomato", "cucumber"]);
        assert_eq!(
            recipe.created_at,
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_contains_filter_uses_array_containment() {
        let sql = recipes::Entity::find()
            .filter(contains_ingredient("tomato"))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""ingredients" @>"#), "{sql}");
        assert!(sql.contains("'tomato'"), "{sql}");
    }

    #[test]
    fn test_owned_row_scopes_delete_to_owner() {
        let id = RecipeId::new();
        let owner = UserId::new();

        let scoped = recipes::Entity::delete_many()
            .filter(owned_row(id, Some(owner)))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(scoped.contains(r#""owner_id" ="#), "{scoped}");
        assert!(scoped.contains(&owner.into_inner().to_string()), "{scoped}");

        let unscoped = recipes::Entity::delete_many()
            .filter(owned_row(id, None))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(!unscoped.contains("owner_id"), "{unscoped}");
        assert!(unscoped.contains(&id.into_inner().to_string()), "{unscoped}");
    }

    #[test]
    fn test_transport_keeps_db_message() {
        let err = transport(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, RecipeError::Transport(ref m) if m.contains("connection reset")));
    }
}
